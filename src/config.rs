//! Configuration file parsing and validation.
//!
//! Configuration is optional: without a file the tool targets the repository
//! `gh` infers from the current directory and runs `gh`/`git` from `PATH`.
//! A TOML file and a few environment variables can change that.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants;
use crate::errors::ConfigError;

/// Contents of `pipeline-secrets.toml`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Repository slug (`owner/name`) passed to `gh --repo`.
    pub repository: Option<String>,
    /// Executables to invoke.
    pub tools: Tools,
    /// Working tree used for the pipeline exercise. Defaults to the current directory.
    pub work_dir: Option<PathBuf>,
    /// Documentation pointer printed in the guidance text.
    pub docs: String,
}

/// External program names or paths.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Tools {
    pub gh: String,
    pub git: String,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            gh: constants::tools::GH.to_string(),
            git: constants::tools::GIT.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repository: None,
            tools: Tools::default(),
            work_dir: None,
            docs: constants::config::DEFAULT_DOCS.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;
        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the effective configuration: the config file if one is found,
    /// then environment overrides.
    pub fn load() -> Result<Self> {
        let path = crate::paths::find_config_file();
        let mut config = if path.exists() {
            debug!(path = %path.display(), "loading config file");
            Self::from_file(&path)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        } else {
            debug!("no config file found, using defaults");
            Self::default()
        };

        config.apply_overrides(|key| env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides looked up by environment variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(repo) = non_empty(constants::env::REPO) {
            self.repository = Some(repo.trim().to_string());
        }
        if let Some(gh) = non_empty(constants::env::GH_PROGRAM) {
            self.tools.gh = gh;
        }
        if let Some(git) = non_empty(constants::env::GIT_PROGRAM) {
            self.tools.git = git;
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(repo) = &self.repository {
            crate::validation::validate_repo_slug(repo)
                .map_err(|e| ConfigError::InvalidRepository(format!("{}", e)))?;
        }
        if self.tools.gh.trim().is_empty() || self.tools.git.trim().is_empty() {
            return Err(ConfigError::ParseError("tool paths cannot be empty".to_string()).into());
        }
        Ok(())
    }

    /// The working tree for the pipeline exercise.
    pub fn work_dir(&self) -> Result<PathBuf> {
        match &self.work_dir {
            Some(dir) => Ok(dir.clone()),
            None => env::current_dir().context("Failed to determine current directory"),
        }
    }
}
