use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use colored::*;
use tracing::{debug, info, warn};

use crate::app_deps::{
    Clock, CommandRunner, PromptInterface, RealPrompt, SystemClock, SystemCommandRunner,
};
use crate::cli::{Cli, Mode};
use crate::config::Config;
use crate::errors::OrchestratorError;
use crate::git::GitRepository;
use crate::github::SecretStore;
use crate::marker::PipelineTestRun;
use crate::secrets::{self, SecretDefinition, SecretValue, DEFINITIONS};
use crate::{error, output};

/// Outcome of one attempt to store a secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult {
    pub secret_name: String,
    pub success: bool,
    pub message: String,
}

impl OperationResult {
    pub fn new_success(secret_name: String) -> Self {
        Self {
            secret_name,
            success: true,
            message: "configured".to_string(),
        }
    }

    pub fn new_failure(secret_name: String, message: String) -> Self {
        Self {
            secret_name,
            success: false,
            message,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

/// Tally of an interactive run. Skipped secrets are not part of `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetupSummary {
    pub succeeded: usize,
    pub total: usize,
}

impl SetupSummary {
    pub fn from_results(results: &[OperationResult]) -> Self {
        let (succeeded, failed) = App::count_results(results);
        Self {
            succeeded,
            total: succeeded + failed,
        }
    }
}

impl fmt::Display for SetupSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} secrets configured successfully",
            self.succeeded, self.total
        )
    }
}

/// Everything an invocation needs, fixed once arguments are parsed.
#[derive(Debug, Clone)]
pub struct Settings {
    pub mode: Mode,
    pub config: Config,
}

impl Settings {
    pub fn new(cli: &Cli, config: Config) -> Self {
        Self {
            mode: cli.mode(),
            config,
        }
    }
}

pub struct App;

impl App {
    /// Run with real processes, terminal and clock.
    pub async fn run(settings: Settings) -> Result<()> {
        Self::run_with_deps(&SystemCommandRunner, &RealPrompt, &SystemClock, settings).await
    }

    /// Authenticate, then dispatch to the selected mode.
    pub async fn run_with_deps(
        runner: &dyn CommandRunner,
        prompt: &dyn PromptInterface,
        clock: &dyn Clock,
        settings: Settings,
    ) -> Result<()> {
        let Settings { mode, config } = settings;
        debug!(?mode, "dispatching");

        let store = SecretStore::new(runner, config.tools.gh.clone(), config.repository.clone());
        if mode.requires_auth() {
            Self::check_auth(&store).await?;
        }

        match mode {
            Mode::Help => {
                Self::show_help();
                Ok(())
            }
            Mode::List => Self::list_secrets(&store).await.map(|_| ()),
            Mode::Interactive => Self::configure_secrets(&store, prompt).await.map(|_| ()),
            Mode::Test => {
                let git = GitRepository::new(runner, config.tools.git.clone(), config.work_dir()?);
                Self::exercise_pipeline(&git, clock, &config).await.map(|_| ())
            }
            Mode::Default => {
                // guidance is static, so it is shown even when listing fails
                let listed = Self::list_secrets(&store).await;
                Self::show_guidance(&config);
                listed.map(|_| ())
            }
        }
    }

    pub fn show_help() {
        println!("{}", Cli::usage());
        println!("Managed secrets:");
        for def in DEFINITIONS.iter() {
            let tag = if def.required { "required" } else { "optional" };
            println!("  {:<20} {} ({})", def.name, def.description, tag);
        }
    }

    /// Fail with [`OrchestratorError::AuthenticationRequired`] unless `gh` is logged in.
    pub async fn check_auth(store: &SecretStore<'_>) -> Result<()> {
        let authenticated = store
            .auth_status()
            .await
            .context("Authentication check failed")?;
        if !authenticated {
            return Err(OrchestratorError::AuthenticationRequired.into());
        }
        debug!("gh is authenticated");
        Ok(())
    }

    /// Print the configured secret names. Read-only.
    pub async fn list_secrets(store: &SecretStore<'_>) -> Result<Vec<String>> {
        let names = store
            .list_secrets()
            .await
            .context("Failed to list repository secrets")?;

        output::header("Configured secrets");
        if names.is_empty() {
            output::dimmed("  (none)");
        }
        for name in &names {
            output::list_item(name);
        }

        for missing in Self::missing_required(&names) {
            output::warn(&format!("Required secret {} is not configured", missing));
        }

        Ok(names)
    }

    /// Required definitions absent from `configured`.
    pub fn missing_required(configured: &[String]) -> Vec<&'static str> {
        DEFINITIONS
            .iter()
            .filter(|d| d.required && !configured.iter().any(|n| n == d.name))
            .map(|d| d.name)
            .collect()
    }

    /// Prompt for every secret and store the non-blank ones.
    ///
    /// A failure for one secret never stops the others. The resulting state
    /// is listed at the end; a failure to list is only a warning here.
    pub async fn configure_secrets(
        store: &SecretStore<'_>,
        prompt: &dyn PromptInterface,
    ) -> Result<SetupSummary> {
        output::header("Configure deployment secrets");
        output::dimmed("Leave a value empty to skip it.\n");

        let mut results = Vec::new();
        let mut skipped_required = Vec::new();

        for def in DEFINITIONS.iter() {
            let input = prompt
                .prompt_secret(def)
                .with_context(|| format!("Failed to read a value for {}", def.name))?;

            if secrets::is_blank(&input) {
                debug!(secret = def.name, "skipped");
                output::dimmed(&format!("  skipped {}", def.name));
                if def.required {
                    skipped_required.push(def.name);
                }
                continue;
            }

            let value = SecretValue::new(def.name, input.trim());
            let result = Self::store_secret(store, def, &value).await;
            if result.is_success() {
                output::success(&format!("{} configured", result.secret_name));
            } else {
                output::error(&format!("{}: {}", result.secret_name, result.message));
            }
            results.push(result);
        }

        let summary = SetupSummary::from_results(&results);
        info!(succeeded = summary.succeeded, total = summary.total, "setup finished");

        println!();
        if summary.succeeded == summary.total {
            println!("{}", summary.to_string().green().bold());
        } else {
            println!("{}", summary.to_string().yellow().bold());
        }

        if !skipped_required.is_empty() {
            output::warn(&format!(
                "Skipped required secrets: {}",
                skipped_required.join(", ")
            ));
        }

        if let Err(e) = Self::list_secrets(store).await {
            warn!(error = %e, "listing after setup failed");
            output::warn(&error::format_error_chain(&e));
        }

        Ok(summary)
    }

    async fn store_secret(
        store: &SecretStore<'_>,
        definition: &SecretDefinition,
        value: &SecretValue,
    ) -> OperationResult {
        if let Err(e) = definition.validate(&value.value) {
            return OperationResult::new_failure(value.name.clone(), e.to_string());
        }

        match store.set_secret(&value.name, &value.value).await {
            Ok(()) => OperationResult::new_success(value.name.clone()),
            Err(e) => OperationResult::new_failure(value.name.clone(), e.to_string()),
        }
    }

    /// Commit and push a fresh marker file so CI runs.
    pub async fn exercise_pipeline(
        git: &GitRepository<'_>,
        clock: &dyn Clock,
        config: &Config,
    ) -> Result<PipelineTestRun> {
        git.ensure_repository().await?;

        let mut run = PipelineTestRun::new(clock.now());
        let path = run.write_to(git.dir())?;
        output::success(&format!("Created {}", path.display()));

        if let Err(e) = Self::commit_marker(git, &run).await {
            Self::discard_marker(git, &run, &path).await;
            return Err(e);
        }
        output::success(&format!("Committed \"{}\"", run.commit_message));

        git.push().await.context("Failed to push marker commit")?;
        run.pushed = true;
        output::success("Pushed to upstream");
        info!(marker = %run.marker_file_name, "pipeline test pushed");

        let branch = git.current_branch().await.ok();
        output::header("Follow the run");
        for cmd in Self::follow_up_commands(&run, branch.as_deref(), config.repository.as_deref()) {
            output::command(&cmd);
        }

        Ok(run)
    }

    async fn commit_marker(git: &GitRepository<'_>, run: &PipelineTestRun) -> Result<()> {
        git.add(&run.marker_file_name)
            .await
            .context("Failed to stage marker file")?;
        git.commit(&run.commit_message)
            .await
            .context("Failed to commit marker file")?;
        Ok(())
    }

    /// Undo an uncommitted marker so the next run starts from a clean tree.
    async fn discard_marker(git: &GitRepository<'_>, run: &PipelineTestRun, path: &Path) {
        if let Err(e) = git.unstage(&run.marker_file_name).await {
            debug!(error = %e, "marker was not staged");
        }
        if let Err(e) = std::fs::remove_file(path) {
            warn!(error = %e, path = %path.display(), "could not remove marker file");
            output::warn(&format!("Remove {} by hand", path.display()));
        }
    }

    /// Commands for watching the triggered run and cleaning up afterwards.
    pub fn follow_up_commands(
        run: &PipelineTestRun,
        branch: Option<&str>,
        repository: Option<&str>,
    ) -> Vec<String> {
        let repo_flag = repository
            .map(|r| format!(" --repo {}", r))
            .unwrap_or_default();
        let branch_flag = branch
            .filter(|b| *b != "HEAD")
            .map(|b| format!(" --branch {}", b))
            .unwrap_or_default();

        vec![
            format!("gh run list --limit 5{}{}", branch_flag, repo_flag),
            format!("gh run watch{}", repo_flag),
            format!(
                "git rm {} && git commit -m \"chore: remove pipeline test marker\" && git push",
                run.marker_file_name
            ),
        ]
    }

    pub fn show_guidance(config: &Config) {
        output::header("Next steps");
        println!(
            "  {}  prompt for and store each deployment secret",
            "pipeline-secrets --interactive".bright_cyan()
        );
        println!(
            "  {}         push a marker commit to exercise the pipeline",
            "pipeline-secrets --test".bright_cyan()
        );
        println!("  Documentation: {}", config.docs);
    }

    /// Count successful and failed operations.
    pub fn count_results(results: &[OperationResult]) -> (usize, usize) {
        let succeeded = results.iter().filter(|r| r.is_success()).count();
        (succeeded, results.len() - succeeded)
    }
}
