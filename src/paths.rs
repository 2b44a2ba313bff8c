//! XDG-compliant path resolution for configuration files.
//!
//! This module locates the optional config file and `.env` file following the
//! XDG Base Directory Specification, with the current directory checked first.

use std::env;
use std::path::PathBuf;

use crate::constants;

/// XDG config directory for this tool, if one can be determined.
/// `XDG_CONFIG_HOME` wins over `~/.config`.
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME")
        && !xdg_config_home.is_empty()
    {
        return Some(PathBuf::from(xdg_config_home).join(constants::config::APP_DIR));
    }

    dirs::home_dir().map(|home| home.join(".config").join(constants::config::APP_DIR))
}

/// Find the config file.
/// Priority:
/// 1. CONFIG_PATH from environment (if set and the file exists)
/// 2. Current directory/pipeline-secrets.toml
/// 3. XDG config directory/config.toml
///
/// The returned path may not exist; callers fall back to defaults then.
pub fn find_config_file() -> PathBuf {
    if let Ok(config_path) = env::var(constants::env::CONFIG_PATH) {
        let path = PathBuf::from(&config_path);
        if path.exists() {
            return path;
        }
    }

    if let Ok(current_dir) = env::current_dir() {
        let local = current_dir.join(constants::config::LOCAL_FILE_NAME);
        if local.exists() {
            return local;
        }
    }

    match config_dir() {
        Some(dir) => dir.join(constants::config::FILE_NAME),
        None => PathBuf::from(constants::config::LOCAL_FILE_NAME),
    }
}

/// Load a `.env` file if present.
/// Priority:
/// 1. Current directory/.env
/// 2. XDG config directory/.env
///
/// Variables already set in the environment are never overwritten.
pub fn load_env_file() -> Option<PathBuf> {
    let current_dir_env = PathBuf::from(".env");
    if current_dir_env.exists() && dotenv::from_path(&current_dir_env).is_ok() {
        return Some(current_dir_env);
    }

    if let Some(dir) = config_dir() {
        let xdg_env = dir.join(".env");
        if xdg_env.exists() && dotenv::from_path(&xdg_env).is_ok() {
            return Some(xdg_env);
        }
    }

    None
}
