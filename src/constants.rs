//! Application constants for external tools, environment variables, validation
//! rules and marker files.
//!
//! This module contains all constant values used throughout the application,
//! including the CLI programs we shell out to and the patterns used to check
//! secret values before they reach the secret store.

/// External command-line tools.
pub mod tools {
    /// GitHub CLI, used as the remote secret store client.
    pub const GH: &str = "gh";

    /// Version control CLI, used by the pipeline exercise.
    pub const GIT: &str = "git";

    /// Where to get the GitHub CLI when it is missing.
    pub const GH_INSTALL_URL: &str = "https://cli.github.com";
}

/// Environment variable names.
pub mod env {
    /// Explicit path to the config file.
    pub const CONFIG_PATH: &str = "CONFIG_PATH";

    /// Log filter directives for `tracing-subscriber`.
    pub const LOG: &str = "PIPELINE_SECRETS_LOG";

    /// Repository slug (`owner/name`) passed to `gh --repo`.
    pub const REPO: &str = "PIPELINE_SECRETS_REPO";

    /// Override for the `gh` executable.
    pub const GH_PROGRAM: &str = "PIPELINE_SECRETS_GH";

    /// Override for the `git` executable.
    pub const GIT_PROGRAM: &str = "PIPELINE_SECRETS_GIT";
}

/// Configuration file locations.
pub mod config {
    /// Directory name below the XDG config home.
    pub const APP_DIR: &str = "pipeline-secrets";

    /// File name inside the XDG directory.
    pub const FILE_NAME: &str = "config.toml";

    /// File name looked up in the current directory.
    pub const LOCAL_FILE_NAME: &str = "pipeline-secrets.toml";

    /// Default location of the setup documentation, relative to the repository root.
    pub const DEFAULT_DOCS: &str = "docs/SECRETS_SETUP.md";
}

/// Secret validation constants.
pub mod validation {
    /// IAM role ARN, any partition, optional role path.
    pub const ROLE_ARN_PATTERN: &str =
        r"^arn:aws[a-zA-Z-]*:iam::\d{12}:role/[A-Za-z0-9+=,.@_/-]{1,512}$";

    /// S3 bucket name (lowercase letters, digits, dots and hyphens).
    pub const BUCKET_NAME_PATTERN: &str = r"^[a-z0-9][a-z0-9.-]{1,61}[a-z0-9]$";

    /// DynamoDB table name.
    pub const TABLE_NAME_PATTERN: &str = r"^[A-Za-z0-9_.-]{3,255}$";
}

/// Repository validation constants.
pub mod repo {
    /// Maximum length for repository owner name.
    pub const MAX_OWNER_LENGTH: usize = 39; // GitHub username limit

    /// Maximum length for repository name.
    pub const MAX_REPO_NAME_LENGTH: usize = 100;
}

/// Pipeline exercise constants.
pub mod marker {
    /// Prefix of every marker file name.
    pub const FILE_PREFIX: &str = "pipeline-test-";

    /// Extension of every marker file name.
    pub const FILE_EXTENSION: &str = "txt";

    /// `chrono` format for the timestamp embedded in the file name.
    pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

    /// Upper bound on suffixes tried when a marker name is already taken.
    pub const MAX_SUFFIX_ATTEMPTS: u32 = 100;
}
