use thiserror::Error;

/// Errors raised while orchestrating the secret store and the pipeline exercise.
#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Not authenticated with the GitHub CLI")]
    AuthenticationRequired,
    #[error("Failed to set secret {name}: {message}")]
    SecretSetFailed { name: String, message: String },
    #[error("Not a git repository: {path}")]
    NotAGitRepository { path: String },
    #[error("Command `{command}` failed: {message}")]
    ExternalCommandFailed { command: String, message: String },
    #[error("Required tool not found: {tool}")]
    ToolNotFound { tool: String },
}

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse config file: {0}")]
    ParseError(String),
    #[error("Invalid repository configuration: {0}")]
    InvalidRepository(String),
}

/// Errors that can occur during validation.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Repository owner validation failed: {0}")]
    RepositoryOwner(String),
    #[error("Repository name validation failed: {0}")]
    RepositoryName(String),
    #[error("Invalid format for {name}: {reason}")]
    SecretFormat { name: String, reason: String },
}

impl OrchestratorError {
    /// Build an [`OrchestratorError::ExternalCommandFailed`] from a program, its
    /// arguments and the text the program printed.
    pub fn command_failed(program: &str, args: &[String], message: &str) -> Self {
        let command = if args.is_empty() {
            program.to_string()
        } else {
            format!("{} {}", program, args.join(" "))
        };
        let message = message.trim();
        OrchestratorError::ExternalCommandFailed {
            command,
            message: if message.is_empty() {
                "no output".to_string()
            } else {
                message.to_string()
            },
        }
    }
}
