use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::app_deps::{CommandLine, CommandRunner};
use crate::errors::OrchestratorError;

/// One entry of `gh secret list --json name`.
#[derive(Debug, Deserialize)]
pub struct SecretInfo {
    pub name: String,
}

/// Repository secrets reached through the GitHub CLI.
///
/// Values are write-only: the store can list names and set values but never
/// reads a value back.
pub struct SecretStore<'a> {
    runner: &'a dyn CommandRunner,
    program: String,
    repository: Option<String>,
}

impl<'a> SecretStore<'a> {
    pub fn new(runner: &'a dyn CommandRunner, program: String, repository: Option<String>) -> Self {
        Self {
            runner,
            program,
            repository,
        }
    }

    fn command(&self, args: &[&str]) -> CommandLine {
        let mut args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        if let Some(repo) = &self.repository {
            args.push("--repo".to_string());
            args.push(repo.clone());
        }
        CommandLine::new(self.program.clone(), args)
    }

    /// Run `gh auth status`. A missing binary is an error, a non-zero exit
    /// simply means "not authenticated".
    pub async fn auth_status(&self) -> Result<bool> {
        let command = CommandLine::new(self.program.clone(), ["auth", "status"]);
        let output = self.runner.run(&command).await?;
        debug!(authenticated = output.is_success(), "auth status checked");
        Ok(output.is_success())
    }

    /// Names of the secrets currently configured, in the order `gh` reports them.
    pub async fn list_secrets(&self) -> Result<Vec<String>> {
        let command = self.command(&["secret", "list", "--json", "name"]);
        let output = self.runner.run(&command).await?;

        if !output.is_success() {
            return Err(OrchestratorError::command_failed(
                &command.program,
                &command.args,
                output.error_text(),
            )
            .into());
        }

        let stdout = output.stdout.trim();
        if stdout.is_empty() {
            return Ok(Vec::new());
        }

        let secrets: Vec<SecretInfo> =
            serde_json::from_str(stdout).context("Failed to parse `gh secret list` output")?;

        Ok(secrets.into_iter().map(|s| s.name).collect())
    }

    /// Store `value` under `name`. The value travels over stdin.
    pub async fn set_secret(&self, name: &str, value: &str) -> Result<()> {
        let command = self.command(&["secret", "set", name]).with_stdin(value);
        let output = self.runner.run(&command).await?;

        if !output.is_success() {
            let message = output.error_text().trim();
            return Err(OrchestratorError::SecretSetFailed {
                name: name.to_string(),
                message: if message.is_empty() {
                    format!("gh exited with {:?}", output.exit_code)
                } else {
                    message.to_string()
                },
            }
            .into());
        }

        info!(secret = name, "secret stored");
        Ok(())
    }
}
