//! Thin wrapper around the `git` CLI for the pipeline exercise.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::app_deps::{CommandLine, CommandOutput, CommandRunner};
use crate::errors::OrchestratorError;

/// A working tree addressed with `git -C <dir>`.
pub struct GitRepository<'a> {
    runner: &'a dyn CommandRunner,
    program: String,
    dir: PathBuf,
}

impl<'a> GitRepository<'a> {
    pub fn new(runner: &'a dyn CommandRunner, program: String, dir: PathBuf) -> Self {
        Self {
            runner,
            program,
            dir,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn command(&self, args: &[&str]) -> CommandLine {
        let mut full = vec!["-C".to_string(), self.dir.display().to_string()];
        full.extend(args.iter().map(|a| a.to_string()));
        CommandLine::new(self.program.clone(), full)
    }

    async fn checked(&self, args: &[&str]) -> Result<CommandOutput> {
        let command = self.command(args);
        let output = self.runner.run(&command).await?;
        if !output.is_success() {
            return Err(OrchestratorError::command_failed(
                &command.program,
                &command.args,
                output.error_text(),
            )
            .into());
        }
        Ok(output)
    }

    /// `git rev-parse --git-dir` succeeds only inside a working tree.
    pub async fn is_repository(&self) -> Result<bool> {
        let output = self.runner.run(&self.command(&["rev-parse", "--git-dir"])).await?;
        debug!(dir = %self.dir.display(), is_repo = output.is_success(), "checked for git repository");
        Ok(output.is_success())
    }

    /// Fail with [`OrchestratorError::NotAGitRepository`] outside a working tree.
    pub async fn ensure_repository(&self) -> Result<()> {
        if self.is_repository().await? {
            Ok(())
        } else {
            Err(OrchestratorError::NotAGitRepository {
                path: self.dir.display().to_string(),
            }
            .into())
        }
    }

    pub async fn current_branch(&self) -> Result<String> {
        let output = self.checked(&["rev-parse", "--abbrev-ref", "HEAD"]).await?;
        Ok(output.stdout.trim().to_string())
    }

    pub async fn add(&self, path: &str) -> Result<()> {
        self.checked(&["add", path]).await.map(|_| ())
    }

    pub async fn commit(&self, message: &str) -> Result<()> {
        self.checked(&["commit", "-m", message]).await.map(|_| ())
    }

    /// Drop `path` from the index, leaving the working tree alone.
    pub async fn unstage(&self, path: &str) -> Result<()> {
        self.checked(&["reset", "-q", "--", path]).await.map(|_| ())
    }

    /// Push to the upstream of the current branch.
    pub async fn push(&self) -> Result<()> {
        self.checked(&["push"]).await.map(|_| ())
    }
}
