//! Dependency seams of the orchestrator.
//!
//! Every interaction with the outside world (external CLIs, the terminal and
//! the wall clock) goes through one of the traits below so tests can swap in
//! fakes and assert the exact commands that would have run.

use std::fmt;
use std::io::ErrorKind;
use std::process::Stdio;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, trace};

use crate::errors::OrchestratorError;
use crate::{prompt, secrets};

/// A single external command invocation.
#[derive(Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
    /// Data written to the child's stdin. Used for secret values so they
    /// never show up in the process list.
    pub stdin: Option<String>,
}

impl CommandLine {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            stdin: None,
        }
    }

    pub fn with_stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }
}

impl fmt::Debug for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandLine")
            .field("program", &self.program)
            .field("args", &self.args)
            .field("stdin", &self.stdin.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// What a finished command left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            exit_code: Some(0),
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            exit_code: Some(code),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// The most useful text to show when the command failed.
    pub fn error_text(&self) -> &str {
        if self.stderr.trim().is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// Runs external programs to completion.
///
/// A non-zero exit is not an error at this level; callers inspect
/// [`CommandOutput::exit_code`]. Errors are reserved for commands that could
/// not be started at all.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &CommandLine) -> Result<CommandOutput>;
}

/// [`CommandRunner`] backed by real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, command: &CommandLine) -> Result<CommandOutput> {
        debug!(program = %command.program, args = ?command.args, "running command");

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(if command.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| -> anyhow::Error {
                if e.kind() == ErrorKind::NotFound {
                    OrchestratorError::ToolNotFound {
                        tool: command.program.clone(),
                    }
                    .into()
                } else {
                    anyhow::Error::new(e).context(format!("Failed to start `{}`", command.program))
                }
            })?;

        if let Some(input) = &command.stdin
            && let Some(mut stdin) = child.stdin.take()
        {
            stdin
                .write_all(input.as_bytes())
                .await
                .with_context(|| format!("Failed to write to `{}` stdin", command.program))?;
            // Dropping closes the pipe so the child sees EOF.
            drop(stdin);
        }

        let output = child
            .wait_with_output()
            .await
            .with_context(|| format!("Failed to wait for `{}`", command.program))?;

        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        };
        trace!(program = %command.program, exit_code = ?result.exit_code, "command finished");

        Ok(result)
    }
}

/// Collects secret values from the user.
pub trait PromptInterface: Send + Sync {
    fn prompt_secret(&self, definition: &secrets::SecretDefinition) -> Result<String>;
}

pub struct RealPrompt;

impl PromptInterface for RealPrompt {
    fn prompt_secret(&self, definition: &secrets::SecretDefinition) -> Result<String> {
        prompt::prompt_secret(definition)
    }
}

/// Source of the current time for marker files.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
