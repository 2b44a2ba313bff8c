#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};

use pipeline_secrets::app_deps::{Clock, CommandLine, CommandOutput, CommandRunner, PromptInterface};
use pipeline_secrets::secrets::SecretDefinition;

/// Scripted stand-in for `gh` and `git`.
pub struct FakeRunner {
    pub authenticated: bool,
    pub secrets_json: String,
    pub list_fails: bool,
    pub set_fails_for: Vec<String>,
    pub is_git_repo: bool,
    pub push_fails: bool,
    pub add_fails: bool,
    pub commit_fails: bool,
    pub calls: Mutex<Vec<CommandLine>>,
}

impl Default for FakeRunner {
    fn default() -> Self {
        Self {
            authenticated: true,
            secrets_json: "[]".to_string(),
            list_fails: false,
            set_fails_for: Vec::new(),
            is_git_repo: true,
            push_fails: false,
            add_fails: false,
            commit_fails: false,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeRunner {
    pub fn with_secrets(names: &[&str]) -> Self {
        let entries: Vec<String> = names
            .iter()
            .map(|n| format!(r#"{{"name":"{}"}}"#, n))
            .collect();
        Self {
            secrets_json: format!("[{}]", entries.join(",")),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<CommandLine> {
        self.calls.lock().unwrap().clone()
    }

    /// Secret names passed to `gh secret set`, in call order.
    pub fn set_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.program == "gh" && c.args.starts_with(&["secret".to_string(), "set".to_string()]))
            .map(|c| c.args[2].clone())
            .collect()
    }

    pub fn count(&self, program: &str, sub: &[&str]) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.program == program && contains_seq(&c.args, sub))
            .count()
    }

    /// Subcommands given to `git -C <dir> ...`, in call order.
    pub fn git_subcommands(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter(|c| c.program == "git")
            .map(|c| c.args[2].clone())
            .collect()
    }
}

fn contains_seq(args: &[String], sub: &[&str]) -> bool {
    sub.is_empty()
        || args
            .windows(sub.len())
            .any(|w| w.iter().zip(sub).all(|(a, b)| a == b))
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, command: &CommandLine) -> Result<CommandOutput> {
        self.calls.lock().unwrap().push(command.clone());
        let args: Vec<&str> = command.args.iter().map(String::as_str).collect();

        let output = match (command.program.as_str(), args.as_slice()) {
            ("gh", ["auth", "status", ..]) => {
                if self.authenticated {
                    CommandOutput::success("Logged in to github.com")
                } else {
                    CommandOutput::failure(1, "You are not logged into any GitHub hosts.")
                }
            }
            ("gh", ["secret", "list", ..]) => {
                if self.list_fails {
                    CommandOutput::failure(1, "HTTP 403: Resource not accessible")
                } else {
                    CommandOutput::success(self.secrets_json.clone())
                }
            }
            ("gh", ["secret", "set", name, ..]) => {
                if self.set_fails_for.iter().any(|n| n.as_str() == *name) {
                    CommandOutput::failure(1, "HTTP 422: Validation Failed")
                } else {
                    CommandOutput::success("")
                }
            }
            ("git", [_, _, "rev-parse", "--git-dir"]) => {
                if self.is_git_repo {
                    CommandOutput::success(".git\n")
                } else {
                    CommandOutput::failure(128, "fatal: not a git repository")
                }
            }
            ("git", [_, _, "rev-parse", "--abbrev-ref", "HEAD"]) => CommandOutput::success("main\n"),
            ("git", [_, _, "push", ..]) if self.push_fails => {
                CommandOutput::failure(1, "! [rejected] main -> main (fetch first)")
            }
            ("git", [_, _, "add", ..]) if self.add_fails => {
                CommandOutput::failure(128, "fatal: Unable to create index.lock: File exists")
            }
            ("git", [_, _, "commit", ..]) if self.commit_fails => {
                CommandOutput::failure(128, "Author identity unknown")
            }
            ("git", _) => CommandOutput::success(""),
            _ => CommandOutput::failure(127, "unknown command"),
        };

        Ok(output)
    }
}

/// Answers prompts from a queue; an exhausted queue answers blank.
#[derive(Default)]
pub struct FakePrompt {
    answers: Mutex<VecDeque<String>>,
    pub asked: Mutex<Vec<String>>,
}

impl FakePrompt {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|a| a.to_string()).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

impl PromptInterface for FakePrompt {
    fn prompt_secret(&self, definition: &SecretDefinition) -> Result<String> {
        self.asked.lock().unwrap().push(definition.name.to_string());
        Ok(self.answers.lock().unwrap().pop_front().unwrap_or_default())
    }
}

pub struct FixedClock(pub DateTime<Local>);

impl FixedClock {
    pub fn new() -> Self {
        Self(Local.with_ymd_and_hms(2026, 5, 1, 12, 30, 45).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

pub const VALID_ARN: &str = "arn:aws:iam::123456789012:role/github-actions-deploy";
