//! Error reporting helpers.
//!
//! Turns an `anyhow::Error` into what the user sees: the message chain, a
//! remediation hint when we know one, and the process exit code.

use anyhow::Error;

use crate::config::Tools;
use crate::constants;
use crate::errors::{ConfigError, OrchestratorError};

/// Format an error and its source chain into a detailed error message.
///
/// # Example
///
/// ```
/// use pipeline_secrets::error::format_error_chain;
///
/// let err = anyhow::anyhow!("push rejected").context("Pipeline test failed");
/// assert_eq!(format_error_chain(&err), "Pipeline test failed → push rejected");
/// ```
pub fn format_error_chain(error: &Error) -> String {
    error
        .chain()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(" → ")
}

/// A next step for errors the user can fix themselves.
///
/// `tools` are the programs the run was configured with, so a missing tool
/// is matched against exactly what was invoked.
pub fn remediation_hint(error: &Error, tools: &Tools) -> Option<String> {
    for cause in error.chain() {
        if let Some(err) = cause.downcast_ref::<OrchestratorError>() {
            return match err {
                OrchestratorError::AuthenticationRequired => {
                    Some("authenticate first: gh auth login".to_string())
                }
                OrchestratorError::ToolNotFound { tool } if *tool == tools.gh => Some(format!(
                    "install the GitHub CLI from {} or set {}",
                    constants::tools::GH_INSTALL_URL,
                    constants::env::GH_PROGRAM
                )),
                OrchestratorError::ToolNotFound { tool } if *tool == tools.git => Some(format!(
                    "install git or set {}",
                    constants::env::GIT_PROGRAM
                )),
                OrchestratorError::ToolNotFound { tool } => {
                    Some(format!("make sure {} is installed and on PATH", tool))
                }
                OrchestratorError::NotAGitRepository { .. } => {
                    Some("run this from inside the repository checkout".to_string())
                }
                _ => None,
            };
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return Some(format!(
                "check {} or the file named by {}",
                constants::config::LOCAL_FILE_NAME,
                constants::env::CONFIG_PATH
            ));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_chain_order() {
        let err = anyhow::anyhow!("outer error")
            .context("middle error")
            .context("inner error");
        assert_eq!(
            format_error_chain(&err),
            "inner error → middle error → outer error"
        );
    }

    #[test]
    fn test_hint_for_auth() {
        let err: Error = OrchestratorError::AuthenticationRequired.into();
        assert_eq!(
            remediation_hint(&err, &Tools::default()).as_deref(),
            Some("authenticate first: gh auth login")
        );
    }

    #[test]
    fn test_hint_found_through_context() {
        let tools = Tools {
            gh: "/usr/bin/gh".to_string(),
            git: "git".to_string(),
        };
        let err = Error::from(OrchestratorError::ToolNotFound {
            tool: "/usr/bin/gh".to_string(),
        })
        .context("Authentication check failed");
        assert!(remediation_hint(&err, &tools).unwrap().contains("cli.github.com"));

        let err = Error::from(OrchestratorError::ToolNotFound {
            tool: "git".to_string(),
        });
        assert!(remediation_hint(&err, &tools).unwrap().contains("install git"));
    }

    #[test]
    fn test_hint_matches_configured_program_not_suffix() {
        let err = Error::from(OrchestratorError::ToolNotFound {
            tool: "/usr/local/bin/sigh".to_string(),
        });
        let hint = remediation_hint(&err, &Tools::default()).unwrap();
        assert!(!hint.contains("cli.github.com"), "{}", hint);
        assert!(!hint.contains("install git"), "{}", hint);
        assert!(hint.contains("/usr/local/bin/sigh"), "{}", hint);
    }

    #[test]
    fn test_no_hint_for_generic_errors() {
        assert!(remediation_hint(&anyhow::anyhow!("boom"), &Tools::default()).is_none());
    }
}
