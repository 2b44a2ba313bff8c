//! # Pipeline Secrets CLI
//!
//! A command-line tool for preparing a repository's CI/CD pipeline.
//!
//! This library provides functionality to:
//! - Check that the GitHub CLI is authenticated
//! - List and configure the deployment secrets the pipeline needs
//! - Trigger a pipeline run with a timestamped marker commit
//!
//! ## Modules
//!
//! - [`app`] - Mode dispatch and the setup workflow
//! - [`app_deps`] - Command runner, prompt and clock seams
//! - [`cli`] - Command-line flags
//! - [`config`] - Optional configuration file and environment overrides
//! - [`github`] - Repository secrets through the GitHub CLI
//! - [`git`] - Version control operations for the pipeline test
//! - [`marker`] - Marker files that trigger CI
//! - [`prompt`] - Masked terminal input
//! - [`secrets`] - The deployment secrets and their format checks
//! - [`validation`] - Input validation utilities
//! - [`paths`] - XDG-compliant path resolution
//! - [`error`] - Error formatting and remediation hints
//! - [`errors`] - Structured error types
//! - [`output`] - Terminal output helpers
//! - [`constants`] - Application constants

pub mod app;
pub mod app_deps;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod errors;
pub mod git;
pub mod github;
pub mod marker;
pub mod output;
pub mod paths;
pub mod prompt;
pub mod secrets;
pub mod validation;
