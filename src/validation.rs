//! Input validation utilities.
//!
//! This module provides validation functions for repository slugs and the
//! values of the deployment secrets, so that obviously malformed
//! input is rejected before it reaches the secret store.

use anyhow::{Context, Result};
use regex::Regex;

use crate::constants;
use crate::errors::ValidationError;

/// Validate a repository owner name.
pub fn validate_repo_owner(owner: &str) -> Result<()> {
    let trimmed = owner.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::RepositoryOwner("owner cannot be empty".to_string()).into());
    }

    if trimmed.len() > constants::repo::MAX_OWNER_LENGTH {
        return Err(ValidationError::RepositoryOwner(format!(
            "owner cannot exceed {} characters (got {})",
            constants::repo::MAX_OWNER_LENGTH,
            trimmed.len()
        ))
        .into());
    }

    Ok(())
}

/// Validate a repository name.
pub fn validate_repo_name(name: &str) -> Result<()> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::RepositoryName("name cannot be empty".to_string()).into());
    }

    if trimmed.len() > constants::repo::MAX_REPO_NAME_LENGTH {
        return Err(ValidationError::RepositoryName(format!(
            "name cannot exceed {} characters (got {})",
            constants::repo::MAX_REPO_NAME_LENGTH,
            trimmed.len()
        ))
        .into());
    }

    Ok(())
}

/// Validate a repository slug in the `owner/name` form accepted by `gh --repo`.
pub fn validate_repo_slug(slug: &str) -> Result<()> {
    let (owner, name) = slug
        .trim()
        .split_once('/')
        .with_context(|| format!("Repository must be in owner/name form, got '{}'", slug))?;

    if name.contains('/') {
        anyhow::bail!("Repository must be in owner/name form, got '{}'", slug);
    }

    validate_repo_owner(owner)?;
    validate_repo_name(name)?;
    Ok(())
}

fn check_pattern(name: &str, value: &str, pattern: &str, reason: &str) -> Result<()> {
    let re = Regex::new(pattern).context("Failed to compile validation regex")?;
    if !re.is_match(value.trim()) {
        return Err(ValidationError::SecretFormat {
            name: name.to_string(),
            reason: reason.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Validate an IAM role ARN such as `arn:aws:iam::123456789012:role/deploy`.
pub fn validate_role_arn(value: &str) -> Result<()> {
    check_pattern(
        "AWS_ROLE_ARN",
        value,
        constants::validation::ROLE_ARN_PATTERN,
        "expected arn:aws:iam::<12-digit account id>:role/<role name>",
    )
}

/// Validate an S3 bucket name.
pub fn validate_bucket_name(value: &str) -> Result<()> {
    check_pattern(
        "TF_STATE_BUCKET",
        value,
        constants::validation::BUCKET_NAME_PATTERN,
        "expected 3-63 lowercase letters, digits, dots or hyphens",
    )?;

    if value.contains("..") {
        return Err(ValidationError::SecretFormat {
            name: "TF_STATE_BUCKET".to_string(),
            reason: "bucket names cannot contain consecutive dots".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Validate a DynamoDB table name.
pub fn validate_table_name(value: &str) -> Result<()> {
    check_pattern(
        "TF_STATE_LOCK_TABLE",
        value,
        constants::validation::TABLE_NAME_PATTERN,
        "expected 3-255 letters, digits, underscores, dots or hyphens",
    )
}
