//! The deployment secrets the pipeline needs.
//!
//! The set is fixed at compile time and always walked in the same order:
//! the OIDC role, the Terraform state bucket, the state lock table and the
//! optional Snyk token.

use std::fmt;

use anyhow::Result;

use crate::validation;

/// Format check applied to a submitted value before it is stored.
pub type Validator = fn(&str) -> Result<()>;

/// A named secret the pipeline expects to find in the repository.
#[derive(Clone, Copy)]
pub struct SecretDefinition {
    /// Secret name as stored in the repository.
    pub name: &'static str,
    /// Whether the pipeline cannot run without it.
    pub required: bool,
    /// One-line description shown in prompts.
    pub description: &'static str,
    /// Optional format check for the value.
    pub validator: Option<Validator>,
}

impl SecretDefinition {
    /// Run the format check, if any, against `value`.
    pub fn validate(&self, value: &str) -> Result<()> {
        match self.validator {
            Some(check) => check(value),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for SecretDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretDefinition")
            .field("name", &self.name)
            .field("required", &self.required)
            .field("description", &self.description)
            .field("validator", &self.validator.is_some())
            .finish()
    }
}

/// Every secret managed by the tool, in prompt order.
pub const DEFINITIONS: [SecretDefinition; 4] = [
    SecretDefinition {
        name: "AWS_ROLE_ARN",
        required: true,
        description: "IAM role assumed by GitHub Actions through OIDC",
        validator: Some(validation::validate_role_arn),
    },
    SecretDefinition {
        name: "TF_STATE_BUCKET",
        required: true,
        description: "S3 bucket holding the Terraform state",
        validator: Some(validation::validate_bucket_name),
    },
    SecretDefinition {
        name: "TF_STATE_LOCK_TABLE",
        required: true,
        description: "DynamoDB table used for Terraform state locking",
        validator: Some(validation::validate_table_name),
    },
    SecretDefinition {
        name: "SNYK_TOKEN",
        required: false,
        description: "Snyk API token for dependency scanning",
        validator: None,
    },
];

/// A value collected for a secret. Never persisted and never printed.
#[derive(Clone)]
pub struct SecretValue {
    pub name: String,
    pub value: String,
}

impl SecretValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretValue")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .finish()
    }
}

/// Whether the value a user typed should be skipped rather than stored.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definitions_order_and_requiredness() {
        let names: Vec<&str> = DEFINITIONS.iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                "AWS_ROLE_ARN",
                "TF_STATE_BUCKET",
                "TF_STATE_LOCK_TABLE",
                "SNYK_TOKEN"
            ]
        );
        assert!(DEFINITIONS[..3].iter().all(|d| d.required));
        assert!(!DEFINITIONS[3].required);
    }

    #[test]
    fn test_validate_without_validator_accepts_anything() {
        assert!(DEFINITIONS[3].validate("any token at all").is_ok());
    }

    #[test]
    fn test_validate_with_validator() {
        assert!(DEFINITIONS[0].validate("not-an-arn").is_err());
        assert!(
            DEFINITIONS[0]
                .validate("arn:aws:iam::123456789012:role/deploy")
                .is_ok()
        );
    }

    #[test]
    fn test_secret_value_debug_is_redacted() {
        let value = SecretValue::new("SNYK_TOKEN", "super-secret");
        let debug = format!("{:?}", value);
        assert!(debug.contains("SNYK_TOKEN"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   \t "));
        assert!(!is_blank(" x "));
    }
}
