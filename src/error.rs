//! Error types for worksuite-authz
//!
//! `thiserror` hierarchy for the library surface. Note that the resolver
//! itself never errors: absent or malformed input resolves to denial. The
//! errors here belong to the catalog loader and to the `require_*`
//! convenience wrappers at the call-site boundary.

use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Access denied: {0}")]
    AccessDenied(#[from] AccessDeniedError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Role-catalog configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load role catalog: {0}")]
    Load(String),

    #[error("Invalid role catalog: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {field}")]
    Missing { field: String },

    #[error("Unknown role '{role}' referenced by {referrer}")]
    UnknownRole { role: String, referrer: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Denial produced by the `require_*` wrappers
#[derive(Error, Debug)]
#[error("Access denied for '{subject}': {reason}")]
pub struct AccessDeniedError {
    pub subject: String,
    pub reason: String,
}

impl AccessDeniedError {
    pub fn new(subject: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            reason: reason.into(),
        }
    }

    pub fn missing_permission(subject: impl Into<String>, permission: &str) -> Self {
        Self {
            subject: subject.into(),
            reason: format!("permission '{}' is not granted", permission),
        }
    }

    pub fn project_restricted(
        subject: impl Into<String>,
        permission: &str,
        project: &str,
    ) -> Self {
        Self {
            subject: subject.into(),
            reason: format!(
                "permission '{}' is not granted for project '{}'",
                permission, project
            ),
        }
    }
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;
