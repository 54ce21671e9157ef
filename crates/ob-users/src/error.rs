//! Error types for ob-users

use thiserror::Error;

/// ob-users error type
#[derive(Error, Debug)]
pub enum UsersError {
    #[error("User with document number {0} already exists")]
    AlreadyExists(i64),

    #[error("User with document number {0} not found")]
    NotFound(i64),

    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl UsersError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, UsersError>;
