//! Error types for ob-api

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Error body returned by every endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// ob-api error type
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Session not found")]
    SessionNotFound,

    /// The upstream model call failed
    #[error("{0}")]
    Agent(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::SessionNotFound => StatusCode::NOT_FOUND,
            Self::Agent(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ob_core::Error> for ApiError {
    fn from(err: ob_core::Error) -> Self {
        use ob_core::Error;

        match err {
            Error::InvalidSessionId(_) => Self::BadRequest(err.to_string()),
            Error::ClaudeApi(_) | Error::Http(_) | Error::ToolExecution(_) => {
                Self::Agent(err.to_string())
            }
            Error::Json(_) | Error::Io(_) | Error::Config(_) => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed ({}): {}", status, self);
        } else {
            warn!("Request rejected ({}): {}", status, self);
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        let cases = [
            (
                ob_core::Error::InvalidSessionId("../x".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ob_core::Error::ClaudeApi("529: overloaded".to_string()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ob_core::Error::ToolExecution("Max iterations (10) reached".to_string()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ob_core::Error::Io(std::io::Error::other("disk")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(ApiError::SessionNotFound.to_string(), "Session not found");
        assert_eq!(ApiError::SessionNotFound.status(), StatusCode::NOT_FOUND);
    }
}
