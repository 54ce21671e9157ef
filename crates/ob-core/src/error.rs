//! Error types for ob-core

use thiserror::Error;

/// Main error type for ob-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Claude API error: {0}")]
    ClaudeApi(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    #[error("Invalid session id: {0:?}")]
    InvalidSessionId(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ob-core
pub type Result<T> = std::result::Result<T, Error>;
