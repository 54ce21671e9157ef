//! ob-api: HTTP API for the onboarding gateway
//!
//! Exposes the chat turn and session transcript endpoints.
//! Built with axum for async HTTP handling.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use error::{ApiError, ErrorResponse, Result};
pub use server::{app, start_server, AppState};
