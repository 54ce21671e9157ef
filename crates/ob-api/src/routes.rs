//! Route definitions

use axum::{routing::get, Router};

use crate::handlers::{chat, chat_history, root};
use crate::server::AppState;

/// Create the API router
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/chat/{session_id}", get(chat_history).post(chat))
}
