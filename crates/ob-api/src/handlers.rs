//! HTTP API handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

use ob_core::Message;

use crate::error::{ApiError, Result};
use crate::server::AppState;

/// Chat request payload
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// User message
    pub message: String,
}

/// Chat response payload
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Text of the assistant's final reply
    pub response: String,
}

/// Session transcript
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub messages: Vec<Message>,
}

/// Liveness probe
pub async fn root() -> Json<Value> {
    Json(json!({ "Hello": "World" }))
}

/// Return the stored transcript of a session
pub async fn chat_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<HistoryResponse>> {
    debug!("History request: {}", session_id);

    let messages = state
        .chat
        .history(&session_id)
        .await?
        .ok_or(ApiError::SessionNotFound)?;

    Ok(Json(HistoryResponse { messages }))
}

/// Run one chat turn against a session
pub async fn chat(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    info!("Chat request for session {}", session_id);

    let response = state.chat.chat(&session_id, &req.message).await?;

    Ok(Json(ChatResponse { response }))
}
