//! Claude Messages API HTTP client

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::LlmConfig;
use crate::error::{Error, Result};

use super::types::*;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Claude API client
#[derive(Clone)]
pub struct ClaudeClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl ClaudeClient {
    /// Create a new client from LLM settings
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(Error::Http)?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Send a request to the Messages endpoint
    pub async fn messages(&self, request: MessagesRequest) -> Result<MessagesResponse> {
        let url = format!("{}/messages", self.base_url);

        debug!(
            "Sending request to Claude API: {} ({} messages)",
            url,
            request.messages.len()
        );

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::Http)?;

        if !status.is_success() {
            warn!("Claude API error: {} - {}", status, body);
            return Err(Error::ClaudeApi(format!("{}: {}", status, body)));
        }

        let parsed: MessagesResponse = serde_json::from_str(&body).map_err(|e| {
            Error::ClaudeApi(format!("Failed to parse response: {} - {}", e, body))
        })?;

        info!(
            "Claude API response: stop_reason={}, tokens={}",
            parsed.stop_reason,
            parsed.usage.as_ref().map(|u| u.output_tokens).unwrap_or(0)
        );

        Ok(parsed)
    }

    /// Get the model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
