//! Agent capability: the model-driven reasoning loop behind a chat turn
//!
//! The orchestration layer only sees [`AgentCapability`]. [`ClaudeAgent`] is
//! the production implementation that runs the Claude tool_use loop.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::LlmConfig;
use crate::llm::{ClaudeClient, Message, MessageContent, MessagesRequest, Usage};
use crate::session::SessionState;
use crate::tool::{ToolManager, ToolResult};
use crate::{Error, Result};

/// Outcome of one agent invocation
#[derive(Debug, Clone)]
pub struct AgentReply {
    /// Text of the first content block of the final message
    pub text: String,
    /// Final assistant message (already appended to the transcript)
    pub message: Message,
    /// Model calls made during this turn
    pub iterations: usize,
    /// Tokens consumed across all model calls
    pub usage: Usage,
}

impl AgentReply {
    /// Build a reply from the final assistant message
    pub fn from_message(message: Message, iterations: usize, usage: Usage) -> Self {
        Self {
            text: message.first_text().to_string(),
            message,
            iterations,
            usage,
        }
    }
}

/// Something that can answer a user prompt given a session and a tool set
///
/// Implementations append everything they produce (assistant turns, tool
/// results) to `state.messages`; the caller persists the state afterwards.
#[async_trait]
pub trait AgentCapability: Send + Sync {
    async fn invoke(
        &self,
        state: &mut SessionState,
        prompt: &str,
        tools: &ToolManager,
    ) -> Result<AgentReply>;
}

/// Claude-backed agent running the tool_use loop
pub struct ClaudeAgent {
    client: ClaudeClient,
    max_tokens: u64,
    temperature: Option<f64>,
    max_iterations: usize,
}

impl ClaudeAgent {
    pub fn new(client: ClaudeClient, config: &LlmConfig) -> Self {
        Self {
            client,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            max_iterations: config.max_iterations.max(1),
        }
    }

    /// Get the underlying client
    pub fn client(&self) -> &ClaudeClient {
        &self.client
    }
}

#[async_trait]
impl AgentCapability for ClaudeAgent {
    async fn invoke(
        &self,
        state: &mut SessionState,
        prompt: &str,
        tools: &ToolManager,
    ) -> Result<AgentReply> {
        state.add_message(Message::user(prompt));

        let definitions = tools.definitions();
        let mut usage = Usage::default();

        for iteration in 1..=self.max_iterations {
            let request = MessagesRequest {
                model: self.client.model().to_string(),
                max_tokens: self.max_tokens,
                system: Some(state.system_prompt.clone()),
                messages: state.messages.clone(),
                tools: (!definitions.is_empty()).then(|| definitions.clone()),
                temperature: self.temperature,
            };

            let response = self.client.messages(request).await?;
            if let Some(u) = &response.usage {
                usage.input_tokens += u.input_tokens;
                usage.output_tokens += u.output_tokens;
            }

            let stop_reason = response.stop_reason.clone();
            let mut message = response.into_message();

            // Only a tool_use stop gets tool results; any other tool_use block
            // would be left unanswered in the transcript.
            if stop_reason != "tool_use" {
                let before = message.content.len();
                message
                    .content
                    .retain(|c| !matches!(c, MessageContent::ToolUse { .. }));
                if message.content.len() < before {
                    warn!(
                        "Dropped {} unfinished tool_use block(s) on stop_reason {}",
                        before - message.content.len(),
                        stop_reason
                    );
                }
            }
            if !message.content.is_empty() {
                state.add_message(message.clone());
            }

            match stop_reason.as_str() {
                "tool_use" => {
                    let results = run_tools(tools, &message).await;
                    if results.is_empty() {
                        warn!("tool_use stop_reason but no tool_use blocks found");
                        return Ok(AgentReply::from_message(message, iteration, usage));
                    }
                    state.add_message(Message {
                        role: "user".to_string(),
                        content: results,
                    });
                }
                "end_turn" | "stop_sequence" | "max_tokens" => {
                    info!(
                        "Agent turn finished after {} call(s), {} output tokens",
                        iteration, usage.output_tokens
                    );
                    return Ok(AgentReply::from_message(message, iteration, usage));
                }
                other => {
                    warn!("Unknown stop_reason: {}", other);
                    return Err(Error::ClaudeApi(format!("Unknown stop_reason: {}", other)));
                }
            }
        }

        Err(Error::ToolExecution(format!(
            "Max iterations ({}) reached without a final answer",
            self.max_iterations
        )))
    }
}

/// Execute every tool_use block of `message`, in order
///
/// Unknown tools and tool faults become error results for the model to read;
/// they never abort the turn.
pub async fn run_tools(tools: &ToolManager, message: &Message) -> Vec<MessageContent> {
    let mut results = Vec::new();
    for (id, name, input) in message.tool_uses() {
        debug!("Executing tool: {} with input: {}", name, input);
        let result = match tools.execute(name, input.clone()).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Tool {} failed: {}", name, e);
                ToolResult::error(format!("Error: {}", e))
            }
        };
        results.push(MessageContent::ToolResult {
            tool_use_id: id.to_string(),
            content: result.output,
            is_error: result.is_error,
        });
    }
    results
}
