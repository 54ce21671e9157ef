//! Tool trait definition

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::Result;

/// Tool execution result
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    /// Output string from tool execution
    pub output: String,
    /// Whether the execution resulted in an error
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful tool result
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            is_error: false,
        }
    }

    /// Create an error tool result
    pub fn error(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            is_error: true,
        }
    }
}

/// Tool trait for Claude API tool_use
///
/// Implement this trait to expose an operation the model can call by name.
/// The user record tools answer every domain failure with an
/// `Error: {reason}` string in a `ToolResult::error`, never with `Err`.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool name (used in Claude API tool definitions)
    fn name(&self) -> &str;

    /// Get the tool description (shown to Claude when selecting tools)
    fn description(&self) -> &str;

    /// Get the JSON schema for the tool's input parameters
    fn input_schema(&self) -> JsonValue;

    /// Execute the tool with the given input
    ///
    /// Domain failures should come back as `Ok(ToolResult::error(..))` so the
    /// model can read them; `Err` is reserved for faults in the tool itself.
    async fn execute(&self, input: JsonValue) -> Result<ToolResult>;
}
