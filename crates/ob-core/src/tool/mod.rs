//! Tool system for Claude API tool_use
//!
//! Tools are registered by name in a [`ToolManager`] and handed to the
//! agent on every chat turn.

pub mod manager;
pub mod traits;

pub use crate::llm::ToolDefinition;
pub use manager::ToolManager;
pub use traits::{Tool, ToolResult};
