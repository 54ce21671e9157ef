//! ob-core: onboarding gateway core library
//!
//! Claude API client, tool system, session persistence and the chat turn
//! orchestration shared by the HTTP API and the CLI.

pub mod agent;
pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod session;
pub mod storage;
pub mod tool;

pub use agent::{AgentCapability, AgentReply, ClaudeAgent};
pub use chat::ChatService;
pub use config::{ApiConfig, Config, LlmConfig, StorageConfig};
pub use error::{Error, Result};
pub use llm::{ClaudeClient, Message, MessageContent, ToolDefinition};
pub use session::{SessionState, SessionStore, DEFAULT_SYSTEM_PROMPT};
pub use tool::{Tool, ToolManager, ToolResult};
