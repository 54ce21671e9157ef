//! Chat turn orchestration: restore, invoke the agent, save

use std::sync::Arc;

use tracing::{debug, info};

use crate::agent::AgentCapability;
use crate::llm::Message;
use crate::session::SessionStore;
use crate::tool::ToolManager;
use crate::Result;

/// Runs chat turns against persisted sessions
///
/// Turns on the same session id are not serialized; the last save wins.
pub struct ChatService {
    sessions: SessionStore,
    tools: Arc<ToolManager>,
    agent: Arc<dyn AgentCapability>,
}

impl ChatService {
    pub fn new(
        sessions: SessionStore,
        tools: Arc<ToolManager>,
        agent: Arc<dyn AgentCapability>,
    ) -> Self {
        Self {
            sessions,
            tools,
            agent,
        }
    }

    /// Process one user message and return the agent's reply text
    ///
    /// The session is saved only when the agent completes the turn.
    pub async fn chat(&self, session_id: &str, message: &str) -> Result<String> {
        let mut state = self.sessions.restore(session_id).await?;
        let before = state.message_count();

        let reply = self.agent.invoke(&mut state, message, &self.tools).await?;

        self.sessions.save(session_id, &state).await?;
        info!(
            "Session {}: turn complete, {} new message(s)",
            session_id,
            state.message_count().saturating_sub(before)
        );
        debug!("Reply for session {}: {}", session_id, reply.text);

        Ok(reply.text)
    }

    /// Transcript of a session, or `None` if it has never been saved
    pub async fn history(&self, session_id: &str) -> Result<Option<Vec<Message>>> {
        Ok(self
            .sessions
            .load(session_id)
            .await?
            .map(|state| state.messages))
    }

    /// Forget a session entirely
    pub async fn reset(&self, session_id: &str) -> Result<bool> {
        self.sessions.delete(session_id).await
    }

    /// Tools offered to the agent
    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    /// Backing session store
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}
