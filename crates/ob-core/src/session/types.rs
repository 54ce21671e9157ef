//! Session types

use serde::{Deserialize, Serialize};

use super::prompt::DEFAULT_SYSTEM_PROMPT;
use crate::llm::Message;

/// Persisted state of one chat session
///
/// The session id is the document key and is not stored in the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Conversation transcript, oldest first
    pub messages: Vec<Message>,
    /// Directive sent as the system prompt on every turn
    pub system_prompt: String,
}

impl SessionState {
    /// Create an empty session with the given directive
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: Vec::new(),
            system_prompt: system_prompt.into(),
        }
    }

    /// Add a message to the transcript
    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Last message in the transcript
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Get message count
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Check if the transcript is empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM_PROMPT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session() {
        let state = SessionState::default();
        assert!(state.is_empty());
        assert_eq!(state.system_prompt, DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_add_message() {
        let mut state = SessionState::new("be brief");
        state.add_message(Message::user("Hola"));
        assert_eq!(state.message_count(), 1);
        assert_eq!(state.last_message().unwrap().role, "user");
    }

    #[test]
    fn test_document_shape() {
        let mut state = SessionState::new("directive");
        state.add_message(Message::user("Hola"));

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["system_prompt"], "directive");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"][0]["text"], "Hola");
    }
}
