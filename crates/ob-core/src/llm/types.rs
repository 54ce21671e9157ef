//! Claude Messages API types

use serde::{Deserialize, Serialize};

/// Message in conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: Vec<MessageContent>,
}

impl Message {
    /// Create a user message with text
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: vec![MessageContent::Text { text: text.into() }],
        }
    }

    /// Create an assistant message with text
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: vec![MessageContent::Text { text: text.into() }],
        }
    }

    /// Get text content from message
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|c| {
                if let MessageContent::Text { text } = c {
                    Some(text.clone())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Text of the first content block, or empty if that block is not text
    pub fn first_text(&self) -> &str {
        match self.content.first() {
            Some(MessageContent::Text { text }) => text,
            _ => "",
        }
    }

    /// `(id, name, input)` of every tool_use block
    pub fn tool_uses(&self) -> Vec<(&str, &str, &serde_json::Value)> {
        self.content
            .iter()
            .filter_map(|c| {
                if let MessageContent::ToolUse { id, name, input } = c {
                    Some((id.as_str(), name.as_str(), input))
                } else {
                    None
                }
            })
            .collect()
    }
}

/// Content block in a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: String },
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
    ToolResult {
        tool_use_id: String,
        content: String,
        #[serde(default)]
        is_error: bool,
    },
}

/// Tool definition for Claude API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Messages API request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Messages API response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub response_type: String,
    pub role: String,
    pub content: Vec<MessageContent>,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequence: Option<String>,
    pub stop_reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl MessagesResponse {
    /// The response as a transcript entry
    pub fn into_message(self) -> Message {
        Message {
            role: self.role,
            content: self.content,
        }
    }
}

/// Token usage information
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_content_wire_format() {
        let msg = Message {
            role: "assistant".to_string(),
            content: vec![
                MessageContent::Text { text: "Checking".to_string() },
                MessageContent::ToolUse {
                    id: "toolu_1".to_string(),
                    name: "get_user".to_string(),
                    input: json!({"document_number": 42}),
                },
            ],
        };

        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["content"][0]["type"], "text");
        assert_eq!(value["content"][1]["type"], "tool_use");
        assert_eq!(value["content"][1]["input"]["document_number"], 42);
    }

    #[test]
    fn test_tool_result_is_error_defaults_false() {
        let block: MessageContent = serde_json::from_value(json!({
            "type": "tool_result",
            "tool_use_id": "toolu_1",
            "content": "ok"
        }))
        .unwrap();

        assert_eq!(
            block,
            MessageContent::ToolResult {
                tool_use_id: "toolu_1".to_string(),
                content: "ok".to_string(),
                is_error: false,
            }
        );
    }

    #[test]
    fn test_first_text() {
        assert_eq!(Message::assistant("Hola").first_text(), "Hola");

        let tool_first = Message {
            role: "assistant".to_string(),
            content: vec![MessageContent::ToolUse {
                id: "t".to_string(),
                name: "list_all_users".to_string(),
                input: json!({}),
            }],
        };
        assert_eq!(tool_first.first_text(), "");
        assert_eq!(tool_first.tool_uses().len(), 1);
    }

    #[test]
    fn test_request_omits_unset_fields() {
        let request = MessagesRequest {
            model: "m".to_string(),
            max_tokens: 16,
            system: None,
            messages: vec![Message::user("hi")],
            tools: None,
            temperature: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("system").is_none());
        assert!(value.get("tools").is_none());
        assert!(value.get("temperature").is_none());
    }

    #[test]
    fn test_response_parsing() {
        let response: MessagesResponse = serde_json::from_value(json!({
            "id": "msg_1",
            "type": "message",
            "role": "assistant",
            "content": [{"type": "text", "text": "Hola"}],
            "model": "claude",
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 10, "output_tokens": 2}
        }))
        .unwrap();

        assert_eq!(response.stop_reason, "end_turn");
        assert_eq!(response.into_message().first_text(), "Hola");
    }
}
