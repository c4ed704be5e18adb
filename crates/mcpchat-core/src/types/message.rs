//! Conversation message types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// One turn in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message sender
    pub role: MessageRole,
    /// Ordered content blocks
    pub content: Vec<ContentBlock>,
}

impl ChatMessage {
    /// Create a user message holding a single text block
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: vec![ContentBlock::text(text)],
        }
    }

    /// Create an assistant message from response blocks
    pub fn assistant(content: Vec<ContentBlock>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content,
        }
    }

    /// Create the user message that carries tool results back to the model
    pub fn tool_results(results: Vec<ContentBlock>) -> Self {
        Self {
            role: MessageRole::User,
            content: results,
        }
    }

    /// Text blocks of this message, in order
    pub fn texts(&self) -> Vec<&str> {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Ids of the tool-use blocks in this message, in order
    pub fn tool_use_ids(&self) -> Vec<&str> {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::ToolUse { id, .. } => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Referenced tool-use ids of the tool-result blocks in this message, in order
    pub fn tool_result_ids(&self) -> Vec<&str> {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::ToolResult { tool_use_id, .. } => Some(tool_use_id.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// One unit of a model response or tool-result payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Free-form model output
    Text {
        text: String,
    },
    /// A request from the model to invoke a tool
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    /// Tool output fed back to the model
    ToolResult {
        tool_use_id: String,
        content: Vec<ToolResultContent>,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        is_error: bool,
    },
}

impl ContentBlock {
    /// Create a text block
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    /// Create a tool use block
    pub fn tool_use(id: impl Into<String>, name: impl Into<String>, input: Value) -> Self {
        ContentBlock::ToolUse {
            id: id.into(),
            name: name.into(),
            input,
        }
    }

    /// Create a tool result block
    pub fn tool_result(tool_use_id: impl Into<String>, content: Vec<ToolResultContent>) -> Self {
        ContentBlock::ToolResult {
            tool_use_id: tool_use_id.into(),
            content,
            is_error: false,
        }
    }

    pub fn is_tool_use(&self) -> bool {
        matches!(self, ContentBlock::ToolUse { .. })
    }
}

/// A single part of a tool's result payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolResultContent {
    Text {
        text: String,
    },
    /// Base64 image data (e.g. a browser screenshot)
    Image {
        data: String,
        mime_type: String,
    },
}

impl ToolResultContent {
    pub fn text(text: impl Into<String>) -> Self {
        ToolResultContent::Text { text: text.into() }
    }

    pub fn image(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        ToolResultContent::Image {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Render this part as plain text for text-only model channels
    pub fn to_text(&self) -> String {
        match self {
            ToolResultContent::Text { text } => text.clone(),
            ToolResultContent::Image { data, mime_type } => {
                format!("[image {}, {} bytes base64]", mime_type, data.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_message_creation() {
        let user = ChatMessage::user("Hello");
        assert_eq!(user.role, MessageRole::User);
        assert_eq!(user.texts(), vec!["Hello"]);

        let asst = ChatMessage::assistant(vec![
            ContentBlock::text("Let me look"),
            ContentBlock::tool_use("toolu_1", "browser_navigate", json!({"url": "https://example.com"})),
        ]);
        assert_eq!(asst.role, MessageRole::Assistant);
        assert_eq!(asst.texts(), vec!["Let me look"]);
        assert_eq!(asst.tool_use_ids(), vec!["toolu_1"]);
    }

    #[test]
    fn test_content_block_serialization() {
        let block = ContentBlock::tool_use("toolu_1", "screenshot", json!({}));
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["type"], "tool_use");
        assert_eq!(value["name"], "screenshot");

        let result = ContentBlock::tool_result("toolu_1", vec![ToolResultContent::text("ok")]);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["type"], "tool_result");
        assert_eq!(value["tool_use_id"], "toolu_1");
        assert!(value.get("is_error").is_none());
    }

    #[test]
    fn test_tool_result_ids() {
        let msg = ChatMessage::tool_results(vec![
            ContentBlock::tool_result("a", vec![]),
            ContentBlock::tool_result("b", vec![]),
        ]);
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.tool_result_ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_image_to_text() {
        let part = ToolResultContent::image("aGVsbG8=", "image/png");
        assert_eq!(part.to_text(), "[image image/png, 8 bytes base64]");
    }
}
