//! Tool/function calling types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::message::{ContentBlock, ToolResultContent};

/// Tool definition handed to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Tool name, unique within a catalog
    pub name: String,
    /// Description of what the tool does
    pub description: String,
    /// JSON Schema for the input parameters
    pub input_schema: Value,
}

impl Tool {
    /// Create a new tool definition with an empty object schema
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: serde_json::json!({ "type": "object" }),
        }
    }

    /// Set the input schema
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.input_schema = schema;
        self
    }
}

/// Tool call requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Id of the tool-use block this call came from
    pub id: String,
    /// Name of the tool being called
    pub name: String,
    /// Input arguments for the tool
    pub input: Value,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, input: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input,
        }
    }

    /// Extract the call from a tool-use block
    pub fn from_block(block: &ContentBlock) -> Option<Self> {
        match block {
            ContentBlock::ToolUse { id, name, input } => Some(Self::new(id, name, input.clone())),
            _ => None,
        }
    }

    /// Line shown to the user when the call is made
    pub fn announcement(&self) -> String {
        let args = serde_json::to_string(&self.input).unwrap_or_else(|_| self.input.to_string());
        format!("[Calling tool {} with args {}]", self.name, args)
    }
}

/// Tool result to send back to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Id of the tool call this is responding to
    pub tool_use_id: String,
    /// The result payload
    pub content: Vec<ToolResultContent>,
    /// Whether the tool reported the call as failed
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(tool_use_id: impl Into<String>, content: Vec<ToolResultContent>) -> Self {
        Self {
            tool_use_id: tool_use_id.into(),
            content,
            is_error: false,
        }
    }

    pub fn error(tool_use_id: impl Into<String>, content: Vec<ToolResultContent>) -> Self {
        Self {
            tool_use_id: tool_use_id.into(),
            content,
            is_error: true,
        }
    }
}

impl From<ToolResult> for ContentBlock {
    fn from(result: ToolResult) -> Self {
        ContentBlock::ToolResult {
            tool_use_id: result.tool_use_id,
            content: result.content,
            is_error: result.is_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_creation() {
        let tool = Tool::new("browser_navigate", "Navigate to a URL").with_schema(json!({
            "type": "object",
            "properties": {
                "url": { "type": "string" }
            },
            "required": ["url"]
        }));

        assert_eq!(tool.name, "browser_navigate");
        assert_eq!(tool.input_schema["required"][0], "url");
    }

    #[test]
    fn test_tool_call_from_block() {
        let block = ContentBlock::tool_use("toolu_1", "screenshot", json!({}));
        let call = ToolCall::from_block(&block).unwrap();
        assert_eq!(call.id, "toolu_1");
        assert_eq!(call.name, "screenshot");

        assert!(ToolCall::from_block(&ContentBlock::text("hi")).is_none());
    }

    #[test]
    fn test_announcement_uses_compact_json() {
        let call = ToolCall::new("1", "screenshot", json!({}));
        assert_eq!(call.announcement(), "[Calling tool screenshot with args {}]");

        let call = ToolCall::new("2", "browser_navigate", json!({"url": "https://example.com"}));
        assert_eq!(
            call.announcement(),
            r#"[Calling tool browser_navigate with args {"url":"https://example.com"}]"#
        );
    }

    #[test]
    fn test_tool_result_into_block() {
        let block: ContentBlock = ToolResult::error("toolu_9", vec![ToolResultContent::text("boom")]).into();
        match block {
            ContentBlock::ToolResult { tool_use_id, is_error, .. } => {
                assert_eq!(tool_use_id, "toolu_9");
                assert!(is_error);
            }
            other => panic!("unexpected block: {:?}", other),
        }
    }
}
