//! Provider trait definition

use async_trait::async_trait;

use crate::types::{ChatMessage, ContentBlock, Tool, ToolCall};
use super::error::ProviderResult;

/// Model configuration for provider requests
#[derive(Debug, Clone)]
pub struct ProviderModelConfig {
    /// Model identifier as used by the provider's API
    pub model: String,
    /// API key for authentication
    pub api_key: Option<String>,
    /// Custom API base URL
    pub api_base: Option<String>,
}

impl ProviderModelConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_key: None,
            api_base: None,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }
}

/// Options for a single model call
#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature for response generation (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// System prompt
    pub system: Option<String>,
    /// Tools available for the model to use
    pub tools: Vec<Tool>,
}

impl ChatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = tools;
        self
    }
}

/// A complete (non-streamed) model response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelResponse {
    /// Content blocks in the order the model emitted them
    pub content: Vec<ContentBlock>,
}

impl ModelResponse {
    pub fn new(content: Vec<ContentBlock>) -> Self {
        Self { content }
    }

    pub fn texts(&self) -> Vec<&str> {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn tool_calls(&self) -> Vec<ToolCall> {
        self.content.iter().filter_map(ToolCall::from_block).collect()
    }

    pub fn has_tool_calls(&self) -> bool {
        self.content.iter().any(ContentBlock::is_tool_use)
    }
}

/// LLM API boundary
///
/// Retries, if any, belong to the implementation; callers treat every
/// error as final for the current call.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Get the provider name (e.g., "anthropic")
    fn name(&self) -> &str;

    /// Send the history and tool catalog, returning the model's next message
    async fn complete(
        &self,
        messages: &[ChatMessage],
        model: &ProviderModelConfig,
        options: &ChatOptions,
    ) -> ProviderResult<ModelResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_model_response_helpers() {
        let response = ModelResponse::new(vec![
            ContentBlock::text("first"),
            ContentBlock::tool_use("a", "screenshot", json!({})),
            ContentBlock::text("second"),
            ContentBlock::tool_use("b", "click", json!({"ref": "e1"})),
        ]);

        assert_eq!(response.texts(), vec!["first", "second"]);
        assert!(response.has_tool_calls());
        let ids: Vec<String> = response.tool_calls().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["a", "b"]);

        assert!(!ModelResponse::new(vec![ContentBlock::text("4")]).has_tool_calls());
    }

    #[test]
    fn test_options_builder() {
        let options = ChatOptions::new()
            .with_max_tokens(1000)
            .with_system("be brief")
            .with_tools(vec![Tool::new("screenshot", "Take a screenshot")]);
        assert_eq!(options.max_tokens, Some(1000));
        assert_eq!(options.system.as_deref(), Some("be brief"));
        assert_eq!(options.tools.len(), 1);
        assert!(options.temperature.is_none());
    }
}
