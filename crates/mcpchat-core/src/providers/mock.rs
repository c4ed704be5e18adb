//! Mock provider for testing
//!
//! Deterministic, scripted responses without network dependencies. Clones
//! share state so a test can keep a handle after moving the provider into a
//! session.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;

use super::error::{ProviderError, ProviderResult};
use super::traits::{ChatOptions, ModelProvider, ModelResponse, ProviderModelConfig};
use crate::types::{ChatMessage, ContentBlock, MessageRole};

/// Behavior once the scripted replies run out
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Echo back the last user text
    Echo,
    /// Request the same tool on every call
    AlwaysToolUse { name: String, input: Value },
}

impl Default for MockMode {
    fn default() -> Self {
        MockMode::Echo
    }
}

/// One scripted reply
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return these blocks; tool-use blocks with an empty id get a generated one
    Blocks(Vec<ContentBlock>),
    /// Fail the call with a request error
    Error(String),
}

impl MockReply {
    pub fn text(text: impl Into<String>) -> Self {
        MockReply::Blocks(vec![ContentBlock::text(text)])
    }

    /// A single tool-use block with a generated id
    pub fn tool_use(name: impl Into<String>, input: Value) -> Self {
        MockReply::Blocks(vec![ContentBlock::tool_use("", name, input)])
    }
}

/// A request as the provider saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub messages: Vec<ChatMessage>,
    pub options: ChatOptions,
}

#[derive(Default)]
struct MockState {
    replies: VecDeque<MockReply>,
    requests: Vec<RecordedRequest>,
    next_id: usize,
}

/// Mock LLM provider for testing
#[derive(Clone, Default)]
pub struct MockProvider {
    mode: MockMode,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create an echo provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider that asks for the same tool forever
    pub fn always_tool_use(name: impl Into<String>, input: Value) -> Self {
        Self {
            mode: MockMode::AlwaysToolUse {
                name: name.into(),
                input,
            },
            ..Default::default()
        }
    }

    /// Queue a reply; replies are consumed in order
    pub fn reply(self, reply: MockReply) -> Self {
        self.state.lock().replies.push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().requests.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().requests.len()
    }

    fn last_user_text(messages: &[ChatMessage]) -> String {
        messages
            .iter()
            .rev()
            .filter(|m| m.role == MessageRole::User)
            .find_map(|m| m.texts().last().map(|t| t.to_string()))
            .unwrap_or_else(|| "Hello from MockProvider!".to_string())
    }

    fn assign_ids(state: &mut MockState, blocks: Vec<ContentBlock>) -> Vec<ContentBlock> {
        blocks
            .into_iter()
            .map(|block| match block {
                ContentBlock::ToolUse { id, name, input } if id.is_empty() => {
                    state.next_id += 1;
                    ContentBlock::tool_use(format!("toolu_mock_{}", state.next_id), name, input)
                }
                other => other,
            })
            .collect()
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        _model: &ProviderModelConfig,
        options: &ChatOptions,
    ) -> ProviderResult<ModelResponse> {
        let mut state = self.state.lock();
        state.requests.push(RecordedRequest {
            messages: messages.to_vec(),
            options: options.clone(),
        });

        let blocks = match state.replies.pop_front() {
            Some(MockReply::Blocks(blocks)) => blocks,
            Some(MockReply::Error(message)) => return Err(ProviderError::request("mock", message)),
            None => match &self.mode {
                MockMode::Echo => vec![ContentBlock::text(Self::last_user_text(messages))],
                MockMode::AlwaysToolUse { name, input } => {
                    vec![ContentBlock::tool_use("", name.clone(), input.clone())]
                }
            },
        };

        Ok(ModelResponse::new(Self::assign_ids(&mut state, blocks)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model() -> ProviderModelConfig {
        ProviderModelConfig::new("mock-model")
    }

    #[tokio::test]
    async fn test_echo_fallback() {
        let provider = MockProvider::new();
        let response = provider
            .complete(&[ChatMessage::user("Hello")], &model(), &ChatOptions::new())
            .await
            .unwrap();
        assert_eq!(response.texts(), vec!["Hello"]);
    }

    #[tokio::test]
    async fn test_scripted_replies_in_order() {
        let provider = MockProvider::new()
            .reply(MockReply::tool_use("screenshot", json!({})))
            .reply(MockReply::text("Done"));

        let first = provider.complete(&[], &model(), &ChatOptions::new()).await.unwrap();
        let calls = first.tool_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, "toolu_mock_1");
        assert_eq!(calls[0].name, "screenshot");

        let second = provider.complete(&[], &model(), &ChatOptions::new()).await.unwrap();
        assert_eq!(second.texts(), vec!["Done"]);
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_error_reply() {
        let provider = MockProvider::new().reply(MockReply::Error("rate limited".into()));
        let err = provider.complete(&[], &model(), &ChatOptions::new()).await.unwrap_err();
        assert!(err.to_string().contains("rate limited"));
    }

    #[tokio::test]
    async fn test_records_requests_across_clones() {
        let provider = MockProvider::always_tool_use("screenshot", json!({}));
        let handle = provider.clone();
        let options = ChatOptions::new().with_max_tokens(1000);

        provider
            .complete(&[ChatMessage::user("hi")], &model(), &options)
            .await
            .unwrap();

        let requests = handle.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].messages.len(), 1);
        assert_eq!(requests[0].options.max_tokens, Some(1000));
    }
}
