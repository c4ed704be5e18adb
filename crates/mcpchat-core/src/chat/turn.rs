//! Turn executor: one model call plus the tool calls it requested

use std::time::Duration;

use crate::logging::Logger;
use crate::mcp::ToolProvider;
use crate::providers::{ChatOptions, ModelProvider, ProviderModelConfig};
use crate::tools::ToolCatalog;
use crate::types::{ChatMessage, ContentBlock, ToolCall, ToolResult};

use super::conversation::Conversation;
use super::error::{ChatError, ChatResult};

/// Everything a turn borrows from its session
pub struct TurnContext<'a> {
    pub model: &'a dyn ModelProvider,
    pub tools: &'a dyn ToolProvider,
    pub catalog: &'a ToolCatalog,
    pub model_config: &'a ProviderModelConfig,
    /// Carries the token budget and the full tool catalog
    pub options: &'a ChatOptions,
    pub tool_timeout: Option<Duration>,
    pub logger: &'a dyn Logger,
}

/// Result of a successful turn
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// History with the assistant message, and tool results if any, appended
    pub conversation: Conversation,
    /// Text blocks and tool-call announcements, in emission order
    pub texts: Vec<String>,
    pub had_tool_calls: bool,
}

impl TurnOutcome {
    pub fn text(&self) -> String {
        self.texts.join("\n")
    }
}

/// Run one turn against `history`
///
/// On error the history is dropped: a failed turn never leaves partial tool
/// results behind.
pub async fn execute_turn(ctx: &TurnContext<'_>, mut history: Conversation) -> ChatResult<TurnOutcome> {
    let response = ctx
        .model
        .complete(history.messages(), ctx.model_config, ctx.options)
        .await?;

    history.push(ChatMessage::assistant(response.content.clone()));

    let mut texts = Vec::new();
    let mut results: Vec<ContentBlock> = Vec::new();

    for block in &response.content {
        match block {
            ContentBlock::Text { text } => texts.push(text.clone()),
            ContentBlock::ToolUse { id, name, input } => {
                let call = ToolCall::new(id, name, input.clone());
                texts.push(call.announcement());
                let result = call_tool(ctx, &call).await?;
                results.push(result.into());
            }
            ContentBlock::ToolResult { tool_use_id, .. } => {
                ctx.logger.warn(&format!(
                    "[Session] Ignoring tool result '{}' emitted by the model",
                    tool_use_id
                ));
            }
        }
    }

    let had_tool_calls = response.has_tool_calls();
    if had_tool_calls {
        history.push(ChatMessage::tool_results(results));
    }

    Ok(TurnOutcome {
        conversation: history,
        texts,
        had_tool_calls,
    })
}

async fn call_tool(ctx: &TurnContext<'_>, call: &ToolCall) -> ChatResult<ToolResult> {
    if !ctx.catalog.contains(&call.name) {
        ctx.logger.error(&format!("[Session] Model requested unknown tool '{}'", call.name));
        return Err(ChatError::unknown_tool(&call.name));
    }

    crate::log_debug!(ctx.logger, "[Session] Calling {} with {}", call.name, call.input);

    let pending = ctx.tools.call_tool(&call.name, call.input.clone());
    let outcome = match ctx.tool_timeout {
        Some(limit) => tokio::time::timeout(limit, pending).await.map_err(|_| {
            ChatError::tool_execution(&call.name, format!("no response after {:?}", limit))
        })?,
        None => pending.await,
    };
    let result = outcome.map_err(|e| ChatError::tool_execution(&call.name, e.to_string()))?;

    if result.is_error.unwrap_or(false) {
        ctx.logger.warn(&format!("[Session] Tool {} reported an error result", call.name));
    }

    Ok(ToolCatalog::into_tool_result(call, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::mcp::{MockToolProvider, MockToolResponse};
    use crate::providers::{MockProvider, MockReply};
    use crate::types::MessageRole;
    use serde_json::json;

    struct Fixture {
        model: MockProvider,
        tools: MockToolProvider,
        catalog: ToolCatalog,
        model_config: ProviderModelConfig,
        options: ChatOptions,
        logger: NoOpLogger,
    }

    impl Fixture {
        async fn new(model: MockProvider, tools: MockToolProvider) -> Self {
            let logger = NoOpLogger::new();
            let catalog = ToolCatalog::fetch(&tools, &logger).await.unwrap();
            let options = ChatOptions::new()
                .with_max_tokens(1000)
                .with_tools(catalog.llm_tools().to_vec());
            Self {
                model,
                tools,
                catalog,
                model_config: ProviderModelConfig::new("mock-model"),
                options,
                logger,
            }
        }

        fn ctx(&self) -> TurnContext<'_> {
            TurnContext {
                model: &self.model,
                tools: &self.tools,
                catalog: &self.catalog,
                model_config: &self.model_config,
                options: &self.options,
                tool_timeout: None,
                logger: &self.logger,
            }
        }
    }

    fn query(text: &str) -> Conversation {
        let mut conversation = Conversation::new();
        conversation.push_user_text(text);
        conversation
    }

    #[tokio::test]
    async fn test_text_only_turn() {
        let fx = Fixture::new(
            MockProvider::new().reply(MockReply::text("4")),
            MockToolProvider::new().with_tool("screenshot", "Take a screenshot"),
        )
        .await;

        let outcome = execute_turn(&fx.ctx(), query("what is 2+2")).await.unwrap();

        assert!(!outcome.had_tool_calls);
        assert_eq!(outcome.text(), "4");
        assert_eq!(outcome.conversation.len(), 2);
        assert!(fx.tools.calls().is_empty());

        let requests = fx.model.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].options.max_tokens, Some(1000));
        assert_eq!(requests[0].options.tools.len(), 1);
    }

    #[tokio::test]
    async fn test_tool_calls_run_in_order() {
        let fx = Fixture::new(
            MockProvider::new().reply(MockReply::Blocks(vec![
                ContentBlock::text("Let me look"),
                ContentBlock::tool_use("t1", "navigate", json!({ "url": "https://example.com" })),
                ContentBlock::tool_use("t2", "screenshot", json!({})),
                ContentBlock::tool_use("t3", "navigate", json!({ "url": "https://example.org" })),
            ])),
            MockToolProvider::new()
                .with_tool("navigate", "Navigate")
                .with_tool("screenshot", "Screenshot")
                .respond("screenshot", MockToolResponse::text("captured")),
        )
        .await;

        let outcome = execute_turn(&fx.ctx(), query("go")).await.unwrap();

        assert!(outcome.had_tool_calls);
        assert_eq!(fx.tools.called_names(), vec!["navigate", "screenshot", "navigate"]);
        assert_eq!(fx.tools.calls()[0].1, json!({ "url": "https://example.com" }));

        let messages = outcome.conversation.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].tool_use_ids(), vec!["t1", "t2", "t3"]);
        assert_eq!(messages[2].role, MessageRole::User);
        assert_eq!(messages[2].tool_result_ids(), vec!["t1", "t2", "t3"]);

        assert_eq!(
            outcome.texts,
            vec![
                "Let me look".to_string(),
                r#"[Calling tool navigate with args {"url":"https://example.com"}]"#.to_string(),
                "[Calling tool screenshot with args {}]".to_string(),
                r#"[Calling tool navigate with args {"url":"https://example.org"}]"#.to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_fails_turn() {
        let fx = Fixture::new(
            MockProvider::new().reply(MockReply::Blocks(vec![
                ContentBlock::tool_use("t1", "screenshot", json!({})),
                ContentBlock::tool_use("t2", "teleport", json!({})),
            ])),
            MockToolProvider::new().with_tool("screenshot", "Screenshot"),
        )
        .await;

        let err = execute_turn(&fx.ctx(), query("go")).await.unwrap_err();

        assert!(matches!(err, ChatError::ToolExecution { ref tool, .. } if tool == "teleport"));
        assert_eq!(fx.tools.called_names(), vec!["screenshot"]);
    }

    #[tokio::test]
    async fn test_provider_failure_is_tool_execution_error() {
        let fx = Fixture::new(
            MockProvider::new().reply(MockReply::tool_use("click", json!({ "ref": "e3" }))),
            MockToolProvider::new()
                .with_tool("click", "Click")
                .respond("click", MockToolResponse::Fail("browser crashed".into())),
        )
        .await;

        let err = execute_turn(&fx.ctx(), query("click it")).await.unwrap_err();

        match err {
            ChatError::ToolExecution { tool, message } => {
                assert_eq!(tool, "click");
                assert!(message.contains("browser crashed"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_error_result_is_passed_to_model() {
        let fx = Fixture::new(
            MockProvider::new().reply(MockReply::tool_use("click", json!({}))),
            MockToolProvider::new().with_tool("click", "Click").respond(
                "click",
                MockToolResponse::Result(crate::mcp::McpToolResult::error(vec![
                    crate::mcp::McpContent::text("Element not found"),
                ])),
            ),
        )
        .await;

        let outcome = execute_turn(&fx.ctx(), query("click it")).await.unwrap();

        match &outcome.conversation.messages()[2].content[0] {
            ContentBlock::ToolResult { is_error, content, .. } => {
                assert!(*is_error);
                assert_eq!(content[0].to_text(), "Element not found");
            }
            other => panic!("expected a tool result, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_tool_timeout() {
        let fx = Fixture::new(
            MockProvider::new().reply(MockReply::tool_use("snapshot", json!({}))),
            MockToolProvider::new()
                .with_tool("snapshot", "Snapshot")
                .respond("snapshot", MockToolResponse::Hang),
        )
        .await;
        let ctx = TurnContext {
            tool_timeout: Some(Duration::from_millis(20)),
            ..fx.ctx()
        };

        let err = execute_turn(&ctx, query("snapshot")).await.unwrap_err();
        assert!(matches!(err, ChatError::ToolExecution { ref tool, .. } if tool == "snapshot"));
    }

    #[tokio::test]
    async fn test_model_failure_is_model_call_error() {
        let fx = Fixture::new(
            MockProvider::new().reply(MockReply::Error("401 unauthorized".into())),
            MockToolProvider::new(),
        )
        .await;

        let err = execute_turn(&fx.ctx(), query("hi")).await.unwrap_err();
        assert!(matches!(err, ChatError::ModelCall(_)));
    }
}
