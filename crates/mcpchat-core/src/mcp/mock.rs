//! Mock tool provider for testing
//!
//! Scripted tool listings and results without launching a server. Clones
//! share state, so a test can keep a handle after moving the provider into
//! a session and inspect the calls it received.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use serde_json::Value;

use super::provider::{McpError, McpResult, ToolProvider};

/// Scripted outcome of one tool call
#[derive(Debug, Clone)]
pub enum MockToolResponse {
    /// Return this result
    Result(CallToolResult),
    /// Fail the call at the protocol level
    Fail(String),
    /// Never answer
    Hang,
}

impl MockToolResponse {
    pub fn text(text: impl Into<String>) -> Self {
        MockToolResponse::Result(CallToolResult::success(vec![Content::text(text.into())]))
    }
}

#[derive(Debug, Default)]
struct MockState {
    tools: Mutex<Vec<Tool>>,
    list_error: Mutex<Option<String>>,
    responses: Mutex<HashMap<String, VecDeque<MockToolResponse>>>,
    calls: Mutex<Vec<(String, Value)>>,
    closed: AtomicBool,
    close_count: AtomicUsize,
}

/// Mock tool provider for testing
#[derive(Debug, Clone, Default)]
pub struct MockToolProvider {
    state: Arc<MockState>,
}

impl MockToolProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advertise a tool with an empty object schema
    pub fn with_tool(self, name: &str, description: &str) -> Self {
        let mut schema = JsonObject::new();
        schema.insert("type".to_string(), Value::String("object".to_string()));
        self.with_tool_schema(name, description, schema)
    }

    /// Advertise a tool with a specific input schema
    pub fn with_tool_schema(self, name: &str, description: &str, schema: JsonObject) -> Self {
        self.state
            .tools
            .lock()
            .push(Tool::new(name.to_string(), description.to_string(), Arc::new(schema)));
        self
    }

    /// Make `list_tools` fail
    pub fn with_list_error(self, message: impl Into<String>) -> Self {
        *self.state.list_error.lock() = Some(message.into());
        self
    }

    /// Queue a response for the next call of `name`
    ///
    /// Calls with nothing queued get a text result `"<name> ok"`.
    pub fn respond(self, name: &str, response: MockToolResponse) -> Self {
        self.state
            .responses
            .lock()
            .entry(name.to_string())
            .or_default()
            .push_back(response);
        self
    }

    /// Calls received so far, in order
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.state.calls.lock().clone()
    }

    /// Names of the tools called so far, in order
    pub fn called_names(&self) -> Vec<String> {
        self.calls().into_iter().map(|(name, _)| name).collect()
    }

    pub fn is_closed(&self) -> bool {
        self.state.closed.load(Ordering::SeqCst)
    }

    pub fn close_count(&self) -> usize {
        self.state.close_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ToolProvider for MockToolProvider {
    async fn list_tools(&self) -> McpResult<Vec<Tool>> {
        if self.is_closed() {
            return Err(McpError::Closed);
        }
        if let Some(message) = self.state.list_error.lock().clone() {
            return Err(McpError::Protocol(message));
        }
        Ok(self.state.tools.lock().clone())
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> McpResult<CallToolResult> {
        if self.is_closed() {
            return Err(McpError::Closed);
        }
        self.state.calls.lock().push((name.to_string(), arguments));

        let scripted = self
            .state
            .responses
            .lock()
            .get_mut(name)
            .and_then(|queue| queue.pop_front());

        match scripted {
            Some(MockToolResponse::Result(result)) => Ok(result),
            Some(MockToolResponse::Fail(message)) => Err(McpError::ToolCallFailed(message)),
            Some(MockToolResponse::Hang) => std::future::pending().await,
            None => Ok(CallToolResult::success(vec![Content::text(format!("{} ok", name))])),
        }
    }

    async fn close(&mut self) -> McpResult<()> {
        self.state.close_count.fetch_add(1, Ordering::SeqCst);
        self.state.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_and_call() {
        let provider = MockToolProvider::new()
            .with_tool("browser_navigate", "Navigate")
            .with_tool("browser_take_screenshot", "Screenshot")
            .respond("browser_navigate", MockToolResponse::text("navigated"));

        let tools = provider.list_tools().await.unwrap();
        let names: Vec<&str> = tools.iter().map(|t| &*t.name).collect();
        assert_eq!(names, vec!["browser_navigate", "browser_take_screenshot"]);

        provider
            .call_tool("browser_navigate", json!({"url": "https://example.com"}))
            .await
            .unwrap();
        provider.call_tool("browser_navigate", json!({})).await.unwrap();

        assert_eq!(provider.called_names(), vec!["browser_navigate", "browser_navigate"]);
        assert_eq!(provider.calls()[0].1["url"], "https://example.com");
    }

    #[tokio::test]
    async fn test_failures_and_close() {
        let mut provider = MockToolProvider::new()
            .with_list_error("boom")
            .respond("x", MockToolResponse::Fail("bad".to_string()));
        let handle = provider.clone();

        assert!(matches!(provider.list_tools().await, Err(McpError::Protocol(_))));
        assert!(matches!(provider.call_tool("x", json!({})).await, Err(McpError::ToolCallFailed(_))));

        provider.close().await.unwrap();
        assert!(handle.is_closed());
        assert_eq!(handle.close_count(), 1);
        assert!(matches!(provider.call_tool("x", json!({})).await, Err(McpError::Closed)));
    }
}
