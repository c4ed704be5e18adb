//! Tool-provider seam

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use rmcp::model::{CallToolResult, Tool};

/// MCP client errors
#[derive(Error, Debug)]
pub enum McpError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Tool call failed: {0}")]
    ToolCallFailed(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Connection already closed")]
    Closed,
}

pub type McpResult<T> = Result<T, McpError>;

/// The external process that exposes callable tools
///
/// `McpClient` is the real implementation; `MockToolProvider` stands in
/// for it in tests.
#[async_trait]
pub trait ToolProvider: Send + Sync {
    /// List every tool the provider exposes, in provider order
    async fn list_tools(&self) -> McpResult<Vec<Tool>>;

    /// Invoke a tool with structured arguments
    async fn call_tool(&self, name: &str, arguments: Value) -> McpResult<CallToolResult>;

    /// End the session; later calls fail with `McpError::Closed`
    async fn close(&mut self) -> McpResult<()>;
}
