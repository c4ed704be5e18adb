//! MCP (Model Context Protocol) client module
//!
//! Uses the official rmcp SDK to talk to the tool server, either by
//! launching it as a child process (stdio) or over Streamable HTTP.
//!
//! # Example
//!
//! ```rust,ignore
//! use mcpchat_core::mcp::{McpClient, ToolProvider};
//!
//! let mut client = McpClient::connect_stdio("npx", &["@playwright/mcp@latest".into()], &env, logger).await?;
//! let tools = client.list_tools().await?;
//! let result = client.call_tool("browser_navigate", json!({ "url": "https://example.com" })).await?;
//! client.close().await?;
//! ```

mod client;
mod provider;
mod mock;

pub use client::McpClient;
pub use provider::{McpError, McpResult, ToolProvider};
pub use mock::{MockToolProvider, MockToolResponse};

// Re-export rmcp types that consumers might need
pub use rmcp::model::{CallToolResult as McpToolResult, Content as McpContent, RawContent, Tool as McpTool};
