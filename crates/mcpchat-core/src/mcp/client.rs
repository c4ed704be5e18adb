//! MCP Client using the official rmcp SDK
//!
//! Connects to a tool server over a child process's stdio or over HTTP.

use std::collections::HashMap;

use async_trait::async_trait;
use rmcp::{
    model::{CallToolRequestParams, CallToolResult, ClientCapabilities, ClientInfo, Implementation, Tool},
    service::RunningService,
    transport::{StreamableHttpClientTransport, TokioChildProcess},
    RoleClient, ServiceExt,
};
use serde_json::Value;
use tokio::process::Command;

use crate::config::ServerConfig;
use crate::logging::{Logger, SharedLogger};
use super::provider::{McpError, McpResult, ToolProvider};

/// MCP client for a single tool server
///
/// Dropping the client tears down the transport (and the child process for
/// stdio servers); `close` does the same gracefully.
pub struct McpClient {
    /// The underlying rmcp running service, `None` once closed
    client: Option<RunningService<RoleClient, ClientInfo>>,
    logger: SharedLogger,
}

fn client_info() -> ClientInfo {
    ClientInfo {
        meta: None,
        protocol_version: Default::default(),
        capabilities: ClientCapabilities::default(),
        client_info: Implementation {
            name: "mcpchat".to_string(),
            title: Some("mcpchat".to_string()),
            version: env!("CARGO_PKG_VERSION").to_string(),
            website_url: None,
            icons: None,
        },
    }
}

impl McpClient {
    /// Connect using a server configuration
    pub async fn connect(server: &ServerConfig, logger: SharedLogger) -> McpResult<Self> {
        match server {
            ServerConfig::Stdio { command, args, env } => {
                Self::connect_stdio(command, args, env, logger).await
            }
            ServerConfig::Http { url } => Self::connect_http(url, logger).await,
        }
    }

    /// Launch the server as a child process and speak MCP over its stdio
    pub async fn connect_stdio(
        command: &str,
        args: &[String],
        env: &HashMap<String, String>,
        logger: SharedLogger,
    ) -> McpResult<Self> {
        logger.info(&format!("[McpClient] Launching: {} {}", command, args.join(" ")));

        let mut cmd = Command::new(command);
        cmd.args(args);
        cmd.envs(env);

        let transport = TokioChildProcess::new(cmd)
            .map_err(|e| McpError::ConnectionFailed(format!("failed to launch {}: {}", command, e)))?;

        let client = client_info()
            .serve(transport)
            .await
            .map_err(|e| McpError::InitializationFailed(e.to_string()))?;

        logger.info("[McpClient] Connected and initialized successfully");

        Ok(Self {
            client: Some(client),
            logger,
        })
    }

    /// Connect to an MCP server over HTTP (Streamable HTTP transport)
    pub async fn connect_http(url: &str, logger: SharedLogger) -> McpResult<Self> {
        logger.info(&format!("[McpClient] Connecting to HTTP: {}", url));

        let transport = StreamableHttpClientTransport::from_uri(url);

        let client = client_info()
            .serve(transport)
            .await
            .map_err(|e| McpError::InitializationFailed(e.to_string()))?;

        logger.info("[McpClient] Connected and initialized successfully");

        Ok(Self {
            client: Some(client),
            logger,
        })
    }

    fn service(&self) -> McpResult<&RunningService<RoleClient, ClientInfo>> {
        self.client.as_ref().ok_or(McpError::Closed)
    }

    /// Get server info
    pub fn server_info(&self) -> Option<&Implementation> {
        self.client
            .as_ref()
            .and_then(|client| client.peer_info())
            .map(|info| &info.server_info)
    }

    pub fn is_closed(&self) -> bool {
        self.client.is_none()
    }
}

#[async_trait]
impl ToolProvider for McpClient {
    async fn list_tools(&self) -> McpResult<Vec<Tool>> {
        let tools = self
            .service()?
            .list_all_tools()
            .await
            .map_err(|e| McpError::Protocol(e.to_string()))?;

        crate::log_info!(self.logger, "[McpClient] Listed {} tools", tools.len());

        Ok(tools)
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> McpResult<CallToolResult> {
        self.logger.info(&format!("[McpClient] Calling tool: {}", name));

        let params = CallToolRequestParams {
            meta: None,
            name: name.to_owned().into(),
            arguments: arguments.as_object().cloned(),
            task: None,
        };

        self.service()?
            .call_tool(params)
            .await
            .map_err(|e| McpError::ToolCallFailed(e.to_string()))
    }

    async fn close(&mut self) -> McpResult<()> {
        let Some(client) = self.client.take() else {
            return Ok(());
        };

        self.logger.info("[McpClient] Closing connection");
        client
            .cancel()
            .await
            .map_err(|e| McpError::Protocol(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_launch_failure_is_connection_error() {
        let result = McpClient::connect_stdio(
            "mcpchat-test-no-such-binary-7f3a",
            &[],
            &HashMap::new(),
            Arc::new(NoOpLogger::new()),
        )
        .await;

        assert!(matches!(
            result,
            Err(McpError::ConnectionFailed(_)) | Err(McpError::InitializationFailed(_))
        ));
    }

    #[test]
    fn test_client_info() {
        let info = client_info();
        assert_eq!(info.client_info.name, "mcpchat");
    }
}
