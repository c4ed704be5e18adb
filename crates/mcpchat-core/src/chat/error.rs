//! Errors surfaced to the user

use thiserror::Error;

use crate::config::ConfigError;
use crate::mcp::McpError;
use crate::providers::ProviderError;
use crate::secrets::SecretStoreError;

/// Errors that end a query or the session
#[derive(Error, Debug)]
pub enum ChatError {
    /// Tool provider unreachable or its listing malformed
    #[error("Connection error: {0}")]
    Connection(#[from] McpError),

    /// The model API call failed
    #[error("Model call failed: {0}")]
    ModelCall(#[from] ProviderError),

    /// Unknown tool, or the provider failed while running it
    #[error("Tool '{tool}' failed: {message}")]
    ToolExecution { tool: String, message: String },

    /// The model kept requesting tools past the configured bound
    #[error("Query stopped after {max_turns} model calls without a final answer")]
    LoopLimitExceeded { max_turns: u32 },

    #[error("No API key for {provider}: set {env_var} in the environment or .env")]
    MissingCredential { provider: String, env_var: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Secret store error: {0}")]
    Secrets(#[from] SecretStoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChatError {
    pub fn tool_execution(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolExecution {
            tool: tool.into(),
            message: message.into(),
        }
    }

    pub fn unknown_tool(tool: impl Into<String>) -> Self {
        Self::tool_execution(tool, "unknown tool")
    }

    /// Whether the session should end rather than move on to the next query
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ChatError::Connection(_)
                | ChatError::MissingCredential { .. }
                | ChatError::Config(_)
                | ChatError::Secrets(_)
                | ChatError::Io(_)
        )
    }
}

pub type ChatResult<T> = Result<T, ChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ChatError::unknown_tool("teleport").to_string(),
            "Tool 'teleport' failed: unknown tool"
        );
        assert_eq!(
            ChatError::MissingCredential {
                provider: "anthropic".into(),
                env_var: "ANTHROPIC_API_KEY".into(),
            }
            .to_string(),
            "No API key for anthropic: set ANTHROPIC_API_KEY in the environment or .env"
        );
    }

    #[test]
    fn test_fatal_classes() {
        assert!(ChatError::from(McpError::Closed).is_fatal());
        assert!(!ChatError::from(ProviderError::request("anthropic", "rate limited")).is_fatal());
        assert!(!ChatError::unknown_tool("x").is_fatal());
        assert!(!ChatError::LoopLimitExceeded { max_turns: 3 }.is_fatal());
    }
}
