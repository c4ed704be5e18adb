//! mcpchat Core
//!
//! Tool-calling conversation loop between an LLM API and a single MCP tool
//! server. The binary crate wires these pieces to stdin/stdout; everything
//! here is usable (and tested) with injected fakes.
//!
//! ## Flow
//!
//! - `mcp`: connect to the tool server (`McpClient`, behind `ToolProvider`)
//! - `tools`: fetch the `ToolCatalog` once per session
//! - `providers`: model calls (`GenaiProvider`, behind `ModelProvider`)
//! - `chat`: `Session::answer_query` runs turns until the model stops
//!   asking for tools
//! - `shell`: the interactive prompt loop
//!
//! ```rust,ignore
//! use mcpchat_core::{ChatConfig, GenaiProvider, McpClient, Session};
//!
//! let config = ChatConfig::default();
//! let client = McpClient::connect(&config.server, logger.clone()).await?;
//! let model = GenaiProvider::new(&config.provider, logger.clone());
//! let mut session = Session::start(Box::new(model), Box::new(client), config, api_key, logger).await?;
//!
//! let answer = session.answer_query("take a screenshot of example.com").await?;
//! session.close().await?;
//! ```

pub mod types;
pub mod secrets;
pub mod logging;
pub mod config;
pub mod providers;
pub mod tools;
pub mod mcp;
pub mod chat;
pub mod shell;

// Re-export commonly used types
pub use types::{ChatMessage, ContentBlock, MessageRole, Tool, ToolCall, ToolResult, ToolResultContent};

pub use secrets::{
    SecretStore, SecretStoreError, SecretStoreResult,
    EnvSecretStore, DotenvSecretStore, MemorySecretStore, ChainSecretStore,
};

pub use logging::{Logger, LogLevel, NoOpLogger, ConsoleLogger};

pub use config::{ChatConfig, ConfigError, FileConfigProvider, HistoryMode, ServerConfig};

pub use providers::{GenaiProvider, ModelProvider, ProviderError};

pub use tools::ToolCatalog;

pub use mcp::{McpClient, McpError, McpResult, ToolProvider};

pub use chat::{resolve_api_key, ChatError, ChatResult, Conversation, Session};

pub use shell::run_shell;
