//! Client settings

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;
use super::error::{ConfigError, ConfigResult};

/// How conversation history is kept between queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryMode {
    /// Every query starts from an empty history
    #[default]
    PerQuery,
    /// Successful queries are remembered for the rest of the session
    Session,
}

/// How to reach the tool server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "transport", rename_all = "snake_case")]
pub enum ServerConfig {
    /// Launch a local process and speak MCP over its stdio
    Stdio {
        command: String,
        #[serde(default)]
        args: Vec<String>,
        #[serde(default)]
        env: HashMap<String, String>,
    },
    /// Connect to a Streamable HTTP endpoint
    Http { url: String },
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig::Stdio {
            command: "npx".to_string(),
            args: vec!["@playwright/mcp@latest".to_string()],
            env: HashMap::new(),
        }
    }
}

impl std::fmt::Display for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerConfig::Stdio { command, args, .. } if args.is_empty() => write!(f, "{}", command),
            ServerConfig::Stdio { command, args, .. } => write!(f, "{} {}", command, args.join(" ")),
            ServerConfig::Http { url } => write!(f, "{}", url),
        }
    }
}

fn default_provider() -> String {
    "anthropic".to_string()
}

fn default_model() -> String {
    "claude-3-5-sonnet-20241022".to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_max_turns() -> Option<u32> {
    Some(25)
}

fn default_exit_command() -> String {
    "quit".to_string()
}

/// Client configuration
///
/// Every field has a default, so an empty YAML document is a valid config.
///
/// ```yaml
/// model: claude-3-5-sonnet-20241022
/// max_tokens: 1000
/// max_turns: 25        # null = follow tool requests without a bound
/// history: per_query   # or: session
/// server:
///   transport: stdio
///   command: npx
///   args: ["@playwright/mcp@latest"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Model API provider id (selects the credential and adapter)
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Output token budget per model call
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Custom API base URL
    #[serde(default)]
    pub api_base: Option<String>,
    /// Maximum model calls per query; `None` is unbounded
    #[serde(default = "default_max_turns")]
    pub max_turns: Option<u32>,
    #[serde(default)]
    pub history: HistoryMode,
    /// Upper bound on a single tool call, in seconds
    #[serde(default)]
    pub tool_timeout_secs: Option<u64>,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub log_level: LogLevel,
    /// Input that ends the session (compared case-insensitively)
    #[serde(default = "default_exit_command")]
    pub exit_command: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: None,
            system_prompt: None,
            api_base: None,
            max_turns: default_max_turns(),
            history: HistoryMode::default(),
            tool_timeout_secs: None,
            server: ServerConfig::default(),
            log_level: LogLevel::default(),
            exit_command: default_exit_command(),
        }
    }
}

impl ChatConfig {
    /// Apply `MCPCHAT_*` overrides from the process environment
    pub fn apply_env(&mut self) -> ConfigResult<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from a variable lookup
    ///
    /// Recognized: `MCPCHAT_PROVIDER`, `MCPCHAT_MODEL`, `MCPCHAT_MAX_TURNS`
    /// (`0` or `none` lifts the bound) and `MCPCHAT_LOG_LEVEL`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(provider) = lookup("MCPCHAT_PROVIDER") {
            self.provider = provider;
        }
        if let Some(model) = lookup("MCPCHAT_MODEL") {
            self.model = model;
        }
        if let Some(raw) = lookup("MCPCHAT_MAX_TURNS") {
            let raw = raw.trim();
            self.max_turns = if raw == "0" || raw.eq_ignore_ascii_case("none") {
                None
            } else {
                let turns = raw
                    .parse::<u32>()
                    .map_err(|e| ConfigError::invalid("MCPCHAT_MAX_TURNS", e.to_string()))?;
                Some(turns)
            };
        }
        if let Some(level) = lookup("MCPCHAT_LOG_LEVEL") {
            self.log_level = level
                .parse()
                .map_err(|e: String| ConfigError::invalid("MCPCHAT_LOG_LEVEL", e))?;
        }
        Ok(())
    }

    /// Reject settings the loop cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.provider.trim().is_empty() {
            return Err(ConfigError::invalid("provider", "must not be empty"));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::invalid("model", "must not be empty"));
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::invalid("max_tokens", "must be greater than zero"));
        }
        if self.max_turns == Some(0) {
            return Err(ConfigError::invalid("max_turns", "must be greater than zero (use null for no bound)"));
        }
        if self.tool_timeout_secs == Some(0) {
            return Err(ConfigError::invalid("tool_timeout_secs", "must be greater than zero"));
        }
        if self.exit_command.trim().is_empty() {
            return Err(ConfigError::invalid("exit_command", "must not be empty"));
        }
        match &self.server {
            ServerConfig::Stdio { command, .. } if command.trim().is_empty() => {
                Err(ConfigError::invalid("server.command", "must not be empty"))
            }
            ServerConfig::Http { url } if url.trim().is_empty() => {
                Err(ConfigError::invalid("server.url", "must not be empty"))
            }
            _ => Ok(()),
        }
    }

    /// Whether the input line ends the session
    pub fn is_exit_command(&self, line: &str) -> bool {
        line.trim().eq_ignore_ascii_case(self.exit_command.trim())
    }
}
