//! Session: the loop controller and the collaborators it owns

use std::time::Duration;

use crate::config::{ChatConfig, HistoryMode};
use crate::logging::{Logger, SharedLogger};
use crate::mcp::ToolProvider;
use crate::providers::{ChatOptions, ModelProvider, ProviderModelConfig};
use crate::secrets::{requires_api_key, EnvSecretStore, SecretStore};
use crate::tools::ToolCatalog;

use super::conversation::Conversation;
use super::error::{ChatError, ChatResult};
use super::turn::{execute_turn, TurnContext};

/// Loop controller states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    AwaitingModel,
    HaveToolCalls,
    Done,
}

impl std::fmt::Display for LoopState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoopState::AwaitingModel => write!(f, "awaiting_model"),
            LoopState::HaveToolCalls => write!(f, "have_tool_calls"),
            LoopState::Done => write!(f, "done"),
        }
    }
}

/// Look up the model API credential before anything connects
///
/// Providers that run without a key (e.g. ollama) resolve to `None`.
pub fn resolve_api_key(provider: &str, store: &dyn SecretStore) -> ChatResult<Option<String>> {
    match store.get(provider) {
        Some(key) => Ok(Some(key)),
        None if !requires_api_key(provider) => Ok(None),
        None => Err(ChatError::MissingCredential {
            provider: provider.to_string(),
            env_var: EnvSecretStore::primary_var(provider),
        }),
    }
}

/// One chat session
///
/// Owns the model client, the tool provider connection and the catalog
/// fetched from it. Built once and passed to the shell.
pub struct Session {
    model: Box<dyn ModelProvider>,
    tools: Box<dyn ToolProvider>,
    catalog: ToolCatalog,
    config: ChatConfig,
    model_config: ProviderModelConfig,
    options: ChatOptions,
    /// Committed history, only used with `HistoryMode::Session`
    history: Conversation,
    logger: SharedLogger,
}

impl Session {
    /// Fetch the tool catalog and build the session
    ///
    /// If the catalog cannot be fetched the provider is closed before the
    /// error is returned.
    pub async fn start(
        model: Box<dyn ModelProvider>,
        mut tools: Box<dyn ToolProvider>,
        config: ChatConfig,
        api_key: Option<String>,
        logger: SharedLogger,
    ) -> ChatResult<Self> {
        let catalog = match ToolCatalog::fetch(tools.as_ref(), logger.as_ref()).await {
            Ok(catalog) => catalog,
            Err(e) => {
                logger.error(&format!("[Session] Failed to fetch tools: {}", e));
                if let Err(close_err) = tools.close().await {
                    logger.warn(&format!("[Session] Close after failed fetch: {}", close_err));
                }
                return Err(ChatError::Connection(e));
            }
        };

        Ok(Self::new(model, tools, catalog, config, api_key, logger))
    }

    pub fn new(
        model: Box<dyn ModelProvider>,
        tools: Box<dyn ToolProvider>,
        catalog: ToolCatalog,
        config: ChatConfig,
        api_key: Option<String>,
        logger: SharedLogger,
    ) -> Self {
        let mut model_config = ProviderModelConfig::new(&config.model);
        if let Some(key) = api_key {
            model_config = model_config.with_api_key(key);
        }
        if let Some(base) = &config.api_base {
            model_config = model_config.with_api_base(base);
        }

        let mut options = ChatOptions::new()
            .with_max_tokens(config.max_tokens)
            .with_tools(catalog.llm_tools().to_vec());
        if let Some(temperature) = config.temperature {
            options = options.with_temperature(temperature);
        }
        if let Some(system) = &config.system_prompt {
            options = options.with_system(system);
        }

        Self {
            model,
            tools,
            catalog,
            config,
            model_config,
            options,
            history: Conversation::new(),
            logger,
        }
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// History carried between queries; empty in per-query mode
    pub fn history(&self) -> &Conversation {
        &self.history
    }

    pub fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }

    pub fn is_exit_command(&self, line: &str) -> bool {
        self.config.is_exit_command(line)
    }

    fn turn_context(&self) -> TurnContext<'_> {
        TurnContext {
            model: self.model.as_ref(),
            tools: self.tools.as_ref(),
            catalog: &self.catalog,
            model_config: &self.model_config,
            options: &self.options,
            tool_timeout: self.config.tool_timeout_secs.map(Duration::from_secs),
            logger: self.logger.as_ref(),
        }
    }

    /// Answer one query, following tool requests until the model stops
    ///
    /// Returns the text of every turn joined with newlines. A failed query
    /// leaves the session history untouched.
    pub async fn answer_query(&mut self, query: &str) -> ChatResult<String> {
        let mut history = match self.config.history {
            HistoryMode::PerQuery => Conversation::new(),
            HistoryMode::Session => self.history.clone(),
        };
        history.push_user_text(query);

        let mut texts = Vec::new();
        let mut turns: u32 = 0;
        let mut state = LoopState::AwaitingModel;

        while state != LoopState::Done {
            if state == LoopState::HaveToolCalls {
                state = LoopState::AwaitingModel;
            }

            if let Some(max_turns) = self.config.max_turns {
                if turns >= max_turns {
                    self.logger.warn(&format!(
                        "[Session] Giving up after {} model calls",
                        max_turns
                    ));
                    return Err(ChatError::LoopLimitExceeded { max_turns });
                }
            }
            turns += 1;

            let outcome = execute_turn(&self.turn_context(), history).await?;
            history = outcome.conversation;
            texts.extend(outcome.texts);

            state = if outcome.had_tool_calls {
                LoopState::HaveToolCalls
            } else {
                LoopState::Done
            };
            crate::log_debug!(self.logger, "[Session] Turn {} -> {}", turns, state);
        }

        if self.config.history == HistoryMode::Session {
            self.history = history;
        }

        Ok(texts.join("\n"))
    }

    /// Release the tool provider connection
    pub async fn close(&mut self) -> ChatResult<()> {
        crate::log_info!(
            self.logger,
            "[Session] Closing tool provider after {} committed messages",
            self.history.len()
        );
        self.tools.close().await?;
        Ok(())
    }
}
