//! GenaiProvider - model calls through the genai crate

use async_trait::async_trait;
use genai::chat::ChatRequest;

use crate::logging::{Logger, SharedLogger};
use crate::types::ChatMessage;

use super::error::{ProviderError, ProviderResult};
use super::genai_adapter::{
    create_client, from_genai_response, is_genai_supported, to_genai_messages, to_genai_options,
    to_genai_tools,
};
use super::traits::{ChatOptions, ModelProvider, ModelResponse, ProviderModelConfig};

/// Model provider backed by genai
pub struct GenaiProvider {
    /// Provider identifier
    provider_id: String,
    logger: SharedLogger,
}

impl GenaiProvider {
    pub fn new(provider_id: impl Into<String>, logger: SharedLogger) -> Self {
        Self {
            provider_id: provider_id.into(),
            logger,
        }
    }

    /// Check if this provider can handle the given provider ID
    pub fn supports(provider_id: &str) -> bool {
        is_genai_supported(provider_id)
    }

    /// Extract model name from a model string (e.g., "anthropic/claude-3-5-sonnet" -> "claude-3-5-sonnet")
    pub fn extract_model_name(model: &str) -> &str {
        model.split_once('/').map(|(_, name)| name).unwrap_or(model)
    }
}

#[async_trait]
impl ModelProvider for GenaiProvider {
    fn name(&self) -> &str {
        &self.provider_id
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        model_config: &ProviderModelConfig,
        options: &ChatOptions,
    ) -> ProviderResult<ModelResponse> {
        let model_name = Self::extract_model_name(&model_config.model);

        self.logger.debug(&format!(
            "[GenaiProvider] complete: provider={}, model={}, messages={}, tools={}",
            self.provider_id,
            model_name,
            messages.len(),
            options.tools.len()
        ));

        let client = create_client(model_config);

        let mut chat_req = ChatRequest::new(to_genai_messages(&self.provider_id, messages)?);
        if let Some(system) = &options.system {
            chat_req = chat_req.with_system(system.clone());
        }
        if !options.tools.is_empty() {
            chat_req = chat_req.with_tools(to_genai_tools(&options.tools));
        }

        let genai_options = to_genai_options(options);

        let response = client
            .exec_chat(model_name, chat_req, Some(&genai_options))
            .await
            .map_err(|e| {
                self.logger.error(&format!("[GenaiProvider] Request failed: {}", e));
                ProviderError::request(&self.provider_id, e.to_string())
            })?;

        let content = from_genai_response(response);
        if content.is_empty() {
            self.logger.warn("[GenaiProvider] Response carried no text or tool calls");
        }

        Ok(ModelResponse::new(content))
    }
}
