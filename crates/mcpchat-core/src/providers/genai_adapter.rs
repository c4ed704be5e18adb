//! Adapter between mcpchat types and genai types
//!
//! Conversion functions both ways, plus client creation. All auth flows
//! through the credential resolved at startup, not genai's default env var
//! lookup.

use std::future::Future;
use std::pin::Pin;

use genai::chat::{
    ChatMessage as GenaiMessage, ChatOptions as GenaiOptions, ChatResponse, ContentPart as GenaiPart,
    MessageContent as GenaiContent, Tool as GenaiTool, ToolCall as GenaiToolCall,
    ToolResponse as GenaiToolResponse,
};
use genai::resolver::{AuthData, AuthResolver, Endpoint, ServiceTargetResolver};
use genai::{Client, ModelIden, ServiceTarget};
use serde_json::{json, Value};

use crate::types::{ChatMessage, ContentBlock, MessageRole, Tool, ToolResultContent};

use super::error::{ProviderError, ProviderResult};
use super::traits::{ChatOptions, ProviderModelConfig};

// ============================================================================
// Message Conversion: mcpchat -> genai
// ============================================================================

/// Build a genai tool call
///
/// Goes through serde so fields genai adds for specific providers take
/// their defaults.
fn to_genai_tool_call(id: &str, name: &str, input: &Value) -> ProviderResult<GenaiToolCall> {
    let call = serde_json::from_value(json!({
        "call_id": id,
        "fn_name": name,
        "fn_arguments": input,
    }))?;
    Ok(call)
}

/// Flatten a tool result payload into the text channel genai offers
fn tool_result_text(content: &[ToolResultContent], is_error: bool) -> String {
    let text = content
        .iter()
        .map(ToolResultContent::to_text)
        .collect::<Vec<_>>()
        .join("\n");
    if is_error {
        format!("[tool error] {}", text)
    } else {
        text
    }
}

/// Convert one mcpchat message into genai messages
///
/// Tool results become genai tool-response messages, one per block, in order.
pub fn to_genai_message(provider: &str, msg: &ChatMessage) -> ProviderResult<Vec<GenaiMessage>> {
    match msg.role {
        MessageRole::User => {
            let mut out = Vec::with_capacity(msg.content.len());
            for block in &msg.content {
                match block {
                    ContentBlock::Text { text } => out.push(GenaiMessage::user(text.clone())),
                    ContentBlock::ToolResult {
                        tool_use_id,
                        content,
                        is_error,
                    } => out.push(GenaiMessage::from(GenaiToolResponse::new(
                        tool_use_id.clone(),
                        tool_result_text(content, *is_error),
                    ))),
                    ContentBlock::ToolUse { name, .. } => {
                        return Err(ProviderError::invalid_request(
                            provider,
                            format!("tool use '{}' in a user message", name),
                        ))
                    }
                }
            }
            Ok(out)
        }
        MessageRole::Assistant => {
            let mut parts = Vec::with_capacity(msg.content.len());
            for block in &msg.content {
                match block {
                    ContentBlock::Text { text } => parts.push(GenaiPart::Text(text.clone())),
                    ContentBlock::ToolUse { id, name, input } => {
                        parts.push(GenaiPart::ToolCall(to_genai_tool_call(id, name, input)?))
                    }
                    ContentBlock::ToolResult { tool_use_id, .. } => {
                        return Err(ProviderError::invalid_request(
                            provider,
                            format!("tool result '{}' in an assistant message", tool_use_id),
                        ))
                    }
                }
            }
            Ok(vec![GenaiMessage::assistant(GenaiContent::from_parts(parts))])
        }
    }
}

/// Convert the whole history, preserving order
pub fn to_genai_messages(provider: &str, messages: &[ChatMessage]) -> ProviderResult<Vec<GenaiMessage>> {
    let mut out = Vec::with_capacity(messages.len());
    for msg in messages {
        out.extend(to_genai_message(provider, msg)?);
    }
    Ok(out)
}

// ============================================================================
// Tool Conversion: mcpchat -> genai
// ============================================================================

/// Convert mcpchat Tool to genai Tool
pub fn to_genai_tool(tool: &Tool) -> GenaiTool {
    GenaiTool::new(&tool.name)
        .with_description(&tool.description)
        .with_schema(tool.input_schema.clone())
}

pub fn to_genai_tools(tools: &[Tool]) -> Vec<GenaiTool> {
    tools.iter().map(to_genai_tool).collect()
}

// ============================================================================
// Options Conversion: mcpchat -> genai
// ============================================================================

pub fn to_genai_options(options: &ChatOptions) -> GenaiOptions {
    let mut genai_opts = GenaiOptions::default();

    if let Some(temp) = options.temperature {
        genai_opts = genai_opts.with_temperature(temp as f64);
    }

    if let Some(max_tokens) = options.max_tokens {
        genai_opts = genai_opts.with_max_tokens(max_tokens);
    }

    genai_opts
}

// ============================================================================
// Response Conversion: genai -> mcpchat
// ============================================================================

/// Convert a genai response into content blocks, keeping emission order
pub fn from_genai_response(response: ChatResponse) -> Vec<ContentBlock> {
    from_genai_parts(response.content.into_parts())
}

/// Keep text and tool-call parts in order; other part kinds have no block
pub fn from_genai_parts(parts: Vec<GenaiPart>) -> Vec<ContentBlock> {
    parts
        .into_iter()
        .filter_map(|part| match part {
            GenaiPart::Text(text) => Some(ContentBlock::text(text)),
            GenaiPart::ToolCall(tc) => Some(ContentBlock::tool_use(tc.call_id, tc.fn_name, tc.fn_arguments)),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Client Creation with Custom Auth
// ============================================================================

/// Create a genai Client with explicit auth and an optional custom endpoint
pub fn create_client(config: &ProviderModelConfig) -> Client {
    let explicit_api_key = config.api_key.clone();
    let api_base = config.api_base.clone();

    let auth_resolver = AuthResolver::from_resolver_async_fn(
        move |_model_iden: ModelIden| -> Pin<Box<dyn Future<Output = genai::resolver::Result<Option<AuthData>>> + Send>> {
            let key = explicit_api_key.clone();
            Box::pin(async move {
                // No key: genai handles the "no auth" case (fine for Ollama)
                Ok(key.map(AuthData::from_single))
            })
        },
    );

    let mut builder = Client::builder().with_auth_resolver(auth_resolver);

    if let Some(base) = api_base {
        let target_resolver = ServiceTargetResolver::from_resolver_fn(
            move |target: ServiceTarget| -> Result<ServiceTarget, genai::resolver::Error> {
                let ServiceTarget { auth, model, .. } = target;
                Ok(ServiceTarget {
                    endpoint: Endpoint::from_owned(base.clone()),
                    auth,
                    model,
                })
            },
        );
        builder = builder.with_service_target_resolver(target_resolver);
    }

    builder.build()
}

/// Check if a provider can be handled by genai
pub fn is_genai_supported(provider: &str) -> bool {
    matches!(
        provider.to_lowercase().as_str(),
        "openai"
            | "anthropic"
            | "gemini"
            | "ollama"
            | "groq"
            | "xai"
            | "deepseek"
            | "cohere"
            | "fireworks"
            | "together"
    )
}
