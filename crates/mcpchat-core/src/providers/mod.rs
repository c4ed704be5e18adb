//! LLM provider implementations
//!
//! ## Architecture
//!
//! Real model calls go through the `genai` crate, which handles the
//! provider-specific protocols (Anthropic, OpenAI, Gemini, etc.) including
//! tool calling. Auth flows through our resolved credential, not genai's
//! env var lookup.
//!
//! The `MockProvider` is kept for testing purposes.

mod traits;
mod error;
mod genai_adapter;
mod genai_provider;
mod mock;

// Core traits and types
pub use traits::{ChatOptions, ModelProvider, ModelResponse, ProviderModelConfig};
pub use error::{ProviderError, ProviderResult};

// The main provider - handles all LLM providers via genai
pub use genai_provider::GenaiProvider;
pub use genai_adapter::is_genai_supported;

// Mock provider for testing
pub use mock::{MockMode, MockProvider, MockReply, RecordedRequest};
