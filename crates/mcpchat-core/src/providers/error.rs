//! Provider error types

use thiserror::Error;

/// Errors that can occur during a model call
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The API call failed (transport, auth, rate limit, rejected request)
    #[error("{provider} request failed: {message}")]
    Request { provider: String, message: String },

    /// History could not be expressed in the provider's format
    #[error("Invalid request for {provider}: {message}")]
    InvalidRequest { provider: String, message: String },

    /// JSON conversion error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProviderError {
    pub fn request(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Request {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn invalid_request(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
