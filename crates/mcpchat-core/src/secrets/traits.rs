//! Core traits and types for secret storage

use thiserror::Error;

/// Errors that can occur while loading a secret store
#[derive(Error, Debug)]
pub enum SecretStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed line {line} in {path}")]
    Malformed { path: String, line: usize },
}

pub type SecretStoreResult<T> = Result<T, SecretStoreError>;

/// Read access to secrets such as API keys
///
/// Keys can be:
/// - A provider name (e.g., "anthropic") which gets mapped to the conventional env var
/// - A direct key (e.g., "ANTHROPIC_API_KEY")
pub trait SecretStore: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Retrieve a secret by key
    fn get(&self, key: &str) -> Option<String>;

    /// Check if a secret exists
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}
