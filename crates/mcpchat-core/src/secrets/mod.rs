//! Credential lookup for the model API
//!
//! - `SecretStore` trait for implementing custom stores
//! - Built-in implementations: `EnvSecretStore`, `DotenvSecretStore`,
//!   `MemorySecretStore`, `ChainSecretStore`

mod traits;
mod env_store;
mod dotenv_store;
mod memory_store;
mod chain_store;

pub use traits::{SecretStore, SecretStoreError, SecretStoreResult};
pub use env_store::{EnvSecretStore, requires_api_key};
pub use dotenv_store::DotenvSecretStore;
pub use memory_store::MemorySecretStore;
pub use chain_store::ChainSecretStore;
