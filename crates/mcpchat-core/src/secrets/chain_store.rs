//! Chained secret store with fallback behavior

use std::sync::Arc;

use super::dotenv_store::DotenvSecretStore;
use super::env_store::EnvSecretStore;
use super::traits::{SecretStore, SecretStoreResult};

/// A secret store that tries several stores in order
///
/// # Example
///
/// ```
/// use mcpchat_core::secrets::{SecretStore, ChainSecretStore, EnvSecretStore, MemorySecretStore};
/// use std::sync::Arc;
///
/// let memory = Arc::new(MemorySecretStore::new());
/// memory.insert("anthropic", "sk-test");
///
/// let chain = ChainSecretStore::new(vec![Arc::new(EnvSecretStore::new()), memory]);
/// assert!(chain.has("anthropic"));
/// ```
pub struct ChainSecretStore {
    stores: Vec<Arc<dyn SecretStore>>,
}

impl ChainSecretStore {
    pub fn new(stores: Vec<Arc<dyn SecretStore>>) -> Self {
        Self { stores }
    }

    /// Process environment first, then `.env` in the current directory
    pub fn standard() -> SecretStoreResult<Self> {
        Ok(Self::new(vec![
            Arc::new(EnvSecretStore::new()),
            Arc::new(DotenvSecretStore::current_dir()?),
        ]))
    }

    /// Find which store has a key
    pub fn find_store(&self, key: &str) -> Option<&Arc<dyn SecretStore>> {
        self.stores.iter().find(|store| store.has(key))
    }
}

impl SecretStore for ChainSecretStore {
    fn name(&self) -> &str {
        "chain"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.stores.iter().find_map(|store| store.get(key))
    }
}

impl std::fmt::Debug for ChainSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.stores.iter().map(|s| s.name()).collect();
        f.debug_struct("ChainSecretStore").field("stores", &names).finish()
    }
}
