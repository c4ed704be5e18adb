//! In-memory secret store

use std::collections::HashMap;

use parking_lot::RwLock;

use super::traits::SecretStore;

/// In-memory secret store for tests
///
/// Keys are matched exactly; no provider-name mapping is applied.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: RwLock<HashMap<String, String>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory store with initial values
    pub fn with_secrets(initial: HashMap<String, String>) -> Self {
        Self {
            secrets: RwLock::new(initial),
        }
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.secrets.write().insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.secrets.write().remove(key)
    }

    pub fn len(&self) -> usize {
        self.secrets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SecretStore for MemorySecretStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.secrets.read().get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_crud() {
        let store = MemorySecretStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("anthropic"), None);

        store.insert("anthropic", "sk-1");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("anthropic"), Some("sk-1".to_string()));

        store.insert("anthropic", "sk-2");
        assert_eq!(store.get("anthropic"), Some("sk-2".to_string()));

        assert_eq!(store.remove("anthropic"), Some("sk-2".to_string()));
        assert!(!store.has("anthropic"));
    }

    #[test]
    fn test_memory_store_with_initial() {
        let mut initial = HashMap::new();
        initial.insert("key1".to_string(), "value1".to_string());
        let store = MemorySecretStore::with_secrets(initial);
        assert_eq!(store.get("key1"), Some("value1".to_string()));
    }
}
