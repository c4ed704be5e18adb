//! `.env` file secret store

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::env_store::EnvSecretStore;
use super::traits::{SecretStore, SecretStoreError, SecretStoreResult};

/// Read-only view over a `.env` file
///
/// Lines are `KEY=value`; blank lines and `#` comments are skipped, an
/// optional `export ` prefix is accepted and matching quotes are stripped.
/// Lookups use the same provider-name mapping as `EnvSecretStore`.
#[derive(Debug, Default, Clone)]
pub struct DotenvSecretStore {
    path: Option<PathBuf>,
    values: HashMap<String, String>,
}

impl DotenvSecretStore {
    /// Load a `.env` file; a missing file gives an empty store
    pub fn load(path: impl AsRef<Path>) -> SecretStoreResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self {
                path: Some(path.to_path_buf()),
                values: HashMap::new(),
            });
        }

        let content = fs::read_to_string(path)?;
        let values = Self::parse(&content).map_err(|line| SecretStoreError::Malformed {
            path: path.display().to_string(),
            line,
        })?;

        Ok(Self {
            path: Some(path.to_path_buf()),
            values,
        })
    }

    /// `.env` in the current directory
    pub fn current_dir() -> SecretStoreResult<Self> {
        Self::load(".env")
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse file content; the error is the 1-based number of the bad line
    fn parse(content: &str) -> Result<HashMap<String, String>, usize> {
        let mut values = HashMap::new();
        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=').ok_or(index + 1)?;
            let key = key.trim();
            if key.is_empty() {
                return Err(index + 1);
            }
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            values.insert(key.to_string(), value.to_string());
        }
        Ok(values)
    }
}

impl SecretStore for DotenvSecretStore {
    fn name(&self) -> &str {
        "dotenv"
    }

    fn get(&self, key: &str) -> Option<String> {
        EnvSecretStore::candidate_vars(key)
            .iter()
            .filter_map(|var| self.values.get(var))
            .find(|value| !value.is_empty())
            .cloned()
    }
}
