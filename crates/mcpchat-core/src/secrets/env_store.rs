//! Environment variable secret store

use std::collections::HashMap;
use std::env;

use once_cell::sync::Lazy;

use super::traits::SecretStore;

/// Mapping from provider names to environment variable names
static ENV_VAR_MAP: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("anthropic", vec!["ANTHROPIC_API_KEY"]);
    m.insert("openai", vec!["OPENAI_API_KEY"]);
    m.insert("gemini", vec!["GEMINI_API_KEY", "GOOGLE_API_KEY"]);
    m.insert("google", vec!["GEMINI_API_KEY", "GOOGLE_API_KEY"]);
    m.insert("groq", vec!["GROQ_API_KEY"]);
    m.insert("deepseek", vec!["DEEPSEEK_API_KEY"]);
    m.insert("xai", vec!["XAI_API_KEY"]);
    m.insert("ollama", vec![]); // Ollama doesn't need an API key
    m
});

/// Provider names that can be used without a credential
pub fn requires_api_key(provider: &str) -> bool {
    !matches!(provider.to_lowercase().as_str(), "ollama")
}

/// Secret store that reads from environment variables
///
/// Read-only. Provider names map to their conventional variables:
/// - `anthropic` → `ANTHROPIC_API_KEY`
/// - `openai` → `OPENAI_API_KEY`
/// - `gemini` → `GEMINI_API_KEY` or `GOOGLE_API_KEY`
///
/// Unmapped names fall back to `<NAME>_API_KEY`, and full variable names
/// are accepted as-is.
#[derive(Debug, Default)]
pub struct EnvSecretStore {
    _private: (),
}

impl EnvSecretStore {
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Environment variable names consulted for a key, in lookup order
    pub fn candidate_vars(key: &str) -> Vec<String> {
        let mut vars = vec![key.to_string()];
        if let Some(mapped) = ENV_VAR_MAP.get(key.to_lowercase().as_str()) {
            vars.extend(mapped.iter().map(|v| v.to_string()));
        }
        vars.push(format!("{}_API_KEY", key.to_uppercase().replace('-', "_")));
        vars.dedup();
        vars
    }

    /// The variable a user should set for a provider
    pub fn primary_var(provider: &str) -> String {
        ENV_VAR_MAP
            .get(provider.to_lowercase().as_str())
            .and_then(|vars| vars.first())
            .map(|v| v.to_string())
            .unwrap_or_else(|| format!("{}_API_KEY", provider.to_uppercase().replace('-', "_")))
    }
}

impl SecretStore for EnvSecretStore {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, key: &str) -> Option<String> {
        Self::candidate_vars(key)
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find(|value| !value.is_empty())
    }
}
