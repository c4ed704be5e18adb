//! File-based configuration provider (YAML)
//!
//! Reads `~/.config/mcpchat/config.yaml`, or the file named by `MCPCHAT_CONFIG`.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::{ConfigError, ConfigResult};
use super::settings::ChatConfig;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "MCPCHAT_CONFIG";

/// File-based configuration provider
///
/// # Example
///
/// ```no_run
/// use mcpchat_core::config::FileConfigProvider;
///
/// let config = FileConfigProvider::discover().load().unwrap();
/// println!("model: {}", config.model);
/// ```
#[derive(Debug, Clone)]
pub struct FileConfigProvider {
    path: PathBuf,
}

impl FileConfigProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// User-level config provider (~/.config/mcpchat/config.yaml)
    pub fn user() -> Self {
        // XDG config directory (~/.config on Linux, ~/Library/Application Support on macOS)
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join("mcpchat").join("config.yaml"))
    }

    /// `MCPCHAT_CONFIG` if set, otherwise the user-level file
    pub fn discover() -> Self {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::new(path),
            _ => Self::user(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load config from file; a missing file yields the defaults
    pub fn load(&self) -> ConfigResult<ChatConfig> {
        if !self.path.exists() {
            return Ok(ChatConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ChatConfig::default());
        }

        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load, apply environment overrides and validate
    pub fn load_effective(&self) -> ConfigResult<ChatConfig> {
        let mut config = self.load()?;
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }
}
