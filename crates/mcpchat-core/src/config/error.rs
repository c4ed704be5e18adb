//! Configuration errors

/// Errors that can occur while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid value for {field}: {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
