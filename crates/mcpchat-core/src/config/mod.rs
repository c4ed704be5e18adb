//! Client configuration
//!
//! - `ChatConfig`: every tunable of the client, with defaults
//! - `FileConfigProvider`: YAML file loading (user level or explicit path)

mod error;
mod settings;
mod file;

pub use error::{ConfigError, ConfigResult};
pub use settings::{ChatConfig, HistoryMode, ServerConfig};
pub use file::FileConfigProvider;
