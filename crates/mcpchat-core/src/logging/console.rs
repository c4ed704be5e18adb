//! Console logger implementation

use super::traits::{LogLevel, Logger};

/// A logger that writes to stderr
///
/// Stdout belongs to the chat transcript, so every level goes to stderr.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    prefix: String,
    min_level: LogLevel,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    /// Create a console logger with the default prefix and level
    pub fn new() -> Self {
        Self {
            prefix: "[mcpchat]".to_string(),
            min_level: LogLevel::default(),
        }
    }

    /// Create a console logger with a custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::new()
        }
    }

    /// Set the minimum level that gets written
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    fn write(&self, level: LogLevel, message: &str) {
        if self.enabled(level) {
            eprintln!("{} {}: {}", self.prefix, level, message);
        }
    }
}

impl Logger for ConsoleLogger {
    fn debug(&self, message: &str) {
        self.write(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.write(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.write(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.write(LogLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_logger_creation() {
        let logger = ConsoleLogger::new();
        assert_eq!(logger.prefix, "[mcpchat]");
        assert_eq!(logger.min_level, LogLevel::Warn);

        let custom = ConsoleLogger::with_prefix("[test]").with_level(LogLevel::Debug);
        assert_eq!(custom.prefix, "[test]");
        assert!(custom.enabled(LogLevel::Debug));
    }

    #[test]
    fn test_level_filter() {
        let logger = ConsoleLogger::new().with_level(LogLevel::Error);
        assert!(!logger.enabled(LogLevel::Warn));
        assert!(logger.enabled(LogLevel::Error));
        logger.info("filtered out");
    }
}
