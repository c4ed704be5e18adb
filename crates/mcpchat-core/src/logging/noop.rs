//! Silent logger

use super::traits::Logger;

/// Discards every message
///
/// The default for sessions built in tests, where stderr noise from the
/// loop would only clutter test output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl NoOpLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for NoOpLogger {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
