//! Logging abstractions for runtime-agnostic logging

mod traits;
mod noop;
mod console;

pub use traits::{Logger, LogLevel, SharedLogger};
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
