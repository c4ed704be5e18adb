//! Core types for the conversation loop
//!
//! This module contains the shared types used by the model provider,
//! the tool catalog and the loop itself.

mod message;
mod tool;

pub use message::{ChatMessage, ContentBlock, MessageRole, ToolResultContent};
pub use tool::{Tool, ToolCall, ToolResult};
