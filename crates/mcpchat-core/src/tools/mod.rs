//! Tool catalog module
//!
//! Fetches the tool provider's listing once per session and exposes it to
//! the model unfiltered.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  ToolCatalog                                │
//! │                                             │
//! │  - Fetches tools via MCP tools/list         │
//! │  - Maps MCP tools to model tools            │
//! │  - Resolves tool-use names                  │
//! │  - Maps call results to tool results        │
//! └─────────────────────────────────────────────┘
//!           │
//!           │ MCP (tools/list, tools/call)
//!           ▼
//! ┌─────────────────────────────────────────────┐
//! │  Tool server (e.g. @playwright/mcp)         │
//! └─────────────────────────────────────────────┘
//! ```

mod catalog;

pub use catalog::ToolCatalog;
