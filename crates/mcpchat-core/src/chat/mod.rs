//! The conversation loop
//!
//! A query starts a [`Conversation`], and [`Session::answer_query`] drives
//! [`execute_turn`] until the model stops asking for tools. Each turn is one
//! model call plus the tool calls it requested, run one at a time in the
//! order the model emitted them.
//!
//! ```text
//!  AwaitingModel ──model call──▶ HaveToolCalls ──results appended──┐
//!        ▲                           │                             │
//!        └───────────────────────────┼─────────────────────────────┘
//!                                    └─ no tool calls ─▶ Done
//! ```

mod error;
mod conversation;
mod turn;
mod session;

pub use error::{ChatError, ChatResult};
pub use conversation::Conversation;
pub use turn::{execute_turn, TurnContext, TurnOutcome};
pub use session::{resolve_api_key, LoopState, Session};
