//! Persona-scoped conversation sessions
//!
//! A persona is a named system prompt paired with its own durable
//! conversation history. This module resolves prompts, accumulates and
//! persists history, and drives chat exchanges against the LLM provider.

pub mod history;
pub mod prompts;
pub mod registry;
pub mod relapse;
pub mod session;

pub use history::{HistoryStore, Message, Role};
pub use prompts::{PromptStore, DEFAULT_PROMPT};
pub use registry::SessionRegistry;
pub use relapse::{process_response, RELAPSE_MARKER};
pub use session::{ChatParams, Session};

/// Make a persona key safe for use as a file name
pub(crate) fn safe_key(key: &str) -> String {
    key.replace([':', '/', '\\'], "_")
}
