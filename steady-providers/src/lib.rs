//! LLM provider integrations for steady
//!
//! This crate provides the provider abstraction and an OpenAI-compatible
//! chat-completions client.

pub mod base;
pub mod openai;

pub use base::{LLMProvider, LLMResponse, Message, ProviderError, ProviderResult};
pub use openai::OpenAiClient;
