//! A persona's conversational unit
//!
//! A session binds one persona's system prompt and history together,
//! builds the model-ready message sequence, and appends exchanges to
//! the durable history after each successful turn.

use std::sync::Arc;
use tracing::debug;

use steady_providers::{LLMProvider, Message as WireMessage};

use super::history::{HistoryStore, Message, Role};
use super::prompts::PromptStore;
use crate::config::ProviderConfig;

/// Model parameters applied to every chat call
#[derive(Debug, Clone)]
pub struct ChatParams {
    pub model: String,
    pub max_tokens: i32,
    pub temperature: f64,
}

impl From<&ProviderConfig> for ChatParams {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens as i32,
            temperature: config.temperature,
        }
    }
}

/// One persona's prompt, history, and chat operations
pub struct Session {
    persona: String,
    system_prompt: String,
    history: Vec<Message>,
    prompts: Arc<PromptStore>,
    store: Arc<HistoryStore>,
    provider: Arc<dyn LLMProvider>,
    params: ChatParams,
}

impl Session {
    /// Create a session for a persona, loading any persisted history
    pub fn new(
        persona: impl Into<String>,
        prompts: Arc<PromptStore>,
        store: Arc<HistoryStore>,
        provider: Arc<dyn LLMProvider>,
        params: ChatParams,
    ) -> Self {
        let persona = persona.into();
        let system_prompt = prompts.resolve(&persona);
        let history = store.load(&persona);

        Self {
            persona,
            system_prompt,
            history,
            prompts,
            store,
            provider,
            params,
        }
    }

    /// Re-resolve the system prompt for a persona
    ///
    /// Idempotent; called on every request so the active prompt always
    /// matches the persona most recently asked for.
    pub fn switch_prompt(&mut self, persona: &str) {
        self.system_prompt = self.prompts.resolve(persona);
    }

    /// Send a user message and return the model's reply
    pub async fn chat(&mut self, text: &str) -> crate::Result<String> {
        self.exchange(text.to_string()).await
    }

    /// Send a user message with caller-supplied RAG context
    ///
    /// The context is passed through verbatim; no retrieval happens here.
    pub async fn chat_with_context(&mut self, text: &str, context: &str) -> crate::Result<String> {
        let combined = format!("[Context]\n{}\n\n{}", context, text);
        self.exchange(combined).await
    }

    /// Forget this persona's conversation, in memory and on disk
    pub fn clear_history(&mut self) -> crate::Result<()> {
        self.store.clear(&self.persona)?;
        self.history.clear();
        Ok(())
    }

    /// The messages exchanged so far
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// The active system prompt
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Build the full model-ready sequence: system prompt, history, new turn
    fn build_messages(&self, user_text: &str) -> Vec<WireMessage> {
        let mut messages = Vec::with_capacity(self.history.len() + 2);
        messages.push(WireMessage::system(&self.system_prompt));

        for msg in &self.history {
            let message = match msg.role {
                Role::Human => WireMessage::user(&msg.content),
                Role::Assistant => WireMessage::assistant(&msg.content),
            };
            messages.push(message);
        }

        messages.push(WireMessage::user(user_text));
        messages
    }

    /// Run one exchange, appending and persisting on success only
    async fn exchange(&mut self, user_text: String) -> crate::Result<String> {
        let messages = self.build_messages(&user_text);
        debug!(
            "Chat for persona '{}' with {} messages",
            self.persona,
            messages.len()
        );

        let response = self
            .provider
            .chat(
                messages,
                Some(self.params.model.clone()),
                self.params.max_tokens,
                self.params.temperature,
            )
            .await?;

        let reply = response.text().to_string();

        self.history.push(Message::human(user_text));
        self.history.push(Message::assistant(reply.clone()));

        if let Err(e) = self.store.save(&self.persona, &self.history) {
            // Keep memory and disk reconcilable: roll the append back
            self.history.truncate(self.history.len() - 2);
            return Err(e);
        }

        Ok(reply)
    }
}
