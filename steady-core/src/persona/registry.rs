//! Process-wide map of persona sessions
//!
//! The registry is constructed once at startup and handed to request
//! handlers; it is the only holder of session state. Entries are
//! created lazily and never evicted.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use steady_providers::LLMProvider;

use super::history::HistoryStore;
use super::prompts::PromptStore;
use super::session::{ChatParams, Session};

/// Maps persona keys to their sessions, creating on first use
pub struct SessionRegistry {
    // The outer lock serializes the check-create path so two first-time
    // requests for the same persona construct exactly one session; the
    // per-session lock serializes chat execution per persona.
    sessions: Mutex<HashMap<String, Arc<Mutex<Session>>>>,
    prompts: Arc<PromptStore>,
    store: Arc<HistoryStore>,
    provider: Arc<dyn LLMProvider>,
    params: ChatParams,
}

impl SessionRegistry {
    /// Create an empty registry rooted at the workspace
    pub fn new<P: AsRef<Path>>(
        workspace: P,
        provider: Arc<dyn LLMProvider>,
        params: ChatParams,
    ) -> Self {
        let workspace = workspace.as_ref();
        Self {
            sessions: Mutex::new(HashMap::new()),
            prompts: Arc::new(PromptStore::new(workspace)),
            store: Arc::new(HistoryStore::new(workspace)),
            provider,
            params,
        }
    }

    /// Get the session for a persona, constructing it on first use
    pub async fn get(&self, persona: &str) -> Arc<Mutex<Session>> {
        let mut sessions = self.sessions.lock().await;

        if let Some(session) = sessions.get(persona) {
            return session.clone();
        }

        info!("Creating session for persona '{}'", persona);
        let session = Arc::new(Mutex::new(Session::new(
            persona,
            self.prompts.clone(),
            self.store.clone(),
            self.provider.clone(),
            self.params.clone(),
        )));
        sessions.insert(persona.to_string(), session.clone());
        session
    }
}
