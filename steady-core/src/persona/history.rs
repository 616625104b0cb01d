//! Durable, persona-scoped conversation history
//!
//! Each persona gets one JSON file holding the ordered list of
//! `{role, content}` pairs. Saves overwrite the whole snapshot; a
//! missing or unreadable file reads as an empty history.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Human,
    Assistant,
}

/// A single conversation turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a human message
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Persists conversation history, one file per persona
#[derive(Debug)]
pub struct HistoryStore {
    histories_dir: PathBuf,
}

impl HistoryStore {
    /// Create a new history store rooted at the workspace
    pub fn new<P: AsRef<Path>>(workspace: P) -> Self {
        Self {
            histories_dir: workspace.as_ref().join("histories"),
        }
    }

    /// Load the persisted history for a persona
    ///
    /// A missing or corrupt record is treated as an empty history.
    pub fn load(&self, key: &str) -> Vec<Message> {
        let path = self.history_path(key);
        if !path.exists() {
            return Vec::new();
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read history for '{}': {}", key, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Message>>(&content) {
            Ok(messages) => messages,
            Err(e) => {
                warn!("Corrupt history record for '{}': {}", key, e);
                Vec::new()
            }
        }
    }

    /// Overwrite the persisted history for a persona with a full snapshot
    pub fn save(&self, key: &str, messages: &[Message]) -> crate::Result<()> {
        std::fs::create_dir_all(&self.histories_dir)?;
        let path = self.history_path(key);
        let content = serde_json::to_string(messages)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Remove the persisted history for a persona, if any
    pub fn clear(&self, key: &str) -> crate::Result<()> {
        let path = self.history_path(key);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }

    /// Get the file path for a persona's history
    fn history_path(&self, key: &str) -> PathBuf {
        self.histories_dir
            .join(format!("{}.json", super::safe_key(key)))
    }
}
