//! Persona prompt resolution
//!
//! Prompts are markdown files named after their persona, one per file
//! under the workspace prompts directory. A persona without a prompt
//! file gets the default prompt; that is normal operation, not an error.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Fallback system prompt for personas without a prompt file
pub const DEFAULT_PROMPT: &str = "You are a concise, helpful AI assistant.";

/// Resolves persona names to system-prompt text
#[derive(Debug)]
pub struct PromptStore {
    prompts_dir: PathBuf,
}

impl PromptStore {
    /// Create a new prompt store rooted at the workspace
    pub fn new<P: AsRef<Path>>(workspace: P) -> Self {
        Self {
            prompts_dir: workspace.as_ref().join("prompts"),
        }
    }

    /// Resolve a persona name to its system prompt, falling back to the default
    pub fn resolve(&self, persona: &str) -> String {
        let path = self.prompt_path(persona);
        match fs::read_to_string(&path) {
            Ok(content) if !content.trim().is_empty() => content.trim().to_string(),
            _ => {
                debug!("No prompt file for persona '{}', using default", persona);
                DEFAULT_PROMPT.to_string()
            }
        }
    }

    /// Get the file path for a persona's prompt
    fn prompt_path(&self, persona: &str) -> PathBuf {
        self.prompts_dir
            .join(format!("{}.md", super::safe_key(persona)))
    }
}
