//! Follow-up chat session opened after the recommendations arrive.

use crate::advisor::prompts;
use crate::core::error::AdvisorError;
use crate::providers::{GenerationOptions, LLMProvider, Turn};
use std::sync::Arc;

/// A stateful conversation with the advice service.
///
/// History is kept locally and replayed on every turn. A turn that fails
/// leaves the history untouched so the next message starts clean.
pub struct ChatSession {
    provider: Arc<dyn LLMProvider>,
    options: GenerationOptions,
    history: Vec<Turn>,
}

impl ChatSession {
    pub fn new(provider: Arc<dyn LLMProvider>, temperature: f32) -> Self {
        Self {
            provider,
            options: GenerationOptions {
                system_instruction: prompts::SYSTEM_INSTRUCTION.to_string(),
                temperature,
                response_schema: None,
            },
            history: Vec::new(),
        }
    }

    pub async fn send(&mut self, text: &str) -> Result<String, AdvisorError> {
        let mut turns = self.history.clone();
        turns.push(Turn::user(text));

        let reply = self
            .provider
            .generate_content(&turns, &self.options)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "follow-up turn failed");
                AdvisorError::FollowUp(e.to_string())
            })?;

        turns.push(Turn::model(reply.trim()));
        self.history = turns;
        Ok(reply.trim().to_string())
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }
}
