use crate::core::error::AdvisorError;
use async_trait::async_trait;
use serde_json::Value;

pub mod base_client;
pub mod gemini;

/// Speaker of a single turn sent to the advice service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Per-request generation options
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub system_instruction: String,
    pub temperature: f32,
    /// When set, the reply is constrained to JSON matching this schema
    pub response_schema: Option<Value>,
}

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Sends the conversation so far and returns the text of the first candidate.
    async fn generate_content(
        &self,
        turns: &[Turn],
        options: &GenerationOptions,
    ) -> Result<String, AdvisorError>;

    fn model(&self) -> &str;
}

/// Strips an optional markdown code fence around a model reply.
///
/// Structured replies are supposed to be bare JSON, but models occasionally
/// wrap them in ```json fences anyway.
pub fn strip_code_fence(content: &str) -> &str {
    let content = content.trim();
    let Some(rest) = content.strip_prefix("```") else {
        return content;
    };

    // Drop the language tag on the opening fence line
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };

    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}
