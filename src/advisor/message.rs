//! Conversation log shown to the student.

use crate::advisor::recommendation::RecommendationResult;
use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    Text(String),
    Recommendation(RecommendationResult),
    Error(String),
    /// Placeholder shown while a request is in flight
    Pending(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub speaker: Speaker,
    pub content: MessageContent,
    pub created_at: DateTime<Local>,
}

impl Message {
    pub fn new(speaker: Speaker, content: MessageContent) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            speaker,
            content,
            created_at: Local::now(),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.content, MessageContent::Pending(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self.content, MessageContent::Error(_))
    }
}

/// Append-only list of messages in the order they were produced.
///
/// The one exception is the pending placeholder, which is swapped for the
/// real result once the request it stands for completes.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, speaker: Speaker, content: MessageContent) -> &Message {
        self.messages.push(Message::new(speaker, content));
        &self.messages[self.messages.len() - 1]
    }

    /// Replaces the trailing pending placeholder with `content`.
    ///
    /// Appends instead when the last message is not a placeholder, so the
    /// result is never lost.
    pub fn resolve_pending(&mut self, content: MessageContent) -> &Message {
        if self.messages.last().is_some_and(Message::is_pending) {
            self.messages.pop();
        } else {
            tracing::warn!("no pending placeholder to resolve, appending instead");
        }
        self.push(Speaker::Model, content)
    }

    pub fn has_pending(&self) -> bool {
        self.messages.iter().any(Message::is_pending)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages added after the first `seen` entries.
    pub fn since(&self, seen: usize) -> &[Message] {
        &self.messages[seen.min(self.messages.len())..]
    }
}
