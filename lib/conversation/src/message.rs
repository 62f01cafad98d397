//! Message types for the chat panel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use welsh_bot_core::MessageId;
use welsh_bot_format::{MarkupPolicy, format_with_policy};

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person using the widget.
    User,
    /// Welsh BOT.
    Bot,
}

/// A message shown in the chat panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier.
    pub id: MessageId,
    /// Who wrote it.
    pub sender: Sender,
    /// Raw, unformatted text.
    pub text: String,
    /// When the message was created.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Creates a new message.
    #[must_use]
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            sender,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    /// Creates a bot message.
    #[must_use]
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }

    /// Returns the display markup for this message.
    #[must_use]
    pub fn markup(&self, policy: MarkupPolicy) -> String {
        format_with_policy(&self.text, policy)
    }
}
