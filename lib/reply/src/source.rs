//! The reply source abstraction.

use crate::config::ReplySourceKind;
use crate::error::TransportError;
use async_trait::async_trait;
use welsh_bot_core::{ConversationId, Result};

/// The bot's answer to one user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Reply text, still unformatted.
    pub text: String,
    /// Conversation token to use on the next turn, if the source issued one.
    pub conversation_id: Option<ConversationId>,
}

impl Reply {
    /// Creates a reply that carries no conversation token.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            conversation_id: None,
        }
    }

    /// Attaches a conversation token.
    #[must_use]
    pub fn with_conversation_id(mut self, conversation_id: Option<ConversationId>) -> Self {
        self.conversation_id = conversation_id;
        self
    }
}

/// Trait for anything able to answer a chat message.
#[async_trait]
pub trait ReplySource: Send + Sync {
    /// Produces the reply to `message`.
    ///
    /// `conversation_id` is `None` on the first turn of a conversation.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when a remote exchange fails. Local
    /// sources never fail.
    async fn fetch_reply(
        &self,
        message: &str,
        conversation_id: Option<&ConversationId>,
    ) -> Result<Reply, TransportError>;

    /// Tells the source a conversation is over.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the remote exchange fails.
    async fn end_conversation(
        &self,
        _conversation_id: &ConversationId,
    ) -> Result<(), TransportError> {
        Ok(())
    }

    /// Returns which variant this is.
    fn kind(&self) -> ReplySourceKind;

    /// Returns the backend location users should check when replies fail.
    fn backend_location(&self) -> Option<&str> {
        None
    }
}
