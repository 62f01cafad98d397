//! Conversation state owned by the controller.

use welsh_bot_core::ConversationId;

/// Snapshot of the controller's conversation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationState {
    /// Server-issued conversation token; `None` until the first reply carries one.
    pub conversation_id: Option<ConversationId>,
    /// True while a send is in flight. No other send starts meanwhile.
    pub is_waiting: bool,
}

impl ConversationState {
    /// Returns true if a new send would be accepted.
    #[must_use]
    pub fn can_send(&self) -> bool {
        !self.is_waiting
    }
}
