//! The display capability injected into the controller.

use crate::message::Message;
use welsh_bot_core::MessageId;

/// Markup of the pending indicator, for views that render markup.
pub const PENDING_MARKUP: &str = r#"<span class="typing-dots">...</span>"#;

/// What a UI must provide to host the chat panel.
///
/// Methods take `&self`; implementations use interior mutability. Panel
/// related hooks default to no-ops for views without a collapsible panel.
pub trait ChatView: Send + Sync {
    /// Appends a message to the panel and scrolls it into view.
    ///
    /// `markup` is the formatted text of `message`.
    fn append_message(&self, message: &Message, markup: &str);

    /// Shows the pending indicator under `id`.
    fn show_pending(&self, id: MessageId);

    /// Removes the pending indicator shown under `id`.
    fn remove_pending(&self, id: MessageId);

    /// Enables or disables the text input and the send button.
    fn set_input_enabled(&self, enabled: bool);

    /// Empties the text input.
    fn clear_input(&self);

    /// Replaces the text input content.
    fn fill_input(&self, _text: &str) {}

    /// Moves keyboard focus to the text input.
    fn focus_input(&self) {}

    /// Shows or hides the chat panel.
    fn set_panel_open(&self, _open: bool) {}

    /// Hides the "new message" badge on the toggle button.
    fn hide_notification(&self) {}
}
