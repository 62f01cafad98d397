//! Chat panel state and the `ask_bot` entry point.

use crate::controller::ConversationController;
use crate::view::ChatView;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::debug;

/// Pause between opening the panel and sending an `ask_bot` message.
pub const DEFAULT_ASK_DELAY: Duration = Duration::from_millis(500);

/// The chat widget: a collapsible panel around a conversation.
pub struct ChatWidget<V> {
    controller: Arc<ConversationController<V>>,
    open: AtomicBool,
    ask_delay: Duration,
}

impl<V: ChatView> ChatWidget<V> {
    /// Creates a closed widget.
    #[must_use]
    pub fn new(controller: Arc<ConversationController<V>>) -> Self {
        Self {
            controller,
            open: AtomicBool::new(false),
            ask_delay: DEFAULT_ASK_DELAY,
        }
    }

    /// Sets the pause used by [`ask_bot`](Self::ask_bot).
    #[must_use]
    pub fn with_ask_delay(mut self, ask_delay: Duration) -> Self {
        self.ask_delay = ask_delay;
        self
    }

    /// Returns the conversation controller.
    #[must_use]
    pub fn controller(&self) -> &Arc<ConversationController<V>> {
        &self.controller
    }

    /// Returns true if the panel is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Shows the panel, hides the notification badge and focuses the input.
    pub fn open(&self) {
        self.open.store(true, Ordering::Release);
        let view = self.controller.view();
        view.set_panel_open(true);
        view.hide_notification();
        view.focus_input();
    }

    /// Hides the panel. Any pending reply keeps running.
    pub fn close(&self) {
        self.open.store(false, Ordering::Release);
        self.controller.view().set_panel_open(false);
    }

    /// Opens a closed panel, closes an open one.
    pub fn toggle(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Opens the panel, puts `message` in the input and sends it after a
    /// short pause.
    ///
    /// Used by page elements (event cards, the search bar) to start a
    /// conversation on the user's behalf.
    pub async fn ask_bot(&self, message: &str) {
        self.open();
        self.controller.view().fill_input(message);
        debug!(delay = ?self.ask_delay, "asking bot");
        tokio::time::sleep(self.ask_delay).await;
        self.controller.send(message).await;
    }
}
