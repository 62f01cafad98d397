//! Conversation layer of the Welsh BOT chat widget.
//!
//! This crate provides:
//!
//! - **Conversation Controller**: the send/reply round trip and its state
//! - **Chat View**: the capability a UI implements to display the panel
//! - **Chat Widget**: panel toggling and the `ask_bot` entry point

pub mod controller;
pub mod message;
pub mod state;
pub mod view;
pub mod widget;

#[cfg(test)]
mod testing;

pub use controller::{ConversationController, apology_text};
pub use message::{Message, Sender};
pub use state::ConversationState;
pub use view::{ChatView, PENDING_MARKUP};
pub use widget::{ChatWidget, DEFAULT_ASK_DELAY};
