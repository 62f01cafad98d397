//! Events preview for the Welsh BOT landing page.
//!
//! Fetches the weekend events from the backend and turns them into article
//! cards. Clicking a card asks the bot about the event.

pub mod card;
pub mod client;

pub use card::{ArticleCard, EventsPanel, event_emoji};
pub use client::{EventPreview, EventsClient, EventsPreview};
