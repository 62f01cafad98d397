//! Welsh BOT terminal front end.
//!
//! Hosts the chat widget in a terminal: the panel is the scrollback, the
//! input is stdin, and page elements (event cards, the search bar) are
//! reached through slash commands.

pub mod app;
pub mod command;
pub mod config;
pub mod error;
pub mod terminal;
