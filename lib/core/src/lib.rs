//! Core types shared by the Welsh BOT widget crates.
//!
//! This crate provides the identifier types exchanged between the
//! conversation controller, the reply sources and the views, plus the
//! rootcause-based `Result` alias.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{ConversationId, MessageId, ParseIdError};
