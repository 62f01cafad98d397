//! Message formatting for the Welsh BOT widget.
//!
//! Turns the raw text of a chat message into display-ready markup:
//! explicit line breaks, `**bold**` spans and simple `-`/`•` lists.

pub mod escape;
pub mod markup;

pub use escape::escape_html;
pub use markup::{MarkupPolicy, format_message, format_with_policy};
