//! Front-end error types.

use std::fmt;

/// Errors that stop the widget.
#[derive(Debug)]
pub enum WidgetError {
    /// Configuration could not be loaded.
    Config {
        /// Error details.
        details: String,
    },
    /// Reading the terminal input failed.
    Input {
        /// Error details.
        details: String,
    },
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { details } => write!(f, "invalid configuration: {}", details),
            Self::Input { details } => write!(f, "terminal input failed: {}", details),
        }
    }
}

impl std::error::Error for WidgetError {}
