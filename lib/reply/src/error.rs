//! Error types for the reply crate.
//!
//! Every failure of the remote exchange is a [`TransportError`]. The
//! variants exist for diagnostics only; callers show the same apology for
//! all of them.

use std::fmt;

/// Failure of an HTTP exchange with the chat backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request could not be sent or no response arrived.
    Request {
        /// URL the request was sent to.
        endpoint: String,
        /// Error details.
        reason: String,
    },
    /// The backend answered with a non-success status.
    Status {
        /// URL the request was sent to.
        endpoint: String,
        /// HTTP status code.
        status: u16,
    },
    /// The response body was not the expected JSON.
    Decode {
        /// URL the request was sent to.
        endpoint: String,
        /// Error details.
        reason: String,
    },
}

impl TransportError {
    /// Returns the URL of the failed exchange.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        match self {
            Self::Request { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Decode { endpoint, .. } => endpoint,
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request { endpoint, reason } => {
                write!(f, "request to {endpoint} failed: {reason}")
            }
            Self::Status { endpoint, status } => {
                write!(f, "{endpoint} answered with HTTP {status}")
            }
            Self::Decode { endpoint, reason } => {
                write!(f, "unexpected response body from {endpoint}: {reason}")
            }
        }
    }
}

impl std::error::Error for TransportError {}
