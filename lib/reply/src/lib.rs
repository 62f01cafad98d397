//! Reply sources for the Welsh BOT widget.
//!
//! A [`ReplySource`] produces the bot's answer to one user message. Two
//! implementations exist:
//!
//! - **RemoteApi**: one `POST /api/chat` exchange with the chat backend
//! - **LocalKeywordTable**: canned replies picked by substring match, served
//!   after an artificial delay
//!
//! [`ReplySourceConfig`] selects and builds one of them.

pub mod config;
pub mod error;
pub mod local;
pub mod remote;
pub mod source;

pub use config::{ReplySourceConfig, ReplySourceKind};
pub use error::TransportError;
pub use local::{LocalKeywordTable, ReplyRule};
pub use remote::{HealthStatus, RemoteApi, check_status};
pub use source::{Reply, ReplySource};
