//! Reply source selection.
//!
//! The widget picks its reply source from configuration rather than
//! shipping one build per variant.

use crate::local::LocalKeywordTable;
use crate::remote::RemoteApi;
use crate::source::ReplySource;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Available reply sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySourceKind {
    /// The chat backend over HTTP.
    #[default]
    Remote,
    /// The built-in keyword table.
    Local,
}

impl fmt::Display for ReplySourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => f.write_str("remote"),
            Self::Local => f.write_str("local"),
        }
    }
}

/// Reply source configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplySourceConfig {
    /// Which source answers messages.
    #[serde(default)]
    pub kind: ReplySourceKind,

    /// Backend base URL, used by the remote source.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Artificial reply delay in milliseconds, used by the local source.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_delay_ms() -> u64 {
    800
}

impl Default for ReplySourceConfig {
    fn default() -> Self {
        Self {
            kind: ReplySourceKind::default(),
            base_url: default_base_url(),
            delay_ms: default_delay_ms(),
        }
    }
}

impl ReplySourceConfig {
    /// Builds the configured reply source.
    #[must_use]
    pub fn build(&self) -> Arc<dyn ReplySource> {
        match self.kind {
            ReplySourceKind::Remote => Arc::new(RemoteApi::new(self.base_url.clone())),
            ReplySourceKind::Local => Arc::new(
                LocalKeywordTable::lille().with_delay(Duration::from_millis(self.delay_ms)),
            ),
        }
    }
}
