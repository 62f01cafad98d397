//! Events preview client.

use serde::Deserialize;
use tracing::{debug, instrument};
use welsh_bot_core::Result;
use welsh_bot_reply::{TransportError, check_status};

/// One event as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventPreview {
    /// Event title.
    #[serde(default)]
    pub title: String,
    /// Short description, when the backend has one.
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `GET /api/events/preview`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventsPreview {
    /// Upcoming events.
    #[serde(default)]
    pub events: Vec<EventPreview>,
    /// Human-readable date range of the weekend.
    #[serde(default)]
    pub week_dates: Option<String>,
}

/// HTTP client for the events preview endpoint.
#[derive(Debug, Clone)]
pub struct EventsClient {
    http: reqwest::Client,
    base_url: String,
}

impl EventsClient {
    /// Creates a client for the backend at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Returns the backend base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the weekend events.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the backend is unreachable, answers
    /// with a non-success status or with an unexpected body.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn preview(&self) -> Result<EventsPreview, TransportError> {
        let endpoint = format!("{}/api/events/preview", self.base_url);
        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| TransportError::Request {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;

        let response = check_status(response, &endpoint)?;

        let preview = response
            .json::<EventsPreview>()
            .await
            .map_err(|e| TransportError::Decode {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;

        debug!(count = preview.events.len(), "events preview loaded");
        Ok(preview)
    }
}
