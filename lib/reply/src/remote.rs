//! Chat backend client.
//!
//! Talks to the Lille Addict backend: `POST /api/chat` for replies,
//! `DELETE /api/conversations/{id}` to drop a conversation and `GET /health`
//! as a start-up probe. Requests are sent once, without retry and without a
//! timeout.

use crate::config::ReplySourceKind;
use crate::error::TransportError;
use crate::source::{Reply, ReplySource};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use welsh_bot_core::{ConversationId, Result};

/// Text shown when the backend answers without a `response` field.
pub const MISSING_RESPONSE_TEXT: &str = "undefined";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    conversation_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    conversation_id: Option<String>,
}

/// Backend health as reported by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    /// Overall status, `"ok"` when the API is up.
    pub status: String,
    /// Whether the language model behind the API is reachable.
    #[serde(default)]
    pub ollama: Option<bool>,
    /// Whether the tool server behind the API is reachable.
    #[serde(default)]
    pub mcp: Option<bool>,
}

impl HealthStatus {
    /// Returns true if the API reported itself healthy.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// HTTP client for the chat backend.
#[derive(Debug, Clone)]
pub struct RemoteApi {
    http: reqwest::Client,
    base_url: String,
    chat_url: String,
}

impl RemoteApi {
    /// Creates a client for the backend at `base_url` (e.g. `http://localhost:8000`).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates a client reusing an existing `reqwest` client.
    #[must_use]
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let chat_url = format!("{base_url}/api/chat");
        Self {
            http,
            base_url,
            chat_url,
        }
    }

    /// Returns the backend base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the chat endpoint URL.
    #[must_use]
    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }

    /// Queries the backend health endpoint.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the backend is unreachable, answers
    /// with a non-success status or with an unexpected body.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn health(&self) -> Result<HealthStatus, TransportError> {
        let endpoint = format!("{}/health", self.base_url);
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

        let health = response
            .json::<HealthStatus>()
            .await
            .map_err(|e| TransportError::Decode {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;

        debug!(status = %health.status, "backend health");
        Ok(health)
    }
}

/// Passes a success response through; any other status becomes
/// [`TransportError::Status`].
///
/// # Errors
///
/// Returns a [`TransportError::Status`] naming `endpoint` for non-2xx responses.
pub fn check_status(
    response: reqwest::Response,
    endpoint: &str,
) -> Result<reqwest::Response, TransportError> {
    let status = response.status();
    if !status.is_success() {
        return Err(TransportError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        }
        .into());
    }
    Ok(response)
}

#[async_trait]
impl ReplySource for RemoteApi {
    #[instrument(skip(self, message), fields(endpoint = %self.chat_url, has_conversation = conversation_id.is_some()))]
    async fn fetch_reply(
        &self,
        message: &str,
        conversation_id: Option<&ConversationId>,
    ) -> Result<Reply, TransportError> {
        let body = ChatRequest {
            message,
            conversation_id: conversation_id.map(ConversationId::as_str),
        };

        let response = self
            .http
            .post(&self.chat_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::Request {
                endpoint: self.chat_url.clone(),
                reason: e.to_string(),
            })?;

        let response = check_status(response, &self.chat_url)?;

        let data = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| TransportError::Decode {
                endpoint: self.chat_url.clone(),
                reason: e.to_string(),
            })?;

        let text = match data.response {
            Some(text) => text,
            None => {
                warn!("chat response has no `response` field");
                MISSING_RESPONSE_TEXT.to_string()
            }
        };
        let conversation_id = data.conversation_id.and_then(ConversationId::new);

        debug!(
            reply_len = text.len(),
            conversation_id = conversation_id.as_ref().map(ConversationId::as_str),
            "chat reply received"
        );

        Ok(Reply::text(text).with_conversation_id(conversation_id))
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn end_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<(), TransportError> {
        let endpoint = format!("{}/api/conversations/{}", self.base_url, conversation_id);
        let response = self
            .http
            .delete(&endpoint)
            .send()
            .await
            .map_err(|e| TransportError::Request {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;

        check_status(response, &endpoint)?;
        debug!(%conversation_id, "conversation ended on backend");
        Ok(())
    }

    fn kind(&self) -> ReplySourceKind {
        ReplySourceKind::Remote
    }

    fn backend_location(&self) -> Option<&str> {
        Some(&self.base_url)
    }
}
