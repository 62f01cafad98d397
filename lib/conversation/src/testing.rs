//! Test doubles: a recording view and scripted reply sources.

use crate::message::{Message, Sender};
use crate::view::ChatView;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use welsh_bot_core::{ConversationId, MessageId, Result};
use welsh_bot_reply::{Reply, ReplySource, ReplySourceKind, TransportError};

/// Something the controller did to the view or the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Append {
        sender: Sender,
        text: String,
        markup: String,
    },
    ShowPending(MessageId),
    RemovePending(MessageId),
    InputEnabled(bool),
    ClearInput,
    FillInput(String),
    FocusInput,
    PanelOpen(bool),
    HideNotification,
    SourceCalled {
        message: String,
        conversation_id: Option<String>,
    },
    ConversationEnded(String),
}

/// Shared, ordered record of events.
#[derive(Debug, Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<Event>>>);

impl EventLog {
    pub fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn appended(&self) -> Vec<(Sender, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Append { sender, text, .. } => Some((sender, text)),
                _ => None,
            })
            .collect()
    }

    pub fn markups(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Append { markup, .. } => Some(markup),
                _ => None,
            })
            .collect()
    }

    pub fn source_calls(&self) -> Vec<(String, Option<String>)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::SourceCalled {
                    message,
                    conversation_id,
                } => Some((message, conversation_id)),
                _ => None,
            })
            .collect()
    }

    pub fn ended(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::ConversationEnded(id) => Some(id),
                _ => None,
            })
            .collect()
    }
}

/// View that records every call.
pub struct RecordingView {
    log: EventLog,
}

impl RecordingView {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

impl ChatView for RecordingView {
    fn append_message(&self, message: &Message, markup: &str) {
        self.log.push(Event::Append {
            sender: message.sender,
            text: message.text.clone(),
            markup: markup.to_string(),
        });
    }

    fn show_pending(&self, id: MessageId) {
        self.log.push(Event::ShowPending(id));
    }

    fn remove_pending(&self, id: MessageId) {
        self.log.push(Event::RemovePending(id));
    }

    fn set_input_enabled(&self, enabled: bool) {
        self.log.push(Event::InputEnabled(enabled));
    }

    fn clear_input(&self) {
        self.log.push(Event::ClearInput);
    }

    fn fill_input(&self, text: &str) {
        self.log.push(Event::FillInput(text.to_string()));
    }

    fn focus_input(&self) {
        self.log.push(Event::FocusInput);
    }

    fn set_panel_open(&self, open: bool) {
        self.log.push(Event::PanelOpen(open));
    }

    fn hide_notification(&self) {
        self.log.push(Event::HideNotification);
    }
}

/// Source answering every message with the same reply.
pub struct StubSource {
    log: EventLog,
    reply: String,
    conversation_id: Option<String>,
}

impl StubSource {
    pub fn new(log: EventLog, reply: &str, conversation_id: Option<&str>) -> Self {
        Self {
            log,
            reply: reply.to_string(),
            conversation_id: conversation_id.map(str::to_string),
        }
    }
}

#[async_trait]
impl ReplySource for StubSource {
    async fn fetch_reply(
        &self,
        message: &str,
        conversation_id: Option<&ConversationId>,
    ) -> Result<Reply, TransportError> {
        self.log.push(Event::SourceCalled {
            message: message.to_string(),
            conversation_id: conversation_id.map(|id| id.as_str().to_string()),
        });
        Ok(Reply::text(self.reply.clone())
            .with_conversation_id(self.conversation_id.clone().and_then(ConversationId::new)))
    }

    async fn end_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<(), TransportError> {
        self.log
            .push(Event::ConversationEnded(conversation_id.as_str().to_string()));
        Ok(())
    }

    fn kind(&self) -> ReplySourceKind {
        ReplySourceKind::Local
    }
}

/// Source that holds its reply until the gate is opened.
pub struct GatedSource {
    gate: Arc<Notify>,
    reply: String,
}

impl GatedSource {
    pub fn new(reply: &str) -> Self {
        Self {
            gate: Arc::new(Notify::new()),
            reply: reply.to_string(),
        }
    }

    pub fn gate(&self) -> Arc<Notify> {
        Arc::clone(&self.gate)
    }
}

#[async_trait]
impl ReplySource for GatedSource {
    async fn fetch_reply(
        &self,
        _message: &str,
        _conversation_id: Option<&ConversationId>,
    ) -> Result<Reply, TransportError> {
        self.gate.notified().await;
        Ok(Reply::text(self.reply.clone()))
    }

    fn kind(&self) -> ReplySourceKind {
        ReplySourceKind::Local
    }
}

/// Source whose backend always answers HTTP 500.
pub struct FailingSource {
    base_url: String,
}

impl FailingSource {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }
}

#[async_trait]
impl ReplySource for FailingSource {
    async fn fetch_reply(
        &self,
        _message: &str,
        _conversation_id: Option<&ConversationId>,
    ) -> Result<Reply, TransportError> {
        Err(TransportError::Status {
            endpoint: format!("{}/api/chat", self.base_url),
            status: 500,
        }
        .into())
    }

    fn kind(&self) -> ReplySourceKind {
        ReplySourceKind::Remote
    }

    fn backend_location(&self) -> Option<&str> {
        Some(&self.base_url)
    }
}
