//! The send/reply round trip.
//!
//! One call to [`ConversationController::send`] runs a whole turn: the user
//! message is shown, a pending indicator stands in for the bot while the
//! reply source works, then the indicator makes way for the reply (or for an
//! apology when the source failed). Only one turn runs at a time; a send
//! issued while another is in flight is dropped.

use crate::message::Message;
use crate::state::ConversationState;
use crate::view::ChatView;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use welsh_bot_core::MessageId;
use welsh_bot_format::MarkupPolicy;
use welsh_bot_reply::ReplySource;

/// Builds the apology shown when a reply could not be obtained.
#[must_use]
pub fn apology_text(backend_location: Option<&str>) -> String {
    match backend_location {
        Some(location) => format!(
            "😞 Désolé, une erreur est survenue. Vérifie que le backend est démarré ({location})."
        ),
        None => "😞 Désolé, une erreur est survenue.".to_string(),
    }
}

#[derive(Debug, Default)]
struct Inner {
    conversation: ConversationState,
    transcript: Vec<Message>,
}

/// Drives conversations between a [`ChatView`] and a [`ReplySource`].
pub struct ConversationController<V> {
    source: Arc<dyn ReplySource>,
    view: V,
    markup: MarkupPolicy,
    inner: Mutex<Inner>,
}

impl<V: ChatView> ConversationController<V> {
    /// Creates a controller with an empty conversation.
    #[must_use]
    pub fn new(source: Arc<dyn ReplySource>, view: V) -> Self {
        Self {
            source,
            view,
            markup: MarkupPolicy::default(),
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Sets how message text is turned into markup.
    #[must_use]
    pub fn with_markup_policy(mut self, markup: MarkupPolicy) -> Self {
        self.markup = markup;
        self
    }

    /// Returns the view.
    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Returns the reply source.
    #[must_use]
    pub fn source(&self) -> &Arc<dyn ReplySource> {
        &self.source
    }

    /// Returns a snapshot of the conversation state.
    pub async fn state(&self) -> ConversationState {
        self.inner.lock().await.conversation.clone()
    }

    /// Returns every message shown so far, oldest first.
    pub async fn transcript(&self) -> Vec<Message> {
        self.inner.lock().await.transcript.clone()
    }

    /// Runs one turn for `raw_input`.
    ///
    /// Blank input, or input arriving while a reply is pending, is ignored.
    /// Reply failures are logged and shown as an apology; this never fails.
    pub async fn send(&self, raw_input: &str) {
        let message = raw_input.trim();
        if message.is_empty() {
            return;
        }

        let conversation_id = {
            let mut inner = self.inner.lock().await;
            if inner.conversation.is_waiting {
                debug!("reply pending, send ignored");
                return;
            }
            inner.conversation.is_waiting = true;
            inner.conversation.conversation_id.clone()
        };

        self.view.clear_input();
        self.view.set_input_enabled(false);
        self.append(Message::user(message)).await;

        let pending = MessageId::new();
        self.view.show_pending(pending);

        let result = self
            .source
            .fetch_reply(message, conversation_id.as_ref())
            .await;

        self.view.remove_pending(pending);

        let (reply, issued_id) = match result {
            Ok(reply) => (Message::bot(reply.text), reply.conversation_id),
            Err(report) => {
                error!(
                    source = %self.source.kind(),
                    error = %report,
                    "failed to obtain chat reply"
                );
                (
                    Message::bot(apology_text(self.source.backend_location())),
                    None,
                )
            }
        };
        self.append(reply).await;

        {
            let mut inner = self.inner.lock().await;
            if let Some(id) = issued_id {
                inner.conversation.conversation_id = Some(id);
            }
            inner.conversation.is_waiting = false;
        }

        self.view.set_input_enabled(true);
        self.view.focus_input();
    }

    /// Starts a fresh conversation.
    ///
    /// The source is told the previous conversation is over; a failure to do
    /// so is only logged. Returns false, doing nothing, while a reply is
    /// pending.
    pub async fn reset(&self) -> bool {
        let previous = {
            let mut inner = self.inner.lock().await;
            if inner.conversation.is_waiting {
                return false;
            }
            inner.conversation.conversation_id.take()
        };

        if let Some(id) = previous {
            match self.source.end_conversation(&id).await {
                Ok(()) => info!(conversation_id = %id, "conversation reset"),
                Err(report) => {
                    warn!(conversation_id = %id, error = %report, "failed to end conversation");
                }
            }
        }
        true
    }

    async fn append(&self, message: Message) {
        let markup = message.markup(self.markup);
        self.view.append_message(&message, &markup);
        self.inner.lock().await.transcript.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Sender;
    use crate::testing::{Event, EventLog, FailingSource, GatedSource, RecordingView, StubSource};
    use welsh_bot_core::ConversationId;
    use welsh_bot_reply::LocalKeywordTable;

    fn controller(
        source: Arc<dyn ReplySource>,
        log: &EventLog,
    ) -> ConversationController<RecordingView> {
        ConversationController::new(source, RecordingView::new(log.clone()))
    }

    #[tokio::test]
    async fn turn_appends_user_then_bot_message() {
        let log = EventLog::default();
        let source = Arc::new(StubSource::new(log.clone(), "Salut **toi**", Some("conv-1")));
        let controller = controller(source, &log);

        controller.send("  bonjour  ").await;

        let appended = log.appended();
        assert_eq!(appended.len(), 2);
        assert_eq!(appended[0], (Sender::User, "bonjour".to_string()));
        assert_eq!(appended[1], (Sender::Bot, "Salut **toi**".to_string()));

        let state = controller.state().await;
        assert!(!state.is_waiting);
        assert_eq!(state.conversation_id, ConversationId::new("conv-1"));
        assert_eq!(controller.transcript().await.len(), 2);
    }

    #[tokio::test]
    async fn side_effects_run_in_order() {
        let log = EventLog::default();
        let source = Arc::new(StubSource::new(log.clone(), "ok", None));
        let controller = controller(source, &log);

        controller.send("bonjour").await;

        let events = log.events();
        let pending = match events[3] {
            Event::ShowPending(id) => id,
            ref other => panic!("expected pending indicator, got {other:?}"),
        };
        assert_eq!(
            events,
            vec![
                Event::ClearInput,
                Event::InputEnabled(false),
                Event::Append {
                    sender: Sender::User,
                    text: "bonjour".to_string(),
                    markup: "bonjour".to_string(),
                },
                Event::ShowPending(pending),
                Event::SourceCalled {
                    message: "bonjour".to_string(),
                    conversation_id: None,
                },
                Event::RemovePending(pending),
                Event::Append {
                    sender: Sender::Bot,
                    text: "ok".to_string(),
                    markup: "ok".to_string(),
                },
                Event::InputEnabled(true),
                Event::FocusInput,
            ]
        );
    }

    #[tokio::test]
    async fn bot_reply_is_formatted() {
        let log = EventLog::default();
        let source = Arc::new(StubSource::new(log.clone(), "- a\n- **b**", None));
        let controller = controller(source, &log);

        controller.send("liste").await;

        let markups = log.markups();
        assert_eq!(markups[1], "<ul><li>a</li><br><li><strong>b</strong></li></ul>");
    }

    #[tokio::test]
    async fn escaped_policy_applies_to_both_senders() {
        let log = EventLog::default();
        let source = Arc::new(StubSource::new(log.clone(), "<i>x</i>", None));
        let controller = controller(source, &log).with_markup_policy(MarkupPolicy::Escaped);

        controller.send("<b>").await;

        assert_eq!(log.markups(), vec!["&lt;b&gt;", "&lt;i&gt;x&lt;/i&gt;"]);
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let log = EventLog::default();
        let source = Arc::new(StubSource::new(log.clone(), "ok", None));
        let controller = controller(source, &log);

        controller.send("").await;
        controller.send(" \n\t ").await;

        assert!(log.events().is_empty());
        assert_eq!(controller.state().await, ConversationState::default());
    }

    #[tokio::test]
    async fn send_while_waiting_is_ignored() {
        let log = EventLog::default();
        let source = Arc::new(GatedSource::new("enfin"));
        let gate = source.gate();
        let controller = Arc::new(controller(source, &log));

        let first = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move { controller.send("premier").await })
        };
        while !controller.state().await.is_waiting {
            tokio::task::yield_now().await;
        }

        let before = log.events().len();
        controller.send("second").await;
        assert_eq!(log.events().len(), before);

        gate.notify_one();
        first.await.expect("first send task");

        let appended = log.appended();
        assert_eq!(
            appended,
            vec![
                (Sender::User, "premier".to_string()),
                (Sender::Bot, "enfin".to_string()),
            ]
        );
        assert!(!controller.state().await.is_waiting);
    }

    #[tokio::test]
    async fn failure_shows_one_apology_and_releases_input() {
        let log = EventLog::default();
        let source = Arc::new(FailingSource::new("http://localhost:8000"));
        let controller = controller(source, &log);

        controller.send("salut").await;

        let appended = log.appended();
        assert_eq!(appended.len(), 2);
        assert_eq!(appended[1].0, Sender::Bot);
        assert!(appended[1].1.contains("http://localhost:8000"));

        let events = log.events();
        let removed = events
            .iter()
            .position(|e| matches!(e, Event::RemovePending(_)))
            .expect("indicator removed");
        let apology = events
            .iter()
            .rposition(|e| matches!(e, Event::Append { .. }))
            .expect("apology appended");
        assert!(removed < apology);

        let state = controller.state().await;
        assert!(!state.is_waiting);
        assert!(state.conversation_id.is_none());
    }

    #[tokio::test]
    async fn conversation_id_is_sent_on_next_turn() {
        let log = EventLog::default();
        let source = Arc::new(StubSource::new(log.clone(), "ok", Some("conv-7")));
        let controller = controller(source, &log);

        controller.send("un").await;
        controller.send("deux").await;

        assert_eq!(
            log.source_calls(),
            vec![
                ("un".to_string(), None),
                ("deux".to_string(), Some("conv-7".to_string())),
            ]
        );
    }

    #[tokio::test]
    async fn failure_keeps_existing_conversation_id() {
        let log = EventLog::default();
        let ok = Arc::new(StubSource::new(log.clone(), "ok", Some("conv-1")));
        let controller = controller(ok, &log);
        controller.send("un").await;

        let failing = ConversationController {
            source: Arc::new(FailingSource::new("http://localhost:8000")),
            view: RecordingView::new(log.clone()),
            markup: MarkupPolicy::default(),
            inner: Mutex::new(Inner {
                conversation: controller.state().await,
                transcript: Vec::new(),
            }),
        };
        failing.send("deux").await;

        assert_eq!(
            failing.state().await.conversation_id,
            ConversationId::new("conv-1")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn local_table_round_trip() {
        let log = EventLog::default();
        let controller = controller(Arc::new(LocalKeywordTable::lille()), &log);

        controller.send("je meurs de dalle").await;

        let appended = log.appended();
        assert!(appended[1].1.contains("George V"));
        assert!(log.markups()[1].contains("<strong>George V</strong>"));
        assert!(controller.state().await.conversation_id.is_none());
    }

    #[tokio::test]
    async fn reset_forgets_conversation() {
        let log = EventLog::default();
        let source = Arc::new(StubSource::new(log.clone(), "ok", Some("conv-1")));
        let controller = controller(source, &log);
        controller.send("un").await;

        assert!(controller.reset().await);
        assert!(controller.state().await.conversation_id.is_none());
        assert_eq!(log.ended(), vec!["conv-1".to_string()]);

        controller.send("deux").await;
        assert_eq!(log.source_calls()[1], ("deux".to_string(), None));
    }

    #[test]
    fn apology_names_backend() {
        assert_eq!(
            apology_text(Some("http://localhost:8000")),
            "😞 Désolé, une erreur est survenue. Vérifie que le backend est démarré (http://localhost:8000)."
        );
        assert!(!apology_text(None).contains('('));
    }
}
