//! The terminal widget session.

use crate::command::{Command, HELP};
use crate::config::WidgetConfig;
use crate::error::WidgetError;
use crate::terminal::TerminalView;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use welsh_bot_conversation::{ChatWidget, ConversationController};
use welsh_bot_core::Result;
use welsh_bot_events::{ArticleCard, EventsClient, EventsPanel};
use welsh_bot_reply::{RemoteApi, ReplySourceKind};

const BUSY_NOTICE: &str = "Welsh BOT réfléchit encore, patiente un peu.\n";

/// Whether the input loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// Stop reading.
    Quit,
}

/// One widget session on a terminal stream.
pub struct App<W> {
    widget: Arc<ChatWidget<TerminalView<W>>>,
    events: EventsClient,
    panel: Option<EventsPanel>,
    in_flight: Vec<JoinHandle<()>>,
}

impl<W: Write + Send + 'static> App<W> {
    /// Builds the widget described by `config`, drawing on `out`.
    pub fn new(config: &WidgetConfig, out: W) -> Self {
        let controller = ConversationController::new(config.reply.build(), TerminalView::new(out))
            .with_markup_policy(config.markup);
        let widget = ChatWidget::new(Arc::new(controller))
            .with_ask_delay(Duration::from_millis(config.ask_delay_ms));

        Self {
            widget: Arc::new(widget),
            events: EventsClient::new(config.events_base_url()),
            panel: None,
            in_flight: Vec::new(),
        }
    }

    /// Returns the chat widget.
    pub fn widget(&self) -> &Arc<ChatWidget<TerminalView<W>>> {
        &self.widget
    }

    /// Replaces the events preview without fetching it.
    pub fn set_events(&mut self, panel: EventsPanel) {
        self.panel = Some(panel);
    }

    fn view(&self) -> &TerminalView<W> {
        self.widget.controller().view()
    }

    /// Probes the chat backend and logs what it reports.
    pub async fn check_backend(&self, config: &WidgetConfig) {
        if config.reply.kind != ReplySourceKind::Remote || !config.health_check {
            return;
        }

        match RemoteApi::new(config.reply.base_url.clone()).health().await {
            Ok(health) if health.is_ok() => {
                info!(
                    base_url = %config.reply.base_url,
                    ollama = ?health.ollama,
                    mcp = ?health.mcp,
                    "backend is up"
                );
            }
            Ok(health) => {
                warn!(base_url = %config.reply.base_url, status = %health.status, "backend is degraded");
            }
            Err(report) => {
                warn!(base_url = %config.reply.base_url, error = %report, "backend is unreachable");
            }
        }
    }

    /// Fetches and prints the events preview.
    pub async fn load_events(&mut self) {
        let panel =
            EventsPanel::from_preview(self.events.preview().await, self.events.base_url());
        self.print_events(&panel);
        self.panel = Some(panel);
    }

    fn print_events(&self, panel: &EventsPanel) {
        match panel {
            EventsPanel::Cards { cards, week_dates } => {
                if let Some(dates) = week_dates {
                    self.view().write(&format!("Ce week-end ({dates})\n"));
                }
                for (position, card) in cards.iter().enumerate() {
                    self.view().write(&format!(
                        "[{}] {} {} · {}\n    {}\n",
                        position + 1,
                        card.emoji,
                        card.tag,
                        card.title,
                        card.description
                    ));
                }
            }
            EventsPanel::Empty | EventsPanel::Unavailable { .. } => {
                self.view().write_markup(&panel.render_markup());
            }
        }
    }

    fn spawn_send(&mut self, text: String) {
        let widget = Arc::clone(&self.widget);
        self.in_flight.push(tokio::spawn(async move {
            widget.controller().send(&text).await;
        }));
    }

    fn spawn_ask(&mut self, text: String) {
        let widget = Arc::clone(&self.widget);
        self.in_flight.push(tokio::spawn(async move {
            widget.ask_bot(&text).await;
        }));
    }

    /// Acts on one command.
    pub async fn handle(&mut self, command: Command) -> Flow {
        self.in_flight.retain(|task| !task.is_finished());

        match command {
            Command::Open => self.widget.open(),
            Command::Close => self.widget.close(),
            Command::Toggle => self.widget.toggle(),
            Command::Events => self.load_events().await,
            Command::AskCard(index) => {
                if self.panel.is_none() {
                    self.load_events().await;
                }
                let prompt = self
                    .panel
                    .as_ref()
                    .and_then(|panel| panel.card(index))
                    .map(ArticleCard::prompt);
                match prompt {
                    Some(prompt) => self.spawn_ask(prompt),
                    None => self
                        .view()
                        .write(&format!("Pas d'événement n°{}.\n", index + 1)),
                }
            }
            Command::Reset => {
                if self.widget.controller().reset().await {
                    self.view().write("── Nouvelle conversation ──\n");
                } else {
                    self.view().write(BUSY_NOTICE);
                }
            }
            Command::Help => self.view().write(&format!("{HELP}\n")),
            Command::Quit => return Flow::Quit,
            Command::Text(text) => {
                if !self.view().input_enabled() {
                    self.view().write(BUSY_NOTICE);
                } else if self.widget.is_open() {
                    self.spawn_send(text);
                } else if !text.trim().is_empty() {
                    // Search bar: opens the panel and asks on the user's behalf.
                    self.spawn_ask(text.trim().to_string());
                }
            }
            Command::Unknown(line) => {
                self.view()
                    .write(&format!("Commande inconnue : {line} (essaie /help)\n"));
            }
        }

        Flow::Continue
    }

    /// Waits for replies still in flight.
    pub async fn settle(&mut self) {
        for task in self.in_flight.drain(..) {
            if let Err(e) = task.await {
                warn!(error = %e, "reply task failed");
            }
        }
    }

    /// Reads commands from `input` until `/quit` or end of input.
    ///
    /// Replies still in flight at end of input are awaited.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the input fails.
    pub async fn run<R>(&mut self, input: R) -> Result<(), WidgetError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        loop {
            let line = lines.next_line().await.map_err(|e| WidgetError::Input {
                details: e.to_string(),
            })?;
            let Some(line) = line else {
                self.settle().await;
                return Ok(());
            };
            if self.handle(Command::parse(&line)).await == Flow::Quit {
                return Ok(());
            }
        }
    }
}
