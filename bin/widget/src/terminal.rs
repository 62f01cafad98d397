//! Terminal rendering of the chat panel.

use regex::Regex;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex};
use tracing::debug;
use welsh_bot_conversation::{ChatView, Message, PENDING_MARKUP, Sender};
use welsh_bot_core::MessageId;

const BOLD_ON: &str = "\x1b[1m";
const BOLD_OFF: &str = "\x1b[0m";
const CLEAR_LINE: &str = "\r\x1b[2K";

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Converts message markup to terminal text.
///
/// Line breaks become newlines, bold becomes ANSI bold and list items get a
/// bullet. Other tags are dropped and entities are decoded.
#[must_use]
pub fn render_markup(markup: &str) -> String {
    let text = markup
        .replace("<br>", "\n")
        .replace("<strong>", BOLD_ON)
        .replace("</strong>", BOLD_OFF)
        .replace("<li>", "  • ");
    let text = TAG_RE.replace_all(&text, "");

    // `&amp;` last so that escaped entities stay literal.
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn speaker(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "vous",
        Sender::Bot => "Welsh BOT",
    }
}

fn pending_line() -> String {
    format!(
        "{BOLD_ON}{}{BOLD_OFF} › {}",
        speaker(Sender::Bot),
        render_markup(PENDING_MARKUP)
    )
}

struct Screen<W> {
    out: W,
    // The pending indicator is always the last, unterminated line.
    pending: bool,
}

impl<W: Write> Screen<W> {
    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|()| self.out.flush()) {
            debug!(error = %e, "terminal write failed");
        }
    }
}

/// Chat panel drawn on a terminal stream.
///
/// While a reply is pending, other output is written above the indicator.
pub struct TerminalView<W> {
    screen: Mutex<Screen<W>>,
    input_enabled: AtomicBool,
}

impl<W: Write + Send> TerminalView<W> {
    /// Creates a view writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            screen: Mutex::new(Screen {
                out,
                pending: false,
            }),
            input_enabled: AtomicBool::new(true),
        }
    }

    /// Whether the panel currently accepts input.
    pub fn input_enabled(&self) -> bool {
        self.input_enabled.load(Ordering::SeqCst)
    }

    /// Writes raw text and flushes.
    pub fn write(&self, text: &str) {
        let Ok(mut screen) = self.screen.lock() else {
            return;
        };
        if screen.pending {
            screen.emit(&format!("{CLEAR_LINE}{text}{}", pending_line()));
        } else {
            screen.emit(text);
        }
    }

    /// Writes markup as terminal text, followed by a newline.
    pub fn write_markup(&self, markup: &str) {
        self.write(&format!("{}\n", render_markup(markup)));
    }
}

#[cfg(test)]
impl TerminalView<Vec<u8>> {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8(self.screen.lock().unwrap().out.clone()).unwrap()
    }
}

impl<W: Write + Send> ChatView for TerminalView<W> {
    fn append_message(&self, message: &Message, markup: &str) {
        self.write(&format!(
            "{BOLD_ON}{}{BOLD_OFF} › {}\n",
            speaker(message.sender),
            render_markup(markup)
        ));
    }

    fn show_pending(&self, _id: MessageId) {
        let Ok(mut screen) = self.screen.lock() else {
            return;
        };
        if !screen.pending {
            screen.pending = true;
            screen.emit(&pending_line());
        }
    }

    fn remove_pending(&self, _id: MessageId) {
        let Ok(mut screen) = self.screen.lock() else {
            return;
        };
        if screen.pending {
            screen.pending = false;
            screen.emit(CLEAR_LINE);
        }
    }

    fn set_input_enabled(&self, enabled: bool) {
        self.input_enabled.store(enabled, Ordering::SeqCst);
    }

    fn clear_input(&self) {}

    fn fill_input(&self, text: &str) {
        self.write(&format!("› {text}\n"));
    }

    fn set_panel_open(&self, open: bool) {
        if open {
            self.write("── Welsh BOT ──\n");
        } else {
            self.write("── Welsh BOT fermé ──\n");
        }
    }
}
