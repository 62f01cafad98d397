//! Input line parsing.

/// What one line of terminal input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the chat panel.
    Open,
    /// Hide the chat panel.
    Close,
    /// Flip the chat panel.
    Toggle,
    /// Print the events preview.
    Events,
    /// Ask the bot about the event card at this zero-based position.
    AskCard(usize),
    /// Start a new conversation.
    Reset,
    /// Print the command list.
    Help,
    /// Leave.
    Quit,
    /// Text typed in the panel input (or the search bar while the panel is closed).
    Text(String),
    /// A slash command that does not exist.
    Unknown(String),
}

/// Command list shown by `/help`.
pub const HELP: &str = "\
/open          ouvrir Welsh BOT
/close         fermer Welsh BOT
/toggle        ouvrir ou fermer Welsh BOT
/events        afficher les événements du week-end
/ask <n>       demander à Welsh BOT l'événement n
/reset         nouvelle conversation
/quit          quitter";

impl Command {
    /// Parses one input line.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Self::Text(line.to_string());
        };

        let mut words = rest.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some("open"), None, _) => Self::Open,
            (Some("close"), None, _) => Self::Close,
            (Some("toggle"), None, _) => Self::Toggle,
            (Some("events"), None, _) => Self::Events,
            (Some("reset"), None, _) => Self::Reset,
            (Some("help"), None, _) => Self::Help,
            (Some("quit" | "exit"), None, _) => Self::Quit,
            (Some("ask"), Some(n), None) => match n.parse::<usize>() {
                Ok(n) if n > 0 => Self::AskCard(n - 1),
                _ => Self::Unknown(trimmed.to_string()),
            },
            _ => Self::Unknown(trimmed.to_string()),
        }
    }
}
