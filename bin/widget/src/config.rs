//! Centralized widget configuration.
//!
//! Loaded via the `config` crate from an optional `welsh-bot.toml` file and
//! from `WELSH_BOT_*` environment variables, `__` separating nested keys
//! (e.g. `WELSH_BOT_REPLY__KIND=local`).

use serde::Deserialize;
use std::path::Path;
use welsh_bot_format::MarkupPolicy;
use welsh_bot_reply::ReplySourceConfig;

/// Widget configuration.
#[derive(Debug, Deserialize)]
pub struct WidgetConfig {
    /// Reply source selection.
    #[serde(default)]
    pub reply: ReplySourceConfig,

    /// Whether message text is escaped before formatting.
    #[serde(default)]
    pub markup: MarkupPolicy,

    /// Pause between opening the panel and sending an `ask_bot` message, in milliseconds.
    #[serde(default = "default_ask_delay_ms")]
    pub ask_delay_ms: u64,

    /// Backend serving the events preview. Defaults to `reply.base_url`.
    #[serde(default)]
    pub events_base_url: Option<String>,

    /// Whether to probe the backend health at start-up (remote source only).
    #[serde(default = "default_health_check")]
    pub health_check: bool,
}

fn default_ask_delay_ms() -> u64 {
    500
}

fn default_health_check() -> bool {
    true
}

impl WidgetConfig {
    /// Loads configuration from `file` (or `welsh-bot.toml` in the working
    /// directory, if present) and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value is invalid.
    pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file_source = match file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("welsh-bot").required(false),
        };

        config::Config::builder()
            .add_source(file_source)
            .add_source(
                config::Environment::with_prefix("WELSH_BOT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Backend serving the events preview.
    #[must_use]
    pub fn events_base_url(&self) -> &str {
        self.events_base_url
            .as_deref()
            .unwrap_or(&self.reply.base_url)
    }
}
