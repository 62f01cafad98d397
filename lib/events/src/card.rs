//! Article cards for the events preview.
//!
//! Tag, colour and age label rotate with the card position; the emoji is
//! picked from keywords in the title. Titles and descriptions come from
//! scraped pages and are always escaped.

use crate::client::{EventPreview, EventsPreview};
use tracing::warn;
use welsh_bot_core::Result;
use welsh_bot_format::escape_html;
use welsh_bot_reply::TransportError;

const COLORS: [&str; 4] = [
    "linear-gradient(135deg, #D62825 0%, #FF6B6B 100%)",
    "linear-gradient(135deg, #1D2965 0%, #4A6FA5 100%)",
    "linear-gradient(135deg, #F0A500 0%, #FFD93D 100%)",
    "linear-gradient(135deg, #6B4984 0%, #A855F7 100%)",
];

const TAGS: [&str; 4] = ["Événement", "Sortie", "Concert", "Marché"];

const AGE_LABELS: [&str; 3] = ["Il y a 2 jours", "Il y a 3 jours", "Il y a 1 semaine"];

const EMOJI_KEYWORDS: &[(&[&str], &str)] = &[
    (&["concert", "jazz", "musique"], "🎵"),
    (&["marché", "créateur"], "🛍️"),
    (&["escape", "jeu"], "🎮"),
    (&["spectacle", "cirque"], "🎪"),
    (&["expo", "musée"], "🖼️"),
    (&["festival"], "🎉"),
    (&["sport", "trail"], "🏃"),
];

const DEFAULT_EMOJI: &str = "📅";

/// Picks the card emoji from keywords in an event title.
#[must_use]
pub fn event_emoji(title: &str) -> &'static str {
    let title = title.to_lowercase();
    EMOJI_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| title.contains(*k)))
        .map_or(DEFAULT_EMOJI, |(_, emoji)| *emoji)
}

/// A rendered event card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleCard {
    /// Event title, unescaped.
    pub title: String,
    /// Event description, unescaped; empty when the backend had none.
    pub description: String,
    /// Category label.
    pub tag: &'static str,
    /// Relative age label.
    pub age: &'static str,
    /// CSS background of the picture placeholder.
    pub color: &'static str,
    /// Picture placeholder emoji.
    pub emoji: &'static str,
}

impl ArticleCard {
    /// Builds the card shown at position `index`.
    #[must_use]
    pub fn new(event: &EventPreview, index: usize) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone().unwrap_or_default(),
            tag: TAGS[index % TAGS.len()],
            age: AGE_LABELS[index % AGE_LABELS.len()],
            color: COLORS[index % COLORS.len()],
            emoji: event_emoji(&event.title),
        }
    }

    /// Message sent to the bot when the card is clicked.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!("Parle-moi de {}", self.title)
    }

    /// Card markup.
    #[must_use]
    pub fn render_markup(&self) -> String {
        format!(
            concat!(
                r#"<article class="article-card" data-ask="{prompt}">"#,
                r#"<span class="article-tag">{tag}</span> "#,
                r#"<span class="article-date">{age}</span><br>"#,
                r#"<span class="article-image" style="background: {color}">{emoji}</span> "#,
                r#"<strong class="article-title">{title}</strong><br>"#,
                r#"<span class="article-excerpt">{description}</span>"#,
                "</article>",
            ),
            prompt = escape_html(&self.prompt()),
            tag = self.tag,
            age = self.age,
            color = self.color,
            emoji = self.emoji,
            title = escape_html(&self.title),
            description = escape_html(&self.description),
        )
    }
}

/// What the events section of the page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventsPanel {
    /// At least one event.
    Cards {
        /// Cards in backend order.
        cards: Vec<ArticleCard>,
        /// Weekend date range, if known.
        week_dates: Option<String>,
    },
    /// The backend listed no events.
    Empty,
    /// The backend could not be reached.
    Unavailable {
        /// Backend base URL to check.
        backend: String,
    },
}

impl EventsPanel {
    /// Builds the panel from a preview fetch.
    #[must_use]
    pub fn from_preview(preview: Result<EventsPreview, TransportError>, backend: &str) -> Self {
        match preview {
            Ok(preview) if preview.events.is_empty() => Self::Empty,
            Ok(preview) => Self::Cards {
                cards: preview
                    .events
                    .iter()
                    .enumerate()
                    .map(|(index, event)| ArticleCard::new(event, index))
                    .collect(),
                week_dates: preview.week_dates.filter(|dates| !dates.is_empty()),
            },
            Err(report) => {
                warn!(error = %report, "failed to load events preview");
                Self::Unavailable {
                    backend: backend.to_string(),
                }
            }
        }
    }

    /// Returns the card at `index`, if any.
    #[must_use]
    pub fn card(&self, index: usize) -> Option<&ArticleCard> {
        match self {
            Self::Cards { cards, .. } => cards.get(index),
            Self::Empty | Self::Unavailable { .. } => None,
        }
    }

    /// Panel markup.
    #[must_use]
    pub fn render_markup(&self) -> String {
        match self {
            Self::Cards { cards, week_dates } => {
                let mut markup = String::new();
                if let Some(dates) = week_dates {
                    markup.push_str(&format!("<h2>{}</h2>", escape_html(dates)));
                }
                let rendered: Vec<String> = cards.iter().map(ArticleCard::render_markup).collect();
                markup.push_str(&rendered.join("<br>"));
                markup
            }
            Self::Empty => concat!(
                "<p>Aucun événement disponible.</p>",
                "<p>Clique sur <strong>Welsh BOT</strong> pour découvrir Lille ! 🤖</p>",
            )
            .to_string(),
            Self::Unavailable { backend } => format!(
                "<p>Impossible de charger les événements.</p><p>Backend: {}</p>",
                escape_html(backend)
            ),
        }
    }
}
