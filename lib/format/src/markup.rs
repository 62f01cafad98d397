//! Markdown-ish to markup conversion.
//!
//! The conversion is a fixed sequence of textual rewrites, each applied to
//! the output of the previous one:
//!
//! 1. every `\n` becomes `<br>`;
//! 2. `**text**` becomes `<strong>text</strong>`;
//! 3. every line (a `<br>`-delimited segment) starting with `-` or `•` and
//!    whitespace becomes `<li>…</li>`;
//! 4. if a list item exists, the span from the first `<li>` to the last
//!    `</li>` is wrapped in a single `<ul>`.
//!
//! Step 4 is greedy: two list blocks separated by prose end up in one `<ul>`
//! together with the prose between them. The output is not idempotent;
//! formatting already formatted markup nests another `<ul>`.

use crate::escape::escape_html;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

const LINE_BREAK: &str = "<br>";

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(.*?)\*\*").expect("BOLD_RE is a valid static regex pattern")
});

static LIST_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[•\-]\s+(.+)$").expect("LIST_ITEM_RE is a valid static regex pattern")
});

static LIST_SPAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)(<li>.*</li>)").expect("LIST_SPAN_RE is a valid static regex pattern")
});

/// How much the formatter trusts the text it is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkupPolicy {
    /// Text is interpolated into markup as-is.
    #[default]
    Trusted,
    /// Text is HTML-escaped before the formatting rewrites run.
    Escaped,
}

/// Formats raw message text into markup, interpolating it as-is.
#[must_use]
pub fn format_message(raw: &str) -> String {
    let with_breaks = raw.replace('\n', LINE_BREAK);

    let with_bold = BOLD_RE.replace_all(&with_breaks, "<strong>${1}</strong>");

    let with_items = with_bold
        .split(LINE_BREAK)
        .map(|line| LIST_ITEM_RE.replace(line, "<li>${1}</li>"))
        .collect::<Vec<_>>()
        .join(LINE_BREAK);

    if with_items.contains("<li>") {
        LIST_SPAN_RE
            .replace(&with_items, "<ul>${1}</ul>")
            .into_owned()
    } else {
        with_items
    }
}

/// Formats raw message text according to `policy`.
#[must_use]
pub fn format_with_policy(raw: &str, policy: MarkupPolicy) -> String {
    match policy {
        MarkupPolicy::Trusted => format_message(raw),
        MarkupPolicy::Escaped => format_message(&escape_html(raw)),
    }
}
