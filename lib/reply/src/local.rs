//! Offline reply source backed by a fixed keyword table.
//!
//! Matching is a raw substring test against the unmodified message, in rule
//! order; the first hit wins. The reply is delivered after an artificial
//! delay so the widget feels the same as when it talks to the backend.

use crate::config::ReplySourceKind;
use crate::error::TransportError;
use crate::source::{Reply, ReplySource};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use welsh_bot_core::{ConversationId, Result};

/// Delay before a canned reply is delivered.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(800);

/// Reply used when no rule matches.
pub const FALLBACK_REPLY: &str = "J'ai pas tout compris, j'ai du cheddar dans les oreilles !";

/// One keyword → reply association.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyRule {
    /// Substring searched for in the user message.
    pub keyword: &'static str,
    /// Reply returned on a match.
    pub reply: &'static str,
}

/// The Lille rules, in match order.
pub const LILLE_RULES: &[ReplyRule] = &[
    ReplyRule {
        keyword: "dalle",
        reply: "Ah ! Pour un bon welsh, fonce au **George V** ou à **L'Estaminet du Welsh**. Sinon, une petite frite chez Meunier ?",
    },
    ReplyRule {
        keyword: "boit",
        reply: "Santé ! 🍻 Pour une bonne bière, va à **La Capsule** dans le Vieux-Lille. Si tu préfères les cocktails, direction **Le Joker** !",
    },
    ReplyRule {
        keyword: "blague",
        reply: "C'est l'histoire d'un mec qui rentre dans un café à Roubaix... et plouf ! 🌧️ (C'est parce qu'il pleut tout le temps, t'as compris ?)",
    },
];

/// Reply source answering from a static keyword table.
#[derive(Debug, Clone)]
pub struct LocalKeywordTable {
    rules: &'static [ReplyRule],
    fallback: &'static str,
    delay: Duration,
}

impl LocalKeywordTable {
    /// Creates a table from explicit rules.
    #[must_use]
    pub const fn new(rules: &'static [ReplyRule], fallback: &'static str) -> Self {
        Self {
            rules,
            fallback,
            delay: DEFAULT_REPLY_DELAY,
        }
    }

    /// The Lille table with its default fallback.
    #[must_use]
    pub const fn lille() -> Self {
        Self::new(LILLE_RULES, FALLBACK_REPLY)
    }

    /// Sets the artificial delay.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the artificial delay.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Picks the reply for `message` without any delay.
    #[must_use]
    pub fn lookup_reply(&self, message: &str) -> &'static str {
        self.rules
            .iter()
            .find(|rule| message.contains(rule.keyword))
            .map_or(self.fallback, |rule| rule.reply)
    }
}

impl Default for LocalKeywordTable {
    fn default() -> Self {
        Self::lille()
    }
}

#[async_trait]
impl ReplySource for LocalKeywordTable {
    async fn fetch_reply(
        &self,
        message: &str,
        _conversation_id: Option<&ConversationId>,
    ) -> Result<Reply, TransportError> {
        let reply = self.lookup_reply(message);
        tokio::time::sleep(self.delay).await;
        debug!(delay = ?self.delay, "canned reply delivered");
        Ok(Reply::text(reply))
    }

    fn kind(&self) -> ReplySourceKind {
        ReplySourceKind::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hungry_gets_george_v() {
        let table = LocalKeywordTable::lille();
        assert!(table.lookup_reply("je meurs de dalle").contains("George V"));
    }

    #[test]
    fn joke_mentions_roubaix() {
        let table = LocalKeywordTable::lille();
        assert!(table.lookup_reply("raconte une blague").contains("Roubaix"));
    }

    #[test]
    fn thirsty_gets_la_capsule() {
        let table = LocalKeywordTable::lille();
        assert!(table.lookup_reply("on boit un coup ?").contains("La Capsule"));
    }

    #[test]
    fn unknown_message_gets_fallback() {
        let table = LocalKeywordTable::lille();
        assert_eq!(table.lookup_reply("xyz"), FALLBACK_REPLY);
    }

    #[test]
    fn first_rule_in_order_wins() {
        let table = LocalKeywordTable::lille();
        let reply = table.lookup_reply("une blague pendant qu'on boit, j'ai la dalle");
        assert!(reply.contains("George V"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let table = LocalKeywordTable::lille();
        assert_eq!(table.lookup_reply("BLAGUE"), FALLBACK_REPLY);
    }

    #[test]
    fn custom_rules() {
        const RULES: &[ReplyRule] = &[ReplyRule {
            keyword: "météo",
            reply: "Il pleut.",
        }];
        let table = LocalKeywordTable::new(RULES, "?");
        assert_eq!(table.lookup_reply("la météo ?"), "Il pleut.");
        assert_eq!(table.lookup_reply("dalle"), "?");
    }

    #[tokio::test(start_paused = true)]
    async fn reply_arrives_after_the_delay() {
        let table = LocalKeywordTable::lille();
        let started = tokio::time::Instant::now();

        let reply = table
            .fetch_reply("raconte une blague", None)
            .await
            .expect("local source never fails");

        assert!(started.elapsed() >= DEFAULT_REPLY_DELAY);
        assert!(reply.text.contains("Roubaix"));
        assert!(reply.conversation_id.is_none());
    }

    #[tokio::test]
    async fn end_conversation_is_a_no_op() {
        let table = LocalKeywordTable::lille().with_delay(Duration::ZERO);
        let id = ConversationId::new("abc").expect("non-empty");
        assert!(table.end_conversation(&id).await.is_ok());
        assert_eq!(table.backend_location(), None);
        assert_eq!(table.kind(), ReplySourceKind::Local);
    }
}
