//! Pub/Sub channel definitions.

use newsroom_core::{ArticleId, DomainEvent};

/// Channel prefix for per-article events
pub const ARTICLE_CHANNEL_PREFIX: &str = "article:";
/// Channel for reconciliation diagnostics
pub const DIAGNOSTICS_CHANNEL: &str = "reactions:diagnostics";

/// Pub/Sub channel types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PubSubChannel {
    /// Events about one article
    Article(ArticleId),
    /// Drift reports from the reconciliation engine
    Diagnostics,
}

impl PubSubChannel {
    /// Create an article channel
    #[must_use]
    pub fn article(article_id: ArticleId) -> Self {
        Self::Article(article_id)
    }

    /// Channel a domain event is routed to
    #[must_use]
    pub fn for_event(event: &DomainEvent) -> Self {
        match event {
            DomainEvent::ReactionToggled(e) => Self::Article(e.article_id),
            DomainEvent::ReactionCountDrifted(_) => Self::Diagnostics,
        }
    }

    /// Get the Redis channel name
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Article(id) => format!("{ARTICLE_CHANNEL_PREFIX}{id}"),
            Self::Diagnostics => DIAGNOSTICS_CHANNEL.to_string(),
        }
    }
}

impl std::fmt::Display for PubSubChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}
