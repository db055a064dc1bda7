//! Reaction entities - a user's emotive response to an article and the
//! per-kind aggregate counts derived from them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::value_objects::{ArticleId, UserId};

/// Closed set of reaction kinds
///
/// Declaration order is the canonical order: counts are reported and
/// aggregate rows are locked in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReactionKind {
    Heart,
    ThumbsUp,
    Laugh,
    Angry,
    Sad,
}

impl ReactionKind {
    /// Every kind, in canonical order
    pub const ALL: [ReactionKind; 5] = [
        Self::Heart,
        Self::ThumbsUp,
        Self::Laugh,
        Self::Angry,
        Self::Sad,
    ];

    /// Wire and storage name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heart => "heart",
            Self::ThumbsUp => "thumbsUp",
            Self::Laugh => "laugh",
            Self::Angry => "angry",
            Self::Sad => "sad",
        }
    }

    /// Parse a wire name, rejecting anything outside the enumerated set
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::InvalidReactionKind(s.to_string()))
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The single active reaction a user holds on an article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionRecord {
    pub user_id: UserId,
    pub article_id: ArticleId,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReactionRecord {
    /// Create a new ReactionRecord
    pub fn new(user_id: UserId, article_id: ArticleId, kind: ReactionKind) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            article_id,
            kind,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Cached count for one (article, kind) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateCount {
    pub article_id: ArticleId,
    pub kind: ReactionKind,
    pub count: i64,
}

impl AggregateCount {
    /// Create a new AggregateCount
    pub fn new(article_id: ArticleId, kind: ReactionKind, count: i64) -> Self {
        Self {
            article_id,
            kind,
            count,
        }
    }
}

/// Count for every reaction kind of one article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionCounts {
    pub heart: i64,
    pub thumbs_up: i64,
    pub laugh: i64,
    pub angry: i64,
    pub sad: i64,
}

impl ReactionCounts {
    /// Count for a single kind
    pub fn get(&self, kind: ReactionKind) -> i64 {
        match kind {
            ReactionKind::Heart => self.heart,
            ReactionKind::ThumbsUp => self.thumbs_up,
            ReactionKind::Laugh => self.laugh,
            ReactionKind::Angry => self.angry,
            ReactionKind::Sad => self.sad,
        }
    }

    /// Set the count for a single kind
    pub fn set(&mut self, kind: ReactionKind, count: i64) {
        let slot = match kind {
            ReactionKind::Heart => &mut self.heart,
            ReactionKind::ThumbsUp => &mut self.thumbs_up,
            ReactionKind::Laugh => &mut self.laugh,
            ReactionKind::Angry => &mut self.angry,
            ReactionKind::Sad => &mut self.sad,
        };
        *slot = count;
    }

    /// Sum over all kinds
    pub fn total(&self) -> i64 {
        ReactionKind::ALL.into_iter().map(|kind| self.get(kind)).sum()
    }

    /// (kind, count) pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (ReactionKind, i64)> + '_ {
        ReactionKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }
}

impl FromIterator<AggregateCount> for ReactionCounts {
    fn from_iter<I: IntoIterator<Item = AggregateCount>>(iter: I) -> Self {
        let mut counts = Self::default();
        for aggregate in iter {
            counts.set(aggregate.kind, aggregate.count);
        }
        counts
    }
}
