//! Domain events - events emitted when reaction state changes
//!
//! These events are used for:
//! - Diagnostics when a cached aggregate is found to have drifted
//! - Fan-out of committed toggles to interested consumers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{ReactionKind, ToggleAction};
use crate::value_objects::{ArticleId, UserId};

/// All possible domain events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    ReactionToggled(ReactionToggledEvent),
    ReactionCountDrifted(ReactionCountDriftedEvent),
}

impl DomainEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ReactionToggled(_) => "REACTION_TOGGLED",
            Self::ReactionCountDrifted(_) => "REACTION_COUNT_DRIFTED",
        }
    }

    /// Get the timestamp of the event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::ReactionToggled(e) => e.timestamp,
            Self::ReactionCountDrifted(e) => e.timestamp,
        }
    }

    /// Article the event concerns
    pub fn article_id(&self) -> ArticleId {
        match self {
            Self::ReactionToggled(e) => e.article_id,
            Self::ReactionCountDrifted(e) => e.article_id,
        }
    }
}

// ============================================================================
// Event Structs
// ============================================================================

/// A committed toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionToggledEvent {
    pub article_id: ArticleId,
    pub user_id: UserId,
    pub kind: ReactionKind,
    pub action: ToggleAction,
    pub timestamp: DateTime<Utc>,
}

/// A cached aggregate that disagreed with the reaction records and was
/// overwritten with the recomputed value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCountDriftedEvent {
    pub article_id: ArticleId,
    pub kind: ReactionKind,
    /// Value the cache held when it was read
    pub cached: i64,
    /// Value the cache was expected to hold before recomputation
    pub expected: i64,
    /// Recomputed ground truth, now stored
    pub actual: i64,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Event Creation Helpers
// ============================================================================

impl ReactionToggledEvent {
    pub fn new(
        article_id: ArticleId,
        user_id: UserId,
        kind: ReactionKind,
        action: ToggleAction,
    ) -> Self {
        Self {
            article_id,
            user_id,
            kind,
            action,
            timestamp: Utc::now(),
        }
    }
}

impl ReactionCountDriftedEvent {
    pub fn new(
        article_id: ArticleId,
        kind: ReactionKind,
        cached: i64,
        expected: i64,
        actual: i64,
    ) -> Self {
        Self {
            article_id,
            kind,
            cached,
            expected,
            actual,
            timestamp: Utc::now(),
        }
    }

    /// Signed size of the discrepancy
    pub fn discrepancy(&self) -> i64 {
        self.actual - self.expected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = DomainEvent::ReactionToggled(ReactionToggledEvent::new(
            ArticleId::new(7),
            UserId::new(1),
            ReactionKind::Laugh,
            ToggleAction::Switch {
                previous: ReactionKind::Heart,
            },
        ));

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("REACTION_TOGGLED"));
        assert!(json.contains("\"previous\":\"heart\""));

        let parsed: DomainEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
        assert_eq!(parsed.article_id(), ArticleId::new(7));
    }

    #[test]
    fn test_drift_event() {
        let drift =
            ReactionCountDriftedEvent::new(ArticleId::new(7), ReactionKind::Heart, 4, 5, 0);
        assert_eq!(drift.cached, 4);
        assert_eq!(drift.discrepancy(), -5);

        let event = DomainEvent::ReactionCountDrifted(drift);
        assert_eq!(event.event_type(), "REACTION_COUNT_DRIFTED");

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["cached"], 4);
        assert_eq!(json["expected"], 5);
    }
}
