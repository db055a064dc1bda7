//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use newsroom_core::{ReactionRecord, ToggleOutcome};

use super::responses::{ToggleResponse, UserReactionResponse};

impl From<ToggleOutcome> for ToggleResponse {
    fn from(outcome: ToggleOutcome) -> Self {
        Self {
            removed: outcome.removed(),
            kind: outcome.kind,
        }
    }
}

impl From<Option<ReactionRecord>> for UserReactionResponse {
    fn from(record: Option<ReactionRecord>) -> Self {
        let kind = record.map(|r| r.kind);
        Self {
            has_reaction: kind.is_some(),
            kind,
        }
    }
}
