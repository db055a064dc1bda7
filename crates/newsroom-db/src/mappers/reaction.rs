//! Reaction entity <-> model mapper

use newsroom_core::{AggregateCount, ArticleId, DomainError, ReactionKind, ReactionRecord, UserId};

use crate::models::{ReactionCountModel, ReactionModel};

/// Parse a stored kind; the CHECK constraint makes failure a data-integrity error
fn stored_kind(raw: &str) -> Result<ReactionKind, DomainError> {
    ReactionKind::parse(raw)
        .map_err(|_| DomainError::DatabaseError(format!("unknown reaction kind stored: {raw}")))
}

impl TryFrom<ReactionModel> for ReactionRecord {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        Ok(ReactionRecord {
            user_id: UserId::new(model.user_id),
            article_id: ArticleId::new(model.article_id),
            kind: stored_kind(&model.kind)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<ReactionCountModel> for AggregateCount {
    type Error = DomainError;

    fn try_from(model: ReactionCountModel) -> Result<Self, Self::Error> {
        Ok(AggregateCount::new(
            ArticleId::new(model.article_id),
            stored_kind(&model.kind)?,
            model.count,
        ))
    }
}

/// Borrowed values of a reaction record for insertion
pub struct ReactionInsert<'a> {
    pub user_id: i64,
    pub article_id: i64,
    pub kind: &'a str,
}

impl<'a> ReactionInsert<'a> {
    pub fn new(record: &'a ReactionRecord) -> Self {
        Self {
            user_id: record.user_id.into_inner(),
            article_id: record.article_id.into_inner(),
            kind: record.kind.as_str(),
        }
    }
}
