//! Reaction store
//!
//! Owns the reaction records: at most one per (user, article). Applies the
//! toggle transition to the store inside a caller-provided transaction and
//! never touches aggregate counts.

use newsroom_core::{
    ArticleId, DomainError, ReactionKind, ReactionRecord, ReactionSlot, ReactionState,
    ReactionTransaction, ToggleAction, ToggleOutcome, UserId,
};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reaction store
pub struct ReactionStore<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionStore<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Validate a submission before anything is written
    ///
    /// # Errors
    /// `InvalidReactionKind` for a kind outside the closed set, then
    /// `ArticleNotFound` when the article does not exist.
    #[instrument(skip(self))]
    pub async fn check_submission(&self, article_id: ArticleId, kind: &str) -> ServiceResult<ReactionKind> {
        let kind = ReactionKind::parse(kind)?;
        self.require_article(article_id).await?;
        Ok(kind)
    }

    /// Fail with `ArticleNotFound` unless the article exists
    pub async fn require_article(&self, article_id: ArticleId) -> ServiceResult<()> {
        if self.ctx.article_directory().exists(article_id).await? {
            Ok(())
        } else {
            Err(DomainError::ArticleNotFound(article_id).into())
        }
    }

    /// Apply the toggle for `kind` to the store
    ///
    /// The (user, article) row stays locked until `tx` ends, so the
    /// classification cannot be invalidated by a concurrent submission.
    #[instrument(skip(self, tx))]
    pub async fn apply(
        &self,
        tx: &mut dyn ReactionTransaction,
        user_id: UserId,
        article_id: ArticleId,
        kind: ReactionKind,
    ) -> ServiceResult<ToggleOutcome> {
        let draft = ReactionRecord::new(user_id, article_id, kind);

        let current = match tx.claim(&draft).await? {
            // the draft is already stored
            ReactionSlot::Inserted(_) => ReactionState::None,
            ReactionSlot::Existing(record) => ReactionState::Reacted(record.kind),
        };

        let outcome = ToggleOutcome::classify(current, kind);
        match outcome.action {
            ToggleAction::Create => {}
            ToggleAction::Remove => tx.delete(article_id, user_id).await?,
            ToggleAction::Switch { .. } => tx.update_kind(article_id, user_id, kind).await?,
        }

        debug!(action = ?outcome.action, "Reaction store updated");
        Ok(outcome)
    }

    /// The active reaction of a user on an article
    pub async fn find(
        &self,
        article_id: ArticleId,
        user_id: UserId,
    ) -> ServiceResult<Option<ReactionRecord>> {
        Ok(self.ctx.reaction_repo().find(article_id, user_id).await?)
    }
}
