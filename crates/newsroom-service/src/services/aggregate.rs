//! Aggregate cache
//!
//! Denormalized count per (article, kind). Values are only ever replaced by
//! a full recount of the reaction records, never incremented.

use newsroom_core::{ArticleId, ReactionCounts, ReactionKind, ReactionTransaction};
use tracing::instrument;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// One recount of an (article, kind) aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recount {
    pub kind: ReactionKind,
    /// Value cached before the recount (0 when the row did not exist)
    pub cached: i64,
    /// Ground truth, now stored
    pub actual: i64,
}

/// Aggregate cache
pub struct AggregateCache<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AggregateCache<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Recount `kind` for an article and store the result
    ///
    /// Locks the aggregate row first, so the count sees every transaction
    /// that committed before this one was granted the lock. Callers must
    /// recompute several kinds in canonical order.
    #[instrument(skip(self, tx))]
    pub async fn recompute(
        &self,
        tx: &mut dyn ReactionTransaction,
        article_id: ArticleId,
        kind: ReactionKind,
    ) -> ServiceResult<Recount> {
        let cached = tx.lock_count(article_id, kind).await?;
        let actual = tx.count_reactions(article_id, kind).await?;

        if actual != cached {
            tx.store_count(article_id, kind, actual).await?;
        }

        Ok(Recount {
            kind,
            cached,
            actual,
        })
    }

    /// Cached values as stored, without locking or recounting
    pub async fn snapshot(&self, article_id: ArticleId) -> ServiceResult<ReactionCounts> {
        let rows = self.ctx.reaction_repo().cached_counts(article_id).await?;
        Ok(rows.into_iter().collect())
    }

    /// Fresh counts for every kind of an article, repairing the cache
    pub async fn get_all(&self, article_id: ArticleId) -> ServiceResult<ReactionCounts> {
        let engine = super::reconcile::ReconciliationEngine::new(self.ctx);
        engine.reconcile_article(article_id).await
    }
}
