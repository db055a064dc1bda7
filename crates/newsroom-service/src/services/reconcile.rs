//! Reconciliation engine
//!
//! Recomputes aggregates from the reaction store and repairs the cache.
//! Runs after every toggle (affected kinds only) and on every read of an
//! article's counts (all kinds). Holds no state of its own.

use newsroom_core::{
    ArticleId, DomainEvent, ReactionCountDriftedEvent, ReactionCounts, ReactionKind,
    ReactionTransaction, ToggleOutcome,
};
use tracing::{instrument, warn};

use super::aggregate::{AggregateCache, Recount};
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Result of reconciling a set of kinds inside one transaction
#[derive(Debug, Default)]
pub struct Reconciliation {
    /// Fresh counts for the reconciled kinds
    pub counts: Vec<(ReactionKind, i64)>,
    /// Drift reports, to be emitted once the transaction commits
    pub drift: Vec<DomainEvent>,
}

/// Reconciliation engine
pub struct ReconciliationEngine<'a> {
    ctx: &'a ServiceContext,
    cache: AggregateCache<'a>,
}

impl<'a> ReconciliationEngine<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self {
            ctx,
            cache: AggregateCache::new(ctx),
        }
    }

    /// Recompute the kinds touched by a toggle
    ///
    /// The cached value plus the transition's own delta must equal the
    /// recount; anything else is drift that predates this toggle.
    #[instrument(skip(self, tx, outcome), fields(action = ?outcome.action))]
    pub async fn reconcile_toggle(
        &self,
        tx: &mut dyn ReactionTransaction,
        article_id: ArticleId,
        outcome: &ToggleOutcome,
    ) -> ServiceResult<Reconciliation> {
        let mut result = Reconciliation::default();

        for kind in outcome.affected_kinds() {
            let recount = self.cache.recompute(tx, article_id, kind).await?;
            result.record(article_id, recount, outcome.expected_delta(kind));
        }

        Ok(result)
    }

    /// Recompute the given kinds with no pending transition
    pub async fn reconcile_kinds(
        &self,
        tx: &mut dyn ReactionTransaction,
        article_id: ArticleId,
        kinds: &[ReactionKind],
    ) -> ServiceResult<Reconciliation> {
        let mut sorted = kinds.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let mut result = Reconciliation::default();
        for kind in sorted {
            let recount = self.cache.recompute(tx, article_id, kind).await?;
            result.record(article_id, recount, 0);
        }
        Ok(result)
    }

    /// Fresh counts for every kind of an article
    ///
    /// Counts every kind without taking locks. Only kinds whose cached value
    /// disagrees are then recomputed under the aggregate row lock, so readers
    /// do not queue behind writers while the cache is healthy. Drift events
    /// are emitted after commit.
    #[instrument(skip(self))]
    pub async fn reconcile_article(&self, article_id: ArticleId) -> ServiceResult<ReactionCounts> {
        let cached = self.cache.snapshot(article_id).await?;

        let mut tx = self.ctx.reaction_repo().begin().await?;
        let mut counts = ReactionCounts::default();
        let mut stale = Vec::new();

        for kind in ReactionKind::ALL {
            let actual = tx.count_reactions(article_id, kind).await?;
            counts.set(kind, actual);
            if actual != cached.get(kind) {
                stale.push(kind);
            }
        }

        let repaired = if stale.is_empty() {
            Reconciliation::default()
        } else {
            self.reconcile_kinds(tx.as_mut(), article_id, &stale).await?
        };
        tx.commit().await?;

        for &(kind, actual) in &repaired.counts {
            counts.set(kind, actual);
        }
        self.emit_all(&repaired.drift).await;

        Ok(counts)
    }

    /// Hand events to the sink; delivery failures never reach the caller
    pub async fn emit_all(&self, events: &[DomainEvent]) {
        for event in events {
            self.ctx.event_sink().emit(event).await;
        }
    }
}

impl Reconciliation {
    fn record(&mut self, article_id: ArticleId, recount: Recount, expected_delta: i64) {
        let Recount {
            kind,
            cached,
            actual,
        } = recount;
        let expected = cached + expected_delta;

        if expected != actual {
            warn!(
                article_id = %article_id,
                kind = %kind,
                cached,
                expected,
                actual,
                "Reaction count drift corrected"
            );
            self.drift.push(DomainEvent::ReactionCountDrifted(
                ReactionCountDriftedEvent::new(article_id, kind, cached, expected, actual),
            ));
        }

        self.counts.push((kind, actual));
    }
}
