//! Reaction service
//!
//! Entry point for article reactions. A submission runs the toggle protocol:
//! the store mutation and the recount of every affected kind commit or abort
//! together in one transaction. Reads reconcile the aggregates before
//! answering.

use newsroom_core::{
    ArticleId, DomainEvent, ReactionCounts, ReactionKind, ReactionToggledEvent, ToggleOutcome,
    UserId,
};
use tracing::{info, instrument, warn};

use crate::dto::{
    ReactionSummaryResponse, SubmitReactionRequest, ToggleResponse, UserReactionResponse,
};

use super::aggregate::AggregateCache;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::reconcile::ReconciliationEngine;
use super::store::ReactionStore;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
    store: ReactionStore<'a>,
    cache: AggregateCache<'a>,
    engine: ReconciliationEngine<'a>,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self {
            ctx,
            store: ReactionStore::new(ctx),
            cache: AggregateCache::new(ctx),
            engine: ReconciliationEngine::new(ctx),
        }
    }

    /// Submit a reaction: create, remove or switch depending on what the user
    /// already has on the article
    ///
    /// Transient transaction failures are retried up to the configured number
    /// of attempts; each attempt starts from scratch.
    #[instrument(skip(self, request), fields(kind = %request.kind))]
    pub async fn submit(
        &self,
        user_id: UserId,
        article_id: ArticleId,
        request: SubmitReactionRequest,
    ) -> ServiceResult<ToggleResponse> {
        let kind = self.store.check_submission(article_id, &request.kind).await?;
        let max_attempts = self.ctx.reaction_config().toggle_max_attempts.max(1);

        let mut attempt = 1;
        let (outcome, drift) = loop {
            match self.toggle_once(user_id, article_id, kind).await {
                Ok(done) => break done,
                Err(e) if e.is_transient() && attempt < max_attempts => {
                    warn!(attempt, max_attempts, error = %e, "Reaction toggle aborted, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        };

        info!(
            article_id = %article_id,
            user_id = %user_id,
            kind = %kind,
            action = ?outcome.action,
            "Reaction toggled"
        );

        let toggled = DomainEvent::ReactionToggled(ReactionToggledEvent::new(
            article_id,
            user_id,
            kind,
            outcome.action,
        ));
        self.engine.emit_all(&drift).await;
        self.engine.emit_all(std::slice::from_ref(&toggled)).await;

        Ok(outcome.into())
    }

    /// One attempt of the toggle transaction
    async fn toggle_once(
        &self,
        user_id: UserId,
        article_id: ArticleId,
        kind: ReactionKind,
    ) -> ServiceResult<(ToggleOutcome, Vec<DomainEvent>)> {
        let mut tx = self.ctx.reaction_repo().begin().await?;

        let outcome = self.store.apply(tx.as_mut(), user_id, article_id, kind).await?;
        let reconciled = self
            .engine
            .reconcile_toggle(tx.as_mut(), article_id, &outcome)
            .await?;

        tx.commit().await?;
        Ok((outcome, reconciled.drift))
    }

    /// Fresh count for every kind of an article
    #[instrument(skip(self))]
    pub async fn get_counts(&self, article_id: ArticleId) -> ServiceResult<ReactionCounts> {
        self.store.require_article(article_id).await?;
        self.cache.get_all(article_id).await
    }

    /// The caller's current reaction on an article
    #[instrument(skip(self))]
    pub async fn get_user_reaction(
        &self,
        article_id: ArticleId,
        user_id: UserId,
    ) -> ServiceResult<UserReactionResponse> {
        self.store.require_article(article_id).await?;
        let record = self.store.find(article_id, user_id).await?;
        Ok(record.into())
    }

    /// Counts, total, and the viewer's own reaction when authenticated
    #[instrument(skip(self))]
    pub async fn get_summary(
        &self,
        article_id: ArticleId,
        viewer: Option<UserId>,
    ) -> ServiceResult<ReactionSummaryResponse> {
        self.store.require_article(article_id).await?;
        let counts = self.cache.get_all(article_id).await?;

        let me = match viewer {
            Some(user_id) => self.store.find(article_id, user_id).await?.map(|r| r.kind),
            None => None,
        };

        Ok(ReactionSummaryResponse {
            article_id,
            total: counts.total(),
            counts,
            me,
        })
    }
}
