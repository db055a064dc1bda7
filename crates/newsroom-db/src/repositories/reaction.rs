//! PostgreSQL implementation of ReactionRepository
//!
//! All writes go through [`PgReactionTransaction`], which runs under READ
//! COMMITTED. Mutual exclusion comes from row locks:
//!
//! - the (user_id, article_id) primary key plus `ON CONFLICT DO NOTHING`
//!   and `SELECT ... FOR UPDATE` serialize submissions for the same pair;
//! - the aggregate row for (article_id, kind) is locked before counting, so
//!   every count statement sees all transactions committed before it.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use newsroom_core::{
    AggregateCount, ArticleId, DomainError, ReactionKind, ReactionRecord, ReactionRepository,
    ReactionSlot, ReactionTransaction, RepoResult, UserId,
};

use crate::mappers::ReactionInsert;
use crate::models::{ReactionCountModel, ReactionModel};

use super::error::{map_article_fk_violation, map_db_error};

/// Attempts at claiming a slot whose row vanishes between insert and lock
const MAX_CLAIM_ROUNDS: usize = 3;

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
    lock_timeout: Option<Duration>,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            lock_timeout: None,
        }
    }

    /// Bound how long a transaction waits for any row lock
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn begin(&self) -> RepoResult<Box<dyn ReactionTransaction>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        if let Some(timeout) = self.lock_timeout {
            // SET does not accept bind parameters
            let statement = format!("SET LOCAL lock_timeout = {}", timeout.as_millis());
            sqlx::query(&statement)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
        }

        Ok(Box::new(PgReactionTransaction { tx }))
    }

    #[instrument(skip(self))]
    async fn find(
        &self,
        article_id: ArticleId,
        user_id: UserId,
    ) -> RepoResult<Option<ReactionRecord>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT user_id, article_id, kind, created_at, updated_at
            FROM article_reactions
            WHERE article_id = $1 AND user_id = $2
            "#,
        )
        .bind(article_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(ReactionRecord::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn cached_counts(&self, article_id: ArticleId) -> RepoResult<Vec<AggregateCount>> {
        let results = sqlx::query_as::<_, ReactionCountModel>(
            r#"
            SELECT article_id, kind, count
            FROM article_reaction_counts
            WHERE article_id = $1
            "#,
        )
        .bind(article_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(AggregateCount::try_from).collect()
    }
}

/// One open toggle or reconciliation transaction
pub struct PgReactionTransaction {
    tx: Transaction<'static, Postgres>,
}

impl PgReactionTransaction {
    async fn try_insert(&mut self, draft: &ReactionRecord) -> RepoResult<Option<ReactionModel>> {
        let insert = ReactionInsert::new(draft);

        sqlx::query_as::<_, ReactionModel>(
            r#"
            INSERT INTO article_reactions (user_id, article_id, kind, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, article_id) DO NOTHING
            RETURNING user_id, article_id, kind, created_at, updated_at
            "#,
        )
        .bind(insert.user_id)
        .bind(insert.article_id)
        .bind(insert.kind)
        .bind(draft.created_at)
        .bind(draft.updated_at)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| map_article_fk_violation(e, draft.article_id))
    }

    async fn lock_existing(
        &mut self,
        article_id: ArticleId,
        user_id: UserId,
    ) -> RepoResult<Option<ReactionModel>> {
        sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT user_id, article_id, kind, created_at, updated_at
            FROM article_reactions
            WHERE article_id = $1 AND user_id = $2
            FOR UPDATE
            "#,
        )
        .bind(article_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)
    }
}

#[async_trait]
impl ReactionTransaction for PgReactionTransaction {
    #[instrument(skip(self, draft), fields(article_id = %draft.article_id, user_id = %draft.user_id))]
    async fn claim(&mut self, draft: &ReactionRecord) -> RepoResult<ReactionSlot> {
        for _ in 0..MAX_CLAIM_ROUNDS {
            if let Some(model) = self.try_insert(draft).await? {
                return Ok(ReactionSlot::Inserted(model.try_into()?));
            }

            if let Some(model) = self.lock_existing(draft.article_id, draft.user_id).await? {
                return Ok(ReactionSlot::Existing(model.try_into()?));
            }

            // the conflicting row was deleted between the two statements
            debug!("Reaction slot vanished before it could be locked, retrying claim");
        }

        Err(DomainError::TransactionFailure(format!(
            "could not claim reaction slot for user {} on article {}",
            draft.user_id, draft.article_id
        )))
    }

    #[instrument(skip(self))]
    async fn update_kind(
        &mut self,
        article_id: ArticleId,
        user_id: UserId,
        kind: ReactionKind,
    ) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE article_reactions
            SET kind = $3, updated_at = NOW()
            WHERE article_id = $1 AND user_id = $2
            "#,
        )
        .bind(article_id.into_inner())
        .bind(user_id.into_inner())
        .bind(kind.as_str())
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&mut self, article_id: ArticleId, user_id: UserId) -> RepoResult<()> {
        sqlx::query(
            r#"
            DELETE FROM article_reactions WHERE article_id = $1 AND user_id = $2
            "#,
        )
        .bind(article_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn lock_count(&mut self, article_id: ArticleId, kind: ReactionKind) -> RepoResult<i64> {
        sqlx::query(
            r#"
            INSERT INTO article_reaction_counts (article_id, kind, count)
            VALUES ($1, $2, 0)
            ON CONFLICT (article_id, kind) DO NOTHING
            "#,
        )
        .bind(article_id.into_inner())
        .bind(kind.as_str())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_article_fk_violation(e, article_id))?;

        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT count
            FROM article_reaction_counts
            WHERE article_id = $1 AND kind = $2
            FOR UPDATE
            "#,
        )
        .bind(article_id.into_inner())
        .bind(kind.as_str())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count_reactions(
        &mut self,
        article_id: ArticleId,
        kind: ReactionKind,
    ) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM article_reactions
            WHERE article_id = $1 AND kind = $2
            "#,
        )
        .bind(article_id.into_inner())
        .bind(kind.as_str())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn store_count(
        &mut self,
        article_id: ArticleId,
        kind: ReactionKind,
        count: i64,
    ) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO article_reaction_counts (article_id, kind, count, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (article_id, kind)
            DO UPDATE SET count = EXCLUDED.count, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(article_id.into_inner())
        .bind(kind.as_str())
        .bind(count)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_article_fk_violation(e, article_id))?;

        Ok(())
    }

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        self.tx.commit().await.map_err(map_db_error)
    }
}
