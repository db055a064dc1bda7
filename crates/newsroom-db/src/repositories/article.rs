//! PostgreSQL implementation of ArticleDirectory

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use newsroom_core::{ArticleDirectory, ArticleId, RepoResult};

use super::error::map_db_error;

/// Read-only lookup against the article subsystem's `articles` table
#[derive(Clone)]
pub struct PgArticleDirectory {
    pool: PgPool,
}

impl PgArticleDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleDirectory for PgArticleDirectory {
    #[instrument(skip(self))]
    async fn exists(&self, article_id: ArticleId) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM articles WHERE id = $1)")
            .bind(article_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
