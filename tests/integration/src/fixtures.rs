//! Test fixtures and data generators
//!
//! Seeds article rows directly (articles are owned by another subsystem)
//! and models the JSON bodies the reactions API returns.

use std::sync::atomic::{AtomicI64, Ordering};

use anyhow::Result;
use newsroom_core::{ArticleId, UserId};
use newsroom_db::PgPool;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Counter for unique test users
static USER_COUNTER: AtomicI64 = AtomicI64::new(7_000_000);

/// A user id no other test has used in this run
pub fn unique_user() -> UserId {
    UserId::new(USER_COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Insert an article row and return its id
pub async fn create_article(pool: &PgPool) -> Result<ArticleId> {
    let id: i64 = sqlx::query_scalar("INSERT INTO articles (title) VALUES ($1) RETURNING id")
        .bind(format!("Integration article {}", Uuid::new_v4()))
        .fetch_one(pool)
        .await?;
    Ok(ArticleId::new(id))
}

/// Overwrite a cached aggregate, simulating drift
pub async fn corrupt_count(pool: &PgPool, article_id: ArticleId, kind: &str, count: i64) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO article_reaction_counts (article_id, kind, count)
        VALUES ($1, $2, $3)
        ON CONFLICT (article_id, kind) DO UPDATE SET count = EXCLUDED.count
        "#,
    )
    .bind(article_id.into_inner())
    .bind(kind)
    .bind(count)
    .execute(pool)
    .await?;
    Ok(())
}

/// Cached aggregate as stored, `None` when the row does not exist
pub async fn stored_count(pool: &PgPool, article_id: ArticleId, kind: &str) -> Result<Option<i64>> {
    let count = sqlx::query_scalar(
        "SELECT count FROM article_reaction_counts WHERE article_id = $1 AND kind = $2",
    )
    .bind(article_id.into_inner())
    .bind(kind)
    .fetch_optional(pool)
    .await?;
    Ok(count)
}

/// Path of the reactions collection for an article
pub fn reactions_path(article_id: ArticleId) -> String {
    format!("/api/v1/articles/{article_id}/reactions")
}

/// Submit reaction request
#[derive(Debug, Serialize)]
pub struct SubmitReaction {
    pub kind: String,
}

impl SubmitReaction {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
        }
    }
}

/// Toggle response
#[derive(Debug, Deserialize)]
pub struct ToggleBody {
    pub removed: bool,
    pub kind: String,
}

/// Per-kind counts
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CountsBody {
    pub heart: i64,
    pub thumbs_up: i64,
    pub laugh: i64,
    pub angry: i64,
    pub sad: i64,
}

/// The caller's own reaction
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserReactionBody {
    pub has_reaction: bool,
    pub kind: Option<String>,
}

/// Summary response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryBody {
    pub article_id: i64,
    pub counts: CountsBody,
    pub total: i64,
    pub me: Option<String>,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
