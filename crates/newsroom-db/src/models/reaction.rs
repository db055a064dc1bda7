//! Reaction database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the article_reactions table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub user_id: i64,
    pub article_id: i64,
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for the article_reaction_counts table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionCountModel {
    pub article_id: i64,
    pub kind: String,
    pub count: i64,
}
