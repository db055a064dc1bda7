//! Error handling utilities for repositories

use newsroom_core::{ArticleId, DomainError};
use sqlx::Error as SqlxError;

/// SQLSTATE codes after which the whole transaction can be retried
const DEADLOCK_DETECTED: &str = "40P01";
const SERIALIZATION_FAILURE: &str = "40001";
const LOCK_NOT_AVAILABLE: &str = "55P03";

/// Convert SQLx error to DomainError
///
/// Aborts that leave nothing applied (deadlock, serialization failure, lock
/// timeout, lost connection) become [`DomainError::TransactionFailure`].
pub fn map_db_error(e: SqlxError) -> DomainError {
    if is_transient(&e) {
        return DomainError::TransactionFailure(e.to_string());
    }
    DomainError::DatabaseError(e.to_string())
}

/// Map a foreign key violation on `article_id` to `ArticleNotFound`
pub fn map_article_fk_violation(e: SqlxError, article_id: ArticleId) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return DomainError::ArticleNotFound(article_id);
        }
    }
    map_db_error(e)
}

fn is_transient(e: &SqlxError) -> bool {
    match e {
        SqlxError::Database(db_err) => matches!(
            db_err.code().as_deref(),
            Some(DEADLOCK_DETECTED | SERIALIZATION_FAILURE | LOCK_NOT_AVAILABLE)
        ),
        SqlxError::Io(_) | SqlxError::PoolTimedOut | SqlxError::PoolClosed => true,
        _ => false,
    }
}
