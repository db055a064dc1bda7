//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::ArticleId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Article not found: {0}")]
    ArticleNotFound(ArticleId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid reaction kind: {0}")]
    InvalidReactionKind(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    /// The transaction aborted as a unit (lock timeout, deadlock,
    /// serialization failure, lost connection). Nothing was applied.
    #[error("Transaction failed: {0}")]
    TransactionFailure(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::ArticleNotFound(_) => "UNKNOWN_ARTICLE",

            // Validation
            Self::InvalidReactionKind(_) => "INVALID_REACTION_KIND",
            Self::ValidationError(_) => "VALIDATION_ERROR",

            // Infrastructure
            Self::TransactionFailure(_) => "TRANSACTION_FAILURE",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ArticleNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidReactionKind(_) | Self::ValidationError(_)
        )
    }

    /// Check if the operation aborted cleanly and may be retried as-is
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::TransactionFailure(_))
    }
}
