//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{AggregateCount, ReactionKind, ReactionRecord};
use crate::error::DomainError;
use crate::events::DomainEvent;
use crate::value_objects::{ArticleId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Reaction Repository
// ============================================================================

/// Result of claiming the (user, article) slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactionSlot {
    /// The slot was empty and the draft record was inserted
    Inserted(ReactionRecord),
    /// A record already existed; it is locked until the transaction ends
    Existing(ReactionRecord),
}

/// One atomic unit of work over reaction records and aggregate counts
///
/// Nothing is visible to other transactions until [`commit`] succeeds.
/// Dropping the transaction without committing rolls everything back.
///
/// [`commit`]: ReactionTransaction::commit
#[async_trait]
pub trait ReactionTransaction: Send {
    /// Insert `draft` unless a record already exists for its (user, article)
    /// pair. Two concurrent claims for the same pair never both insert.
    async fn claim(&mut self, draft: &ReactionRecord) -> RepoResult<ReactionSlot>;

    /// Change the kind of an existing record
    async fn update_kind(
        &mut self,
        article_id: ArticleId,
        user_id: UserId,
        kind: ReactionKind,
    ) -> RepoResult<()>;

    /// Delete the record for the pair
    async fn delete(&mut self, article_id: ArticleId, user_id: UserId) -> RepoResult<()>;

    /// Lock the aggregate row for (article, kind), creating it at zero when
    /// absent, and return the cached value
    async fn lock_count(&mut self, article_id: ArticleId, kind: ReactionKind) -> RepoResult<i64>;

    /// Count reaction records for (article, kind) directly
    async fn count_reactions(&mut self, article_id: ArticleId, kind: ReactionKind)
        -> RepoResult<i64>;

    /// Overwrite the aggregate row for (article, kind)
    async fn store_count(
        &mut self,
        article_id: ArticleId,
        kind: ReactionKind,
        count: i64,
    ) -> RepoResult<()>;

    /// Commit every change made through this transaction
    async fn commit(self: Box<Self>) -> RepoResult<()>;
}

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Start a transaction
    async fn begin(&self) -> RepoResult<Box<dyn ReactionTransaction>>;

    /// Find the active reaction of a user on an article
    async fn find(&self, article_id: ArticleId, user_id: UserId)
        -> RepoResult<Option<ReactionRecord>>;

    /// Read the aggregate rows as currently cached, without reconciling
    async fn cached_counts(&self, article_id: ArticleId) -> RepoResult<Vec<AggregateCount>>;
}

// ============================================================================
// Article Directory
// ============================================================================

/// Read-only view of the article subsystem
#[async_trait]
pub trait ArticleDirectory: Send + Sync {
    /// Check whether an article exists
    async fn exists(&self, article_id: ArticleId) -> RepoResult<bool>;
}

// ============================================================================
// Event Sink
// ============================================================================

/// Destination for domain events
///
/// Delivery is best effort: implementations log failures instead of
/// returning them, since events are emitted after the data is committed.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: &DomainEvent);
}
