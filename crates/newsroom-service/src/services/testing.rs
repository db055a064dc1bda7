//! In-memory collaborators for service tests
//!
//! `InMemoryReactions` gives each transaction exclusive access to a staged
//! copy of the tables; commit swaps the copy in, drop discards it. That is
//! stricter than row locking but keeps the same atomicity.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use newsroom_cache::{RedisPool, RedisPoolConfig};
use newsroom_common::{JwtService, ReactionConfig};
use newsroom_core::{
    AggregateCount, ArticleDirectory, ArticleId, DomainError, DomainEvent, EventSink,
    ReactionCountDriftedEvent, ReactionKind, ReactionRecord, ReactionRepository, ReactionSlot,
    ReactionToggledEvent, ReactionTransaction, RepoResult, UserId,
};
use newsroom_db::PgPool;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use super::context::{ServiceContext, ServiceContextBuilder};

#[derive(Debug, Default, Clone)]
struct Tables {
    reactions: BTreeMap<(ArticleId, UserId), ReactionRecord>,
    counts: BTreeMap<(ArticleId, ReactionKind), i64>,
}

#[derive(Default)]
pub struct InMemoryReactions {
    tables: Arc<AsyncMutex<Tables>>,
    failing_commits: AtomicUsize,
    begun: AtomicUsize,
}

impl InMemoryReactions {
    /// Aggregate row as stored, `None` when it was never created
    pub async fn stored_count(&self, article_id: ArticleId, kind: ReactionKind) -> Option<i64> {
        self.tables.lock().await.counts.get(&(article_id, kind)).copied()
    }

    /// Overwrite an aggregate row behind the engine's back
    pub async fn corrupt_count(&self, article_id: ArticleId, kind: ReactionKind, count: i64) {
        self.tables.lock().await.counts.insert((article_id, kind), count);
    }

    /// Insert a reaction record without touching aggregates
    pub async fn insert_record(&self, record: ReactionRecord) {
        self.tables
            .lock()
            .await
            .reactions
            .insert((record.article_id, record.user_id), record);
    }

    pub async fn record_count(&self) -> usize {
        self.tables.lock().await.reactions.len()
    }

    /// Make the next `n` commits fail with a transient error
    pub fn fail_next_commits(&self, n: usize) {
        self.failing_commits.store(n, Ordering::SeqCst);
    }

    /// Number of transactions started so far
    pub fn begun(&self) -> usize {
        self.begun.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReactionRepository for InMemoryReactions {
    async fn begin(&self) -> RepoResult<Box<dyn ReactionTransaction>> {
        self.begun.fetch_add(1, Ordering::SeqCst);
        let guard = Arc::clone(&self.tables).lock_owned().await;
        let staged = (*guard).clone();
        let fail_commit = self
            .failing_commits
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();

        Ok(Box::new(InMemoryTransaction {
            guard,
            staged,
            fail_commit,
        }))
    }

    async fn find(&self, article_id: ArticleId, user_id: UserId) -> RepoResult<Option<ReactionRecord>> {
        Ok(self.tables.lock().await.reactions.get(&(article_id, user_id)).cloned())
    }

    async fn cached_counts(&self, article_id: ArticleId) -> RepoResult<Vec<AggregateCount>> {
        Ok(self
            .tables
            .lock()
            .await
            .counts
            .iter()
            .filter(|((a, _), _)| *a == article_id)
            .map(|(&(a, kind), &count)| AggregateCount::new(a, kind, count))
            .collect())
    }
}

struct InMemoryTransaction {
    guard: OwnedMutexGuard<Tables>,
    staged: Tables,
    fail_commit: bool,
}

#[async_trait]
impl ReactionTransaction for InMemoryTransaction {
    async fn claim(&mut self, draft: &ReactionRecord) -> RepoResult<ReactionSlot> {
        let key = (draft.article_id, draft.user_id);
        if let Some(existing) = self.staged.reactions.get(&key) {
            return Ok(ReactionSlot::Existing(existing.clone()));
        }
        self.staged.reactions.insert(key, draft.clone());
        Ok(ReactionSlot::Inserted(draft.clone()))
    }

    async fn update_kind(
        &mut self,
        article_id: ArticleId,
        user_id: UserId,
        kind: ReactionKind,
    ) -> RepoResult<()> {
        if let Some(record) = self.staged.reactions.get_mut(&(article_id, user_id)) {
            record.kind = kind;
        }
        Ok(())
    }

    async fn delete(&mut self, article_id: ArticleId, user_id: UserId) -> RepoResult<()> {
        self.staged.reactions.remove(&(article_id, user_id));
        Ok(())
    }

    async fn lock_count(&mut self, article_id: ArticleId, kind: ReactionKind) -> RepoResult<i64> {
        Ok(*self.staged.counts.entry((article_id, kind)).or_insert(0))
    }

    async fn count_reactions(&mut self, article_id: ArticleId, kind: ReactionKind) -> RepoResult<i64> {
        let count = self
            .staged
            .reactions
            .values()
            .filter(|r| r.article_id == article_id && r.kind == kind)
            .count();
        Ok(count as i64)
    }

    async fn store_count(
        &mut self,
        article_id: ArticleId,
        kind: ReactionKind,
        count: i64,
    ) -> RepoResult<()> {
        self.staged.counts.insert((article_id, kind), count);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        if self.fail_commit {
            return Err(DomainError::TransactionFailure(
                "simulated serialization failure".to_string(),
            ));
        }
        let InMemoryTransaction {
            mut guard, staged, ..
        } = *self;
        *guard = staged;
        Ok(())
    }
}

pub struct InMemoryArticles {
    ids: HashSet<ArticleId>,
}

impl InMemoryArticles {
    pub fn with(ids: impl IntoIterator<Item = ArticleId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }
}

#[async_trait]
impl ArticleDirectory for InMemoryArticles {
    async fn exists(&self, article_id: ArticleId) -> RepoResult<bool> {
        Ok(self.ids.contains(&article_id))
    }
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<DomainEvent>>,
}

impl RecordingSink {
    pub fn drift_events(&self) -> Vec<ReactionCountDriftedEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                DomainEvent::ReactionCountDrifted(d) => Some(d.clone()),
                DomainEvent::ReactionToggled(_) => None,
            })
            .collect()
    }

    pub fn toggle_events(&self) -> Vec<ReactionToggledEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                DomainEvent::ReactionToggled(t) => Some(t.clone()),
                DomainEvent::ReactionCountDrifted(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn emit(&self, event: &DomainEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Context over in-memory collaborators; the pools never connect
pub fn test_context(
    reactions: Arc<InMemoryReactions>,
    articles: Arc<InMemoryArticles>,
    sink: Arc<RecordingSink>,
    config: ReactionConfig,
) -> ServiceContext {
    let pool = PgPool::connect_lazy("postgres://localhost/newsroom_unused").unwrap();
    let redis_pool = RedisPool::new(RedisPoolConfig::default()).unwrap();

    ServiceContextBuilder::new()
        .pool(pool)
        .redis_pool(redis_pool)
        .reaction_repo(reactions)
        .article_directory(articles)
        .event_sink(sink)
        .jwt_service(Arc::new(JwtService::new("test-secret", 900)))
        .reaction_config(config)
        .build()
        .unwrap()
}
