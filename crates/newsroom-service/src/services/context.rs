//! Service context - dependency container for services
//!
//! Holds the repositories, event sink, and other dependencies needed by services.

use std::sync::Arc;
use std::time::Duration;

use newsroom_cache::{Publisher, RedisPool};
use newsroom_common::auth::JwtService;
use newsroom_common::ReactionConfig;
use newsroom_core::{ArticleDirectory, EventSink, ReactionRepository};
use newsroom_db::{PgArticleDirectory, PgPool, PgReactionRepository};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Repositories and the event sink are trait objects, so tests can swap in
/// in-memory implementations while the pools stay lazily connected.
#[derive(Clone)]
pub struct ServiceContext {
    // Connection pools, used directly only by readiness probes
    pool: PgPool,
    redis_pool: RedisPool,

    // Repositories
    reaction_repo: Arc<dyn ReactionRepository>,
    article_directory: Arc<dyn ArticleDirectory>,

    // Events
    event_sink: Arc<dyn EventSink>,

    // Services
    jwt_service: Arc<JwtService>,
    reaction_config: ReactionConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        pool: PgPool,
        redis_pool: RedisPool,
        reaction_repo: Arc<dyn ReactionRepository>,
        article_directory: Arc<dyn ArticleDirectory>,
        event_sink: Arc<dyn EventSink>,
        jwt_service: Arc<JwtService>,
        reaction_config: ReactionConfig,
    ) -> Self {
        Self {
            pool,
            redis_pool,
            reaction_repo,
            article_directory,
            event_sink,
            jwt_service,
            reaction_config,
        }
    }

    /// Wire the PostgreSQL repositories and the Redis publisher
    pub fn from_pools(
        pool: PgPool,
        redis_pool: RedisPool,
        jwt_service: Arc<JwtService>,
        reaction_config: ReactionConfig,
    ) -> Self {
        let reaction_repo = PgReactionRepository::new(pool.clone())
            .with_lock_timeout(Duration::from_millis(reaction_config.lock_timeout_ms));
        let article_directory = PgArticleDirectory::new(pool.clone());
        let publisher = Publisher::new(redis_pool.clone());

        Self::new(
            pool,
            redis_pool,
            Arc::new(reaction_repo),
            Arc::new(article_directory),
            Arc::new(publisher),
            jwt_service,
            reaction_config,
        )
    }

    // === Pools ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &RedisPool {
        &self.redis_pool
    }

    // === Repositories ===

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    /// Get the article directory
    pub fn article_directory(&self) -> &dyn ArticleDirectory {
        self.article_directory.as_ref()
    }

    // === Events ===

    /// Get the domain event sink
    pub fn event_sink(&self) -> &dyn EventSink {
        self.event_sink.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the reaction tuning
    pub fn reaction_config(&self) -> &ReactionConfig {
        &self.reaction_config
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &self.redis_pool)
            .field("repositories", &"...")
            .field("reaction_config", &self.reaction_config)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<RedisPool>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    article_directory: Option<Arc<dyn ArticleDirectory>>,
    event_sink: Option<Arc<dyn EventSink>>,
    jwt_service: Option<Arc<JwtService>>,
    reaction_config: Option<ReactionConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: RedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn article_directory(mut self, directory: Arc<dyn ArticleDirectory>) -> Self {
        self.article_directory = Some(directory);
        self
    }

    pub fn event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = Some(sink);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn reaction_config(mut self, config: ReactionConfig) -> Self {
        self.reaction_config = Some(config);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let missing = |name: &str| ServiceError::validation(format!("{name} is required"));

        Ok(ServiceContext::new(
            self.pool.ok_or_else(|| missing("pool"))?,
            self.redis_pool.ok_or_else(|| missing("redis_pool"))?,
            self.reaction_repo.ok_or_else(|| missing("reaction_repo"))?,
            self.article_directory.ok_or_else(|| missing("article_directory"))?,
            self.event_sink.ok_or_else(|| missing("event_sink"))?,
            self.jwt_service.ok_or_else(|| missing("jwt_service"))?,
            self.reaction_config.unwrap_or_default(),
        ))
    }
}
