//! # newsroom-cache
//!
//! Redis layer used to fan out reaction events.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Pub/Sub**: Committed toggles go to `article:{id}`, drift reports to
//!   `reactions:diagnostics`
//!
//! ## Example
//!
//! ```ignore
//! use newsroom_cache::{Publisher, RedisPool, RedisPoolConfig};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let publisher = Publisher::new(pool);
//!
//! // Publisher implements EventSink and can be handed to the service layer
//! publisher.publish_domain_event(&event).await?;
//! ```

pub mod pool;
pub mod pubsub;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export pubsub types
pub use pubsub::{
    PubSubChannel, PubSubEvent, Publisher, ARTICLE_CHANNEL_PREFIX, DIAGNOSTICS_CHANNEL,
};
