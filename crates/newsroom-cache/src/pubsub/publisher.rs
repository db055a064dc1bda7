//! Redis Pub/Sub publisher.

use async_trait::async_trait;
use newsroom_core::{DomainEvent, EventSink};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

use crate::pool::{RedisPool, RedisResult};
use crate::pubsub::PubSubChannel;

/// Envelope for Pub/Sub messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubSubEvent {
    /// Event type name (e.g., "REACTION_TOGGLED")
    pub event_type: String,
    /// Event payload
    pub data: serde_json::Value,
}

impl PubSubEvent {
    /// Create a new event
    #[must_use]
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    /// Wrap a domain event
    pub fn from_domain(event: &DomainEvent) -> Result<Self, serde_json::Error> {
        Ok(Self::new(event.event_type(), serde_json::to_value(event)?))
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Redis Pub/Sub publisher
#[derive(Clone)]
pub struct Publisher {
    pool: RedisPool,
}

impl Publisher {
    /// Create a new publisher
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Publish an event to a channel, returning the number of receivers
    pub async fn publish(&self, channel: &PubSubChannel, event: &PubSubEvent) -> RedisResult<u32> {
        let mut conn = self.pool.get().await?;
        let channel_name = channel.name();
        let payload = event.to_json()?;

        let receivers: u32 = self
            .pool
            .bounded(conn.publish(&channel_name, &payload))
            .await?;

        tracing::debug!(
            channel = %channel_name,
            event_type = %event.event_type,
            receivers = receivers,
            "Published event"
        );

        Ok(receivers)
    }

    /// Publish a domain event to the channel it is routed to
    pub async fn publish_domain_event(&self, event: &DomainEvent) -> RedisResult<u32> {
        let envelope = PubSubEvent::from_domain(event)?;
        self.publish(&PubSubChannel::for_event(event), &envelope).await
    }
}

#[async_trait]
impl EventSink for Publisher {
    async fn emit(&self, event: &DomainEvent) {
        if let Err(e) = self.publish_domain_event(event).await {
            tracing::warn!(
                event_type = event.event_type(),
                article_id = %event.article_id(),
                error = %e,
                "Failed to publish event"
            );
        }
    }
}
