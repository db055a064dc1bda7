//! Redis Pub/Sub module.
//!
//! Publishes reaction events for consumers outside this process.

mod channels;
mod publisher;

pub use channels::{PubSubChannel, ARTICLE_CHANNEL_PREFIX, DIAGNOSTICS_CHANNEL};
pub use publisher::{PubSubEvent, Publisher};
