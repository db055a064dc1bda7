//! # newsroom-core
//!
//! Domain layer for article reactions: entities, the toggle state machine,
//! value objects, repository traits, and domain events.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AggregateCount, ReactionCounts, ReactionKind, ReactionRecord, ReactionState, ToggleAction,
    ToggleOutcome,
};
pub use error::DomainError;
pub use events::{DomainEvent, ReactionCountDriftedEvent, ReactionToggledEvent};
pub use traits::{
    ArticleDirectory, EventSink, ReactionRepository, ReactionSlot, ReactionTransaction,
    RepoResult,
};
pub use value_objects::{ArticleId, IdParseError, UserId};
