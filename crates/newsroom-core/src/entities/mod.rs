//! Domain entities - core business objects

mod reaction;
mod toggle;

pub use reaction::{AggregateCount, ReactionCounts, ReactionKind, ReactionRecord};
pub use toggle::{ReactionState, ToggleAction, ToggleOutcome};
