//! Business logic services
//!
//! The reaction subsystem, leaf-first: the reaction store, the aggregate
//! cache, the reconciliation engine, and the toggle protocol driven by
//! `ReactionService`.

pub mod aggregate;
pub mod context;
pub mod error;
pub mod reaction;
pub mod reconcile;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregate::{AggregateCache, Recount};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use reaction::ReactionService;
pub use reconcile::{Reconciliation, ReconciliationEngine};
pub use store::ReactionStore;
