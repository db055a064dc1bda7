//! Entity to model mappers
//!
//! Conversions between domain entities (newsroom-core) and database models.
//! - `TryFrom<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert` structs: Prepare entity data for database operations

mod reaction;

pub use reaction::ReactionInsert;
