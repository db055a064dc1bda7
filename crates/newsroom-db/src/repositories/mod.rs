//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in newsroom-core.

mod article;
mod error;
mod reaction;

pub use article::PgArticleDirectory;
pub use reaction::{PgReactionRepository, PgReactionTransaction};
