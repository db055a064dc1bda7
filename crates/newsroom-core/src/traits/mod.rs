//! Ports implemented by the infrastructure crates

mod repositories;

pub use repositories::{
    ArticleDirectory, EventSink, ReactionRepository, ReactionSlot, ReactionTransaction,
    RepoResult,
};
