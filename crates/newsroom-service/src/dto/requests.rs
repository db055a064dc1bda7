//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

/// Submit (toggle) a reaction on an article
///
/// `kind` is kept as a string and carries no shape rules, so every value
/// outside the reaction set (empty and oversized included) surfaces as
/// `INVALID_REACTION_KIND` instead of a generic body rejection.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitReactionRequest {
    pub kind: String,
}

impl SubmitReactionRequest {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}
