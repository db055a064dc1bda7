//! Route definitions
//!
//! Reaction routes are mounted under /api/v1; health routes sit at the root.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{health, reactions};
use crate::state::AppState;

/// Create the API router (health routes are separate so they skip rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new().merge(reaction_routes())
}

/// Article reaction routes
fn reaction_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/articles/:article_id/reactions",
            get(reactions::get_summary).post(reactions::submit_reaction),
        )
        .route(
            "/articles/:article_id/reactions/counts",
            get(reactions::get_counts),
        )
        .route(
            "/articles/:article_id/reactions/@me",
            get(reactions::get_own_reaction),
        )
}
