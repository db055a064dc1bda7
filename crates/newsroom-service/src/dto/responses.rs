//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use newsroom_core::{ArticleId, ReactionCounts, ReactionKind};
use serde::Serialize;

// ============================================================================
// Reaction Responses
// ============================================================================

/// Result of a toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleResponse {
    /// True when the submission cleared the caller's reaction
    pub removed: bool,
    /// The submitted kind
    pub kind: ReactionKind,
}

/// The caller's reaction on an article
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserReactionResponse {
    pub has_reaction: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ReactionKind>,
}

/// Counts plus, for an authenticated caller, their own reaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionSummaryResponse {
    pub article_id: ArticleId,
    pub counts: ReactionCounts,
    pub total: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub me: Option<ReactionKind>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

fn health_label(healthy: bool) -> String {
    if healthy { "healthy" } else { "unhealthy" }.to_string()
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, redis_healthy: bool) -> Self {
        let all_healthy = database_healthy && redis_healthy;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: health_label(database_healthy),
                redis: health_label(redis_healthy),
            },
        }
    }
}
