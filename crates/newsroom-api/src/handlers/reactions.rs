//! Reaction handlers
//!
//! Endpoints for article reactions, mounted under
//! `/articles/{article_id}/reactions`.

use axum::{extract::State, Json};
use newsroom_core::ReactionCounts;
use newsroom_service::{
    ReactionService, ReactionSummaryResponse, SubmitReactionRequest, ToggleResponse,
    UserReactionResponse,
};

use crate::extractors::{ArticleIdPath, AuthUser, OptionalAuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Submit a reaction; submitting the current kind again removes it
///
/// POST /articles/{article_id}/reactions
pub async fn submit_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ArticleIdPath(article_id): ArticleIdPath,
    ValidatedJson(request): ValidatedJson<SubmitReactionRequest>,
) -> ApiResult<Json<ToggleResponse>> {
    let service = ReactionService::new(state.service_context());
    let response = service.submit(auth.user_id, article_id, request).await?;
    Ok(Json(response))
}

/// Per-kind counts
///
/// GET /articles/{article_id}/reactions/counts
pub async fn get_counts(
    State(state): State<AppState>,
    ArticleIdPath(article_id): ArticleIdPath,
) -> ApiResult<Json<ReactionCounts>> {
    let service = ReactionService::new(state.service_context());
    let counts = service.get_counts(article_id).await?;
    Ok(Json(counts))
}

/// GET /articles/{article_id}/reactions/@me
pub async fn get_own_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ArticleIdPath(article_id): ArticleIdPath,
) -> ApiResult<Json<UserReactionResponse>> {
    let service = ReactionService::new(state.service_context());
    let reaction = service.get_user_reaction(article_id, auth.user_id).await?;
    Ok(Json(reaction))
}

/// Counts and total; includes the caller's own kind when authenticated
///
/// GET /articles/{article_id}/reactions
pub async fn get_summary(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    ArticleIdPath(article_id): ArticleIdPath,
) -> ApiResult<Json<ReactionSummaryResponse>> {
    let service = ReactionService::new(state.service_context());
    let summary = service.get_summary(article_id, viewer.user_id()).await?;
    Ok(Json(summary))
}
