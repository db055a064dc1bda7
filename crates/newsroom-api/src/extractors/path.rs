//! Path parameter extractors
//!
//! Type-safe extraction of article ids from path parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use newsroom_core::ArticleId;
use serde::Deserialize;

use crate::response::ApiError;

#[derive(Debug, Deserialize)]
struct ArticleIdParams {
    article_id: String,
}

/// The `:article_id` segment, parsed as a positive [`ArticleId`]
#[derive(Debug, Clone, Copy)]
pub struct ArticleIdPath(pub ArticleId);

#[async_trait]
impl<S> FromRequestParts<S> for ArticleIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<ArticleIdParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        ArticleId::parse(&params.article_id)
            .map(ArticleIdPath)
            .map_err(|e| ApiError::invalid_path(format!("Invalid article_id: {e}")))
    }
}
