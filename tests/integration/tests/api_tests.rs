//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL (JWT_SECRET optional)
//!
//! Run with: cargo test -p integration-tests --test api_tests

use futures::future::join_all;
use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use newsroom_core::ArticleId;
use reqwest::StatusCode;

async fn counts(server: &TestServer, article: ArticleId) -> CountsBody {
    let response = server
        .get(&format!("{}/counts", reactions_path(article)))
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn toggle(server: &TestServer, token: &str, article: ArticleId, kind: &str) -> ToggleBody {
    let response = server
        .post_auth(&reactions_path(article), token, &SubmitReaction::new(kind))
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Toggle Tests
// ============================================================================

#[tokio::test]
async fn test_first_reaction_is_created() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let article = create_article(&server.pool).await.unwrap();
    let token = server.token_for(unique_user()).unwrap();

    let body = toggle(&server, &token, article, "heart").await;
    assert!(!body.removed);
    assert_eq!(body.kind, "heart");

    let counts = counts(&server, article).await;
    assert_eq!(counts.heart, 1);
    assert_eq!(stored_count(&server.pool, article, "heart").await.unwrap(), Some(1));
}

#[tokio::test]
async fn test_same_kind_twice_removes_reaction() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let article = create_article(&server.pool).await.unwrap();
    let token = server.token_for(unique_user()).unwrap();

    toggle(&server, &token, article, "heart").await;
    let body = toggle(&server, &token, article, "heart").await;
    assert!(body.removed);
    assert_eq!(body.kind, "heart");

    assert_eq!(counts(&server, article).await.heart, 0);

    let response = server
        .get_auth(&format!("{}/@me", reactions_path(article)), &token)
        .await
        .unwrap();
    let me: UserReactionBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!me.has_reaction);
    assert!(me.kind.is_none());
}

#[tokio::test]
async fn test_switch_moves_the_count() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let article = create_article(&server.pool).await.unwrap();
    let token = server.token_for(unique_user()).unwrap();

    toggle(&server, &token, article, "heart").await;
    let body = toggle(&server, &token, article, "laugh").await;
    assert!(!body.removed);
    assert_eq!(body.kind, "laugh");

    let counts = counts(&server, article).await;
    assert_eq!(counts.heart, 0);
    assert_eq!(counts.laugh, 1);

    let response = server
        .get_auth(&format!("{}/@me", reactions_path(article)), &token)
        .await
        .unwrap();
    let me: UserReactionBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(me.has_reaction);
    assert_eq!(me.kind.as_deref(), Some("laugh"));
}

#[tokio::test]
async fn test_concurrent_users_all_counted() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let article = create_article(&server.pool).await.unwrap();
    let tokens: Vec<String> = (0..20)
        .map(|_| server.token_for(unique_user()).unwrap())
        .collect();

    let results = join_all(
        tokens
            .iter()
            .map(|token| toggle(&server, token, article, "thumbsUp")),
    )
    .await;

    assert!(results.iter().all(|body| !body.removed));
    assert_eq!(counts(&server, article).await.thumbs_up, 20);
    assert_eq!(
        stored_count(&server.pool, article, "thumbsUp").await.unwrap(),
        Some(20)
    );
}

// ============================================================================
// Reconciliation Tests
// ============================================================================

#[tokio::test]
async fn test_read_heals_corrupted_count() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let article = create_article(&server.pool).await.unwrap();
    corrupt_count(&server.pool, article, "heart", 99).await.unwrap();

    assert_eq!(counts(&server, article).await.heart, 0);
    assert_eq!(stored_count(&server.pool, article, "heart").await.unwrap(), Some(0));
}

#[tokio::test]
async fn test_toggle_heals_corrupted_count() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let article = create_article(&server.pool).await.unwrap();
    corrupt_count(&server.pool, article, "sad", 5).await.unwrap();

    let token = server.token_for(unique_user()).unwrap();
    toggle(&server, &token, article, "sad").await;

    assert_eq!(stored_count(&server.pool, article, "sad").await.unwrap(), Some(1));
}

// ============================================================================
// Summary Tests
// ============================================================================

#[tokio::test]
async fn test_summary_with_and_without_viewer() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let article = create_article(&server.pool).await.unwrap();
    let alice = server.token_for(unique_user()).unwrap();
    let bob = server.token_for(unique_user()).unwrap();

    toggle(&server, &alice, article, "angry").await;
    toggle(&server, &bob, article, "heart").await;

    let response = server.get(&reactions_path(article)).await.unwrap();
    let anonymous: SummaryBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(anonymous.article_id, article.into_inner());
    assert_eq!(anonymous.total, 2);
    assert_eq!(anonymous.counts.angry, 1);
    assert_eq!(anonymous.counts.heart, 1);
    assert!(anonymous.me.is_none());

    let response = server.get_auth(&reactions_path(article), &alice).await.unwrap();
    let viewer: SummaryBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(viewer.me.as_deref(), Some("angry"));
}

// ============================================================================
// Error Tests
// ============================================================================

#[tokio::test]
async fn test_invalid_kind_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let article = create_article(&server.pool).await.unwrap();
    let token = server.token_for(unique_user()).unwrap();

    let response = server
        .post_auth(&reactions_path(article), &token, &SubmitReaction::new("wow"))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INVALID_REACTION_KIND");

    assert_eq!(stored_count(&server.pool, article, "heart").await.unwrap(), None);
}

#[tokio::test]
async fn test_unknown_article_is_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.token_for(unique_user()).unwrap();
    let missing = ArticleId::new(i64::MAX);

    let response = server
        .post_auth(&reactions_path(missing), &token, &SubmitReaction::new("heart"))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.code, "UNKNOWN_ARTICLE");

    let response = server
        .get(&format!("{}/counts", reactions_path(missing)))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_submit_without_token_is_unauthorized() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let article = create_article(&server.pool).await.unwrap();

    let response = server
        .post(&reactions_path(article), &SubmitReaction::new("heart"))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}
