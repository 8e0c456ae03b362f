//! API route configuration.

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Ad campaigns
        .route("/api/v1/ads", post(handlers::create_ad))
        .route("/api/v1/ads/:id", get(handlers::get_ad))
        .route("/api/v1/ads/:id/status", put(handlers::update_ad_status))
        .route("/api/v1/ads/:id/budget", put(handlers::update_ad_budget))
        // Publishers
        .route("/api/v1/publishers", post(handlers::register_publisher))
        .route("/api/v1/publishers/:id", get(handlers::get_publisher))
        .route("/api/v1/publishers/:id/ad-spaces", put(handlers::update_ad_spaces))
        .route("/api/v1/publishers/:id/earnings", post(handlers::record_earnings))
        // Registry stats
        .route("/api/v1/stats", get(handlers::get_stats))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::handlers::CALLER_HEADER;
    use crate::state::ApiConfig;

    const ALICE: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";
    const BOB: &str = "ST2PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";

    async fn test_app() -> Router {
        let state = Arc::new(AppState::new(ApiConfig::default()).await.unwrap());
        create_router(state)
    }

    fn post_json(uri: &str, caller: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header(CALLER_HEADER, caller)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn put_json(uri: &str, caller: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header("content-type", "application/json")
            .header(CALLER_HEADER, caller)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = test_app().await;

        let response = app.oneshot(get_req("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_and_get_ad() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/ads",
                ALICE,
                serde_json::json!({
                    "content_url": "https://example.com/ad1",
                    "target_demographics": ["male", "18-35"],
                    "budget": 1000,
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["ad_id"], 1);

        let response = app.oneshot(get_req("/api/v1/ads/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let ad = body_json(response).await;
        assert_eq!(ad["advertiser"], ALICE);
        assert_eq!(ad["status"], "active");
        assert_eq!(ad["budget"], 1000);
    }

    #[tokio::test]
    async fn test_missing_caller_header_rejected() {
        let app = test_app().await;

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/ads")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({"content_url": "u", "budget": 0}).to_string(),
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_status_wrong_owner_forbidden() {
        let app = test_app().await;

        app.clone()
            .oneshot(post_json(
                "/api/v1/ads",
                ALICE,
                serde_json::json!({"content_url": "u", "budget": 100}),
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(put_json(
                "/api/v1/ads/1/status",
                BOB,
                serde_json::json!({"status": "completed"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        // Record unchanged
        let response = app.oneshot(get_req("/api/v1/ads/1")).await.unwrap();
        let ad = body_json(response).await;
        assert_eq!(ad["status"], "active");
    }

    #[tokio::test]
    async fn test_get_missing_ad_not_found() {
        let app = test_app().await;

        let response = app.oneshot(get_req("/api/v1/ads/999")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_publisher_flow() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/publishers",
                ALICE,
                serde_json::json!({"website": "https://example.com", "ad_spaces": ["header"]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["publisher_id"], 1);

        // Any caller may credit earnings
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/publishers/1/earnings",
                BOB,
                serde_json::json!({"amount": 100}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/publishers/1/earnings",
                BOB,
                serde_json::json!({"amount": 150}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app.oneshot(get_req("/api/v1/publishers/1")).await.unwrap();
        let publisher = body_json(response).await;
        assert_eq!(publisher["earnings"], 250);
    }

    #[tokio::test]
    async fn test_stats() {
        let app = test_app().await;

        app.clone()
            .oneshot(post_json(
                "/api/v1/ads",
                ALICE,
                serde_json::json!({"content_url": "u", "budget": 1000}),
            ))
            .await
            .unwrap();

        let response = app.oneshot(get_req("/api/v1/stats")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let stats = body_json(response).await;
        assert_eq!(stats["ads"]["total_count"], 1);
        assert_eq!(stats["ads"]["total_budget"], 1000);
        assert_eq!(stats["publishers"]["total_count"], 0);
    }
}
