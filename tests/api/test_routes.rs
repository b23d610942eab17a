// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Route registration tests for the market API
//!
//! These tests verify that:
//! - The /health and /v1/market/snapshot routes are registered
//! - The snapshot route accepts GET and rejects other methods
//! - A fully-degraded snapshot is still a 200 with null/empty fields
//! - Unknown routes return 404

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use fabstir_market_node::{
    api::http_server::{create_app, AppState},
    market::{MarketConfig, MarketService},
};
use tower::util::ServiceExt; // for `oneshot`

/// Nothing listens on port 1; connections are refused immediately
const DEAD_URL: &str = "http://127.0.0.1:1/";

/// Helper: AppState whose every upstream source is unreachable
fn setup_degraded_state() -> AppState {
    let mut config = MarketConfig::default();
    config.statistics_url = DEAD_URL.to_string();
    config.karachi_index_url = DEAD_URL.to_string();
    config.pakistan_index_url = DEAD_URL.to_string();
    config.news_feeds = vec![];
    config.fetch_timeout_secs = 2;
    config.cache_ttl_secs = 0;

    AppState::new(MarketService::new(config))
}

#[tokio::test]
async fn test_health_route_registered() {
    let app = create_app(setup_degraded_state());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert!(body["version"]["features"].is_array());
}

#[tokio::test]
async fn test_snapshot_route_registered() {
    let app = create_app(setup_degraded_state());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/v1/market/snapshot")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    // Route should exist (not 404 Not Found for missing route)
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_degraded_snapshot_is_still_a_200() {
    let app = create_app(setup_degraded_state());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/v1/market/snapshot")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    // The shape is fully present even when every source is down
    assert!(body["statistics"].is_null());
    assert!(body["karachi"].is_null());
    assert!(body["pakistan"].is_null());
    assert_eq!(body["news"].as_array().unwrap().len(), 0);
    assert_eq!(body["headlineCount"], 0);
    assert!(body["generatedAt"].is_string());
}

#[tokio::test]
async fn test_snapshot_route_rejects_post() {
    let app = create_app(setup_degraded_state());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/v1/market/snapshot")
        .header("content-type", "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = create_app(setup_degraded_state());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/v1/market/listings")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
