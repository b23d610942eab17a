// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP API server
//!
//! Serves the assembled market snapshot to the page-rendering layer. Source
//! failures never surface as HTTP errors here; a degraded snapshot is still
//! a 200 with null/empty fields.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use crate::market::MarketService;
use crate::version;

use super::market::snapshot_handler;

/// Shared state for API handlers
#[derive(Clone)]
pub struct AppState {
    /// The market aggregation service
    pub market: Arc<MarketService>,
}

impl AppState {
    /// Create state around a market service
    pub fn new(market: MarketService) -> Self {
        Self {
            market: Arc::new(market),
        }
    }
}

/// Build the API router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Market pulse snapshot
        .route("/v1/market/snapshot", get(snapshot_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Start the API server on the given address
pub async fn start_server(
    addr: SocketAddr,
    service: MarketService,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_app(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler(State(_state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": version::get_version_info(),
    }))
}
