// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Market snapshot API endpoint handler

use std::time::Instant;

use axum::{extract::State, Json};
use tracing::info;

use super::response::MarketSnapshotResponse;
use crate::api::http_server::AppState;

/// GET /v1/market/snapshot - Get the assembled market pulse snapshot
///
/// # Response
/// - `statistics`: statistics-bureau summary, or null if that source failed
/// - `karachi`, `pakistan`: regional price-index summaries, or null
/// - `news`: flattened headline list, empty when every feed failed
/// - `headlineCount`: number of headlines returned
/// - `generatedAt`: when the snapshot was assembled (UTC)
/// - `fetchTimeMs`: time this request spent obtaining the snapshot
///
/// Always 200: consumers render "Data unavailable" style fallbacks for null
/// fields instead of receiving an error status.
pub async fn snapshot_handler(State(state): State<AppState>) -> Json<MarketSnapshotResponse> {
    let start = Instant::now();

    let snapshot = state.market.snapshot().await;
    let fetch_time_ms = start.elapsed().as_millis() as u64;

    info!(
        "Market snapshot served: {} headlines in {}ms",
        snapshot.news.len(),
        fetch_time_ms
    );

    Json(MarketSnapshotResponse::new(snapshot, fetch_time_ms))
}
