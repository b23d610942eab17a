// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Market snapshot API response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::market::{MarketSnapshot, NewsItem, PriceIndexSummary, StatisticsSummary};

/// Response body for GET /v1/market/snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshotResponse {
    /// Statistics-bureau summary, if available
    pub statistics: Option<StatisticsSummary>,

    /// Karachi price-index summary, if available
    pub karachi: Option<PriceIndexSummary>,

    /// Country-wide price-index summary, if available
    pub pakistan: Option<PriceIndexSummary>,

    /// Headlines from all feeds, in configured feed order
    pub news: Vec<NewsItem>,

    /// Number of headlines returned
    pub headline_count: usize,

    /// When the snapshot was assembled (UTC)
    pub generated_at: DateTime<Utc>,

    /// Time this request spent obtaining the snapshot, in milliseconds
    pub fetch_time_ms: u64,
}

impl MarketSnapshotResponse {
    /// Create a response from an assembled snapshot
    pub fn new(snapshot: MarketSnapshot, fetch_time_ms: u64) -> Self {
        Self {
            statistics: snapshot.statistics,
            karachi: snapshot.karachi,
            pakistan: snapshot.pakistan,
            headline_count: snapshot.news.len(),
            news: snapshot.news,
            generated_at: snapshot.generated_at,
            fetch_time_ms,
        }
    }
}
