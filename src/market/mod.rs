// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Market data aggregation module
//!
//! Assembles a best-effort "market pulse" snapshot from several uncontrolled
//! external sources:
//! - a statistics-bureau release page (quarterly YoY house price changes)
//! - two regional property-index pages (average price, one-year change)
//! - RSS news feeds (latest headlines)
//!
//! Key properties:
//! - every source pipeline runs concurrently and settles independently
//! - a dead source degrades its own slot only, never the whole snapshot
//! - pattern misses in the scraped prose are nulls, not errors
//! - TTL-based snapshot caching

pub mod cache;
pub mod config;
pub mod news;
pub mod price_index;
pub mod service;
pub mod statistics;
pub mod text;
pub mod types;

// Re-export commonly used types
pub use cache::SnapshotCache;
pub use config::{MarketConfig, NewsFeed};
pub use service::MarketService;
pub use types::{FetchError, MarketSnapshot, NewsItem, PriceIndexSummary, StatisticsSummary};
