// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Market snapshot orchestration
//!
//! Runs every source pipeline concurrently, waits for all of them to settle,
//! and assembles whatever survived. One dead source never takes the others
//! down with it; the caller always gets a complete (possibly partially-null)
//! snapshot.

use std::time::{Duration, Instant};

use chrono::Utc;
use futures::future::join_all;
use reqwest::Client;
use tracing::{debug, info, warn};

use super::cache::SnapshotCache;
use super::config::MarketConfig;
use super::news::NewsFetcher;
use super::price_index::PriceIndexFetcher;
use super::statistics::StatisticsFetcher;
use super::types::{FetchError, MarketSnapshot};

/// Main service assembling the market snapshot from all configured sources
pub struct MarketService {
    statistics: StatisticsFetcher,
    price_index: PriceIndexFetcher,
    news: NewsFetcher,
    cache: SnapshotCache,
    config: MarketConfig,
}

impl MarketService {
    /// Create a new market service from configuration
    pub fn new(config: MarketConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .user_agent("Mozilla/5.0 (compatible; FabstirBot/1.0; +https://fabstir.com)")
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        let statistics = StatisticsFetcher::new(
            client.clone(),
            config.statistics_url.clone(),
            config.statistics_label.clone(),
        );
        let price_index = PriceIndexFetcher::new(client.clone());
        let news = NewsFetcher::new(client, config.items_per_feed);
        let cache = SnapshotCache::new(config.cache_ttl_secs);

        Self {
            statistics,
            price_index,
            news,
            cache,
            config,
        }
    }

    /// Get the market snapshot, serving a cached copy while it is fresh
    ///
    /// Never fails: individual source failures are absorbed and leave their
    /// slot null (or contribute no headlines).
    pub async fn snapshot(&self) -> MarketSnapshot {
        if let Some(cached) = self.cache.get() {
            debug!("Serving market snapshot from cache");
            return cached;
        }

        let snapshot = self.assemble().await;
        self.cache.insert(&snapshot);
        snapshot
    }

    /// Fetch every source concurrently and wait for all of them to settle
    async fn assemble(&self) -> MarketSnapshot {
        let start = Instant::now();

        let (statistics, karachi, pakistan, feed_results) = tokio::join!(
            self.statistics.fetch(),
            self.price_index
                .fetch("karachi index", &self.config.karachi_index_url),
            self.price_index
                .fetch("pakistan index", &self.config.pakistan_index_url),
            join_all(
                self.config
                    .news_feeds
                    .iter()
                    .map(|feed| self.news.fetch(feed)),
            ),
        );

        // Feeds settle independently too: one dead feed only loses its own
        // headlines, in configured feed order
        let mut news = Vec::new();
        for result in feed_results {
            if let Some(items) = settled(result) {
                news.extend(items);
            }
        }

        let snapshot = MarketSnapshot {
            statistics: settled(statistics),
            karachi: settled(karachi),
            pakistan: settled(pakistan),
            news,
            generated_at: Utc::now(),
        };

        info!(
            "Market snapshot assembled in {}ms (statistics: {}, karachi: {}, pakistan: {}, headlines: {})",
            start.elapsed().as_millis(),
            snapshot.statistics.is_some(),
            snapshot.karachi.is_some(),
            snapshot.pakistan.is_some(),
            snapshot.news.len(),
        );

        snapshot
    }

    /// Drop the cached snapshot so the next call re-fetches
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// The configuration this service was built with
    pub fn config(&self) -> &MarketConfig {
        &self.config
    }
}

/// Convert a settled pipeline result into its slot value, logging the loss
fn settled<T>(result: Result<T, FetchError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Market source degraded: {}", e);
            None
        }
    }
}
