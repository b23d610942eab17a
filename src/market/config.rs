// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for market data aggregation

use std::env;

use url::Url;

/// One news feed to pull headlines from
#[derive(Debug, Clone)]
pub struct NewsFeed {
    /// Display label attached to every headline from this feed
    pub label: String,
    /// Feed URL (RSS/XML)
    pub url: String,
}

/// Configuration for market data aggregation
///
/// All options are fixed at deploy time; URLs and tuning knobs can be
/// overridden through the environment but never change at runtime.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// Statistics-bureau release page URL
    pub statistics_url: String,
    /// Display label for the statistics source
    pub statistics_label: String,
    /// Property-index page for the Karachi region
    pub karachi_index_url: String,
    /// Property-index page for the country-wide index
    pub pakistan_index_url: String,
    /// News feeds, in display order
    pub news_feeds: Vec<NewsFeed>,
    /// Accepted headlines per feed
    pub items_per_feed: usize,
    /// Per-request timeout in seconds
    pub fetch_timeout_secs: u64,
    /// Snapshot cache TTL in seconds (0 disables caching)
    pub cache_ttl_secs: u64,
}

const BIS_RELEASE_URL: &str = "https://www.bis.org/statistics/pp_residential.htm";
const ZAMEEN_KARACHI_URL: &str = "https://www.zameen.com/index/buy/houses/karachi-2/";
const ZAMEEN_PAKISTAN_URL: &str = "https://www.zameen.com/index/buy/houses/pakistan-1521/";

fn default_news_feeds() -> Vec<NewsFeed> {
    vec![
        NewsFeed {
            label: "Commercial real estate (Canada)".to_string(),
            url: "https://www.connectcre.ca/feed?story-market=canada".to_string(),
        },
        NewsFeed {
            label: "Cross-border real estate".to_string(),
            url: "https://www.connectcre.ca/feed?story-market=cross-border-news".to_string(),
        },
    ]
}

impl MarketConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            statistics_url: env::var("MARKET_STATISTICS_URL")
                .unwrap_or_else(|_| BIS_RELEASE_URL.to_string()),
            statistics_label: env::var("MARKET_STATISTICS_LABEL")
                .unwrap_or_else(|_| "BIS".to_string()),
            karachi_index_url: env::var("MARKET_KARACHI_INDEX_URL")
                .unwrap_or_else(|_| ZAMEEN_KARACHI_URL.to_string()),
            pakistan_index_url: env::var("MARKET_PAKISTAN_INDEX_URL")
                .unwrap_or_else(|_| ZAMEEN_PAKISTAN_URL.to_string()),
            news_feeds: default_news_feeds(),
            items_per_feed: env::var("MARKET_ITEMS_PER_FEED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            fetch_timeout_secs: env::var("MARKET_FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8),
            cache_ttl_secs: env::var("MARKET_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(600),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for (name, url) in [
            ("statistics_url", &self.statistics_url),
            ("karachi_index_url", &self.karachi_index_url),
            ("pakistan_index_url", &self.pakistan_index_url),
        ] {
            if Url::parse(url).is_err() {
                return Err(format!("{} is not a valid URL: {}", name, url));
            }
        }
        for feed in &self.news_feeds {
            if feed.label.trim().is_empty() {
                return Err(format!("news feed {} has an empty label", feed.url));
            }
            if Url::parse(&feed.url).is_err() {
                return Err(format!("news feed URL is invalid: {}", feed.url));
            }
        }
        if self.items_per_feed == 0 {
            return Err("items_per_feed must be at least 1".to_string());
        }
        if self.fetch_timeout_secs == 0 {
            return Err("fetch_timeout_secs must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            statistics_url: BIS_RELEASE_URL.to_string(),
            statistics_label: "BIS".to_string(),
            karachi_index_url: ZAMEEN_KARACHI_URL.to_string(),
            pakistan_index_url: ZAMEEN_PAKISTAN_URL.to_string(),
            news_feeds: default_news_feeds(),
            items_per_feed: 3,
            fetch_timeout_secs: 8,
            cache_ttl_secs: 600,
        }
    }
}
