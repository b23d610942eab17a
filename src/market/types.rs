// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for the market data snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Year-over-year figures scraped from the statistics-bureau release page
///
/// Every field is extracted independently from unstructured prose, so any of
/// them can be missing without the others being affected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    /// Global real house price change, percent (e.g. "3.4")
    pub global_yoy: Option<String>,
    /// Advanced-economies change
    pub ae_yoy: Option<String>,
    /// Emerging-market-economies change
    pub eme_yoy: Option<String>,
    /// Reference quarter (e.g. "Q2 2023")
    pub period: Option<String>,
    /// Publication date as printed on the page (e.g. "28 February 2024")
    pub published: Option<String>,
    /// Display label of the statistics source
    pub source: String,
}

/// Extracted fields from a regional property-index page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceIndexSummary {
    /// Month/year label of the index reading (e.g. "March 2024")
    pub period: Option<String>,
    /// Formatted average price (e.g. "PKR 4.5 Crore")
    pub avg_price: Option<String>,
    /// One-year change, with percent sign (e.g. "9.8%")
    pub one_year_change: Option<String>,
}

/// One accepted headline from a news feed
///
/// Items without a title or link are dropped at parse time, so both are
/// always non-empty here. `pub_date` may be empty when the feed omits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// Headline text
    pub title: String,
    /// Link to the story
    pub link: String,
    /// Publication date string as given by the feed
    pub pub_date: String,
    /// Label of the feed the item came from
    pub source: String,
}

/// The assembled market snapshot
///
/// The shape is always fully present; a degraded source leaves its slot
/// `None` (or contributes no headlines) rather than failing the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    /// Statistics-bureau summary, if the release page could be read
    pub statistics: Option<StatisticsSummary>,
    /// Karachi property-index reading
    pub karachi: Option<PriceIndexSummary>,
    /// Country-wide property-index reading
    pub pakistan: Option<PriceIndexSummary>,
    /// Headlines from all feeds, in configured feed order
    pub news: Vec<NewsItem>,
    /// When this snapshot was assembled (UTC)
    pub generated_at: DateTime<Utc>,
}

/// Errors from one source's fetch pipeline
///
/// Scoped to a single source and absorbed at the aggregation boundary; the
/// snapshot call itself never surfaces these. A pattern that fails to match
/// is not an error at all, just a missing field.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request timed out
    #[error("Timeout fetching {label}")]
    Timeout {
        /// Label of the source that timed out
        label: String,
    },

    /// The request itself failed (DNS, connection refused, TLS)
    #[error("Request to {label} failed: {message}")]
    Request {
        /// Label of the source
        label: String,
        /// Underlying client error
        message: String,
    },

    /// Non-success HTTP status
    #[error("HTTP {status} from {label}")]
    Status {
        /// Label of the source
        label: String,
        /// HTTP status code
        status: u16,
    },

    /// Response body could not be read or parsed
    #[error("Unreadable response from {label}: {message}")]
    Body {
        /// Label of the source
        label: String,
        /// What went wrong while reading/parsing
        message: String,
    },
}

impl FetchError {
    /// Map a reqwest error to the matching variant for a source
    pub fn from_request(source: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                label: source.to_string(),
            }
        } else {
            Self::Request {
                label: source.to_string(),
                message: error.to_string(),
            }
        }
    }
}
