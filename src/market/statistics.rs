// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Statistics-bureau release page fetcher
//!
//! Scrapes the quarterly residential property release for global,
//! advanced-economies, and emerging-markets year-over-year changes. The
//! release is prose, so each figure has a list of fallback phrasings.

use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use tracing::debug;

use super::text::{body_text, capture_first, normalize_text, parse_quarter};
use super::types::{FetchError, StatisticsSummary};

const GLOBAL_YOY_PATTERNS: &[&str] = &[
    r"(?i)global real house prices .*? by ([+-]?\d+(?:\.\d+)?)%",
    r"(?i)global real .*? prices .*? ([+-]?\d+(?:\.\d+)?)%",
];

const AE_YOY_PATTERNS: &[&str] = &[
    r"(?i)advanced economies.*?(?:rising|increase|grew|continued to recover).*?([+-]?\d+(?:\.\d+)?)%",
    r"(?i)advanced economies.*?\(([+-]?\d+(?:\.\d+)?)%",
];

const EME_YOY_PATTERNS: &[&str] = &[
    r"(?i)emerging market economies.*?\(([+-]?\d+(?:\.\d+)?)%",
    r"(?i)emerging market economies.*?(?:decline|decrease|fell).*?([+-]?\d+(?:\.\d+)?)%",
];

// Standalone "28 February 2024" style date anywhere in the release text
const PUBLISHED_DATE_PATTERNS: &[&str] = &[r"\b(\d{1,2}\s+[A-Za-z]+\s+\d{4})\b"];

/// Fetches and parses the statistics-bureau release page
pub struct StatisticsFetcher {
    client: Client,
    url: String,
    label: String,
}

impl StatisticsFetcher {
    /// Create a new fetcher for the given release page URL
    pub fn new(client: Client, url: String, label: String) -> Self {
        Self { client, url, label }
    }

    /// Fetch the release page and extract the summary
    ///
    /// Fails only on transport or HTTP errors; missing figures in an
    /// otherwise readable page come back as `None` fields.
    pub async fn fetch(&self) -> Result<StatisticsSummary, FetchError> {
        debug!("Fetching statistics release from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| FetchError::from_request(&self.label, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                label: self.label.clone(),
                status: status.as_u16(),
            });
        }

        let html = response.text().await.map_err(|e| FetchError::Body {
            label: self.label.clone(),
            message: e.to_string(),
        })?;

        Ok(parse_statistics_html(&html, &self.label))
    }
}

/// Extract every summary field from the raw release page markup
///
/// Fields are extracted independently; a miss on one never blocks another.
pub fn parse_statistics_html(html: &str, label: &str) -> StatisticsSummary {
    let text = normalize_text(&body_text(html));

    StatisticsSummary {
        global_yoy: capture_first(&text, GLOBAL_YOY_PATTERNS),
        ae_yoy: capture_first(&text, AE_YOY_PATTERNS),
        eme_yoy: capture_first(&text, EME_YOY_PATTERNS),
        period: parse_quarter(&text),
        published: capture_first(&text, PUBLISHED_DATE_PATTERNS),
        source: label.to_string(),
    }
}
