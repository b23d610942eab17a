//! Property-index page fetcher
//!
//! Scrapes a regional property-index page for the latest average house price
//! and the one-year change. The same logic serves every configured region;
//! only the URL differs.

use regex::Regex;
use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use tracing::debug;

use super::text::{body_text, normalize_text};
use super::types::{FetchError, PriceIndexSummary};

// "Average Houses Price in March 2024 PKR 4.5 Crore"
const AVG_PRICE_PATTERN: &str =
    r"(?i)Average Houses Price in ([A-Za-z]+\s+\d{4})\s+PKR\s+([\d.]+)\s*(Crore|Lakh|Thousand)";

// "1 Year Ago PKR 4.1 Crore 9.8%", only the trailing percent is kept
const ONE_YEAR_PATTERN: &str =
    r"(?i)1 Year Ago\s+PKR\s+([\d.]+)\s*(Crore|Lakh|Thousand)\s+([\d.]+)\s*%";

/// Fetches and parses a property-index page
pub struct PriceIndexFetcher {
    client: Client,
}

impl PriceIndexFetcher {
    /// Create a new fetcher sharing the given HTTP client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetch one region's index page and extract the summary
    pub async fn fetch(&self, label: &str, url: &str) -> Result<PriceIndexSummary, FetchError> {
        debug!("Fetching {} property index from {}", label, url);

        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| FetchError::from_request(label, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                label: label.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text().await.map_err(|e| FetchError::Body {
            label: label.to_string(),
            message: e.to_string(),
        })?;

        Ok(parse_price_index_html(&html))
    }
}

/// Extract the price-index summary from raw page markup
///
/// The two patterns are independently optional; a miss on one does not
/// block the other.
pub fn parse_price_index_html(html: &str) -> PriceIndexSummary {
    let text = normalize_text(&body_text(html));

    let mut summary = PriceIndexSummary {
        period: None,
        avg_price: None,
        one_year_change: None,
    };

    if let Ok(re) = Regex::new(AVG_PRICE_PATTERN) {
        if let Some(captures) = re.captures(&text) {
            if let (Some(period), Some(amount), Some(unit)) =
                (captures.get(1), captures.get(2), captures.get(3))
            {
                summary.period = Some(period.as_str().to_string());
                summary.avg_price = Some(format!("PKR {} {}", amount.as_str(), unit.as_str()));
            }
        }
    }

    if let Ok(re) = Regex::new(ONE_YEAR_PATTERN) {
        if let Some(captures) = re.captures(&text) {
            if let Some(percent) = captures.get(3) {
                summary.one_year_change = Some(format!("{}%", percent.as_str()));
            }
        }
    }

    summary
}
