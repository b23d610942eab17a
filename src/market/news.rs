//! News feed fetcher
//!
//! Pulls the latest headlines from configured RSS feeds. Only items carrying
//! both a title and a link are kept; the cap counts accepted items, not raw
//! `<item>` elements.

use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use rss::Channel;
use tracing::debug;

use super::config::NewsFeed;
use super::types::{FetchError, NewsItem};

/// Fetches and parses RSS news feeds
pub struct NewsFetcher {
    client: Client,
    items_per_feed: usize,
}

impl NewsFetcher {
    /// Create a new fetcher sharing the given HTTP client
    pub fn new(client: Client, items_per_feed: usize) -> Self {
        Self {
            client,
            items_per_feed,
        }
    }

    /// Fetch one feed and return its accepted headlines, in document order
    pub async fn fetch(&self, feed: &NewsFeed) -> Result<Vec<NewsItem>, FetchError> {
        debug!("Fetching news feed '{}' from {}", feed.label, feed.url);

        let response = self
            .client
            .get(&feed.url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| FetchError::from_request(&feed.label, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                label: feed.label.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| FetchError::Body {
            label: feed.label.clone(),
            message: e.to_string(),
        })?;

        parse_feed(&body, &feed.label, self.items_per_feed)
    }
}

/// Parse an RSS payload, keeping the first `max_items` usable entries
///
/// An entry needs a non-empty trimmed title and link to be kept; entries
/// missing either are skipped and do not count toward the cap.
pub fn parse_feed(xml: &[u8], label: &str, max_items: usize) -> Result<Vec<NewsItem>, FetchError> {
    let channel = Channel::read_from(xml).map_err(|e| FetchError::Body {
        label: label.to_string(),
        message: e.to_string(),
    })?;

    let mut items = Vec::new();
    for item in channel.items() {
        if items.len() >= max_items {
            break;
        }

        let title = item.title().map(str::trim).unwrap_or_default();
        let link = item.link().map(str::trim).unwrap_or_default();
        if title.is_empty() || link.is_empty() {
            continue;
        }

        items.push(NewsItem {
            title: title.to_string(),
            link: link.to_string(),
            pub_date: item.pub_date().map(str::trim).unwrap_or_default().to_string(),
            source: label.to_string(),
        });
    }

    Ok(items)
}
