// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Snapshot assembly tests
//!
//! These tests verify that:
//! - The snapshot call resolves even when every source is down
//! - One dead source never empties the others' slots
//! - A non-success status degrades only the affected slot
//! - The TTL cache serves the same snapshot while fresh

use std::net::SocketAddr;

use fabstir_market_node::market::{MarketConfig, MarketService, NewsFeed};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Nothing listens on port 1; connections are refused immediately
const DEAD_URL: &str = "http://127.0.0.1:1/";

const RELEASE_PAGE: &str = "<html><body><p>28 February 2024</p>\
    <p>In the second quarter of 2023, global real house prices rose by 3.4% \
    year on year. Advanced economies continued to recover (1.2%), emerging \
    market economies (5.7%) led.</p></body></html>";

const INDEX_PAGE: &str = "<html><body>\
    <h2>Average Houses Price in March 2024 PKR 4.5 Crore</h2>\
    <p>1 Year Ago PKR 4.1 Crore 9.8%</p></body></html>";

fn feed_page(prefix: &str) -> String {
    let items: String = (1..=5)
        .map(|i| {
            format!(
                "<item><title>{prefix} story {i}</title>\
                 <link>https://example.com/{prefix}/{i}</link>\
                 <pubDate></pubDate></item>"
            )
        })
        .collect();
    format!(
        "<?xml version=\"1.0\"?><rss version=\"2.0\"><channel>\
         <title>{prefix}</title><link>https://example.com</link>\
         <description>fixture</description>{items}</channel></rss>"
    )
}

/// Serve a canned HTTP response for every connection
async fn serve_fixture(status_line: &'static str, content_type: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let body = body.clone();
            tokio::spawn(async move {
                // Drain the request head before responding
                let mut buf = [0u8; 4096];
                let mut request = Vec::new();
                loop {
                    match socket.read(&mut buf).await {
                        Ok(0) => break,
                        Ok(n) => {
                            request.extend_from_slice(&buf[..n]);
                            if request.windows(4).any(|w| w == b"\r\n\r\n") {
                                break;
                            }
                        }
                        Err(_) => break,
                    }
                }

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    content_type,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}/", addr)
}

fn base_config() -> MarketConfig {
    let mut config = MarketConfig::default();
    config.statistics_url = DEAD_URL.to_string();
    config.karachi_index_url = DEAD_URL.to_string();
    config.pakistan_index_url = DEAD_URL.to_string();
    config.news_feeds = vec![];
    config.fetch_timeout_secs = 2;
    config.cache_ttl_secs = 0;
    config
}

#[tokio::test]
async fn snapshot_resolves_when_all_sources_are_down() {
    let mut config = base_config();
    config.news_feeds = vec![
        NewsFeed {
            label: "Feed A".to_string(),
            url: DEAD_URL.to_string(),
        },
        NewsFeed {
            label: "Feed B".to_string(),
            url: DEAD_URL.to_string(),
        },
    ];

    let service = MarketService::new(config);
    let snapshot = service.snapshot().await;

    assert!(snapshot.statistics.is_none());
    assert!(snapshot.karachi.is_none());
    assert!(snapshot.pakistan.is_none());
    assert!(snapshot.news.is_empty());
}

#[tokio::test]
async fn one_dead_source_leaves_the_others_intact() {
    let statistics_url = serve_fixture("200 OK", "text/html", RELEASE_PAGE.to_string()).await;
    let pakistan_url = serve_fixture("200 OK", "text/html", INDEX_PAGE.to_string()).await;
    let feed_a_url = serve_fixture("200 OK", "application/rss+xml", feed_page("alpha")).await;

    let mut config = base_config();
    config.statistics_url = statistics_url;
    config.pakistan_index_url = pakistan_url;
    // karachi stays dead
    config.news_feeds = vec![
        NewsFeed {
            label: "Feed A".to_string(),
            url: feed_a_url,
        },
        NewsFeed {
            label: "Feed B".to_string(),
            url: DEAD_URL.to_string(),
        },
    ];

    let service = MarketService::new(config);
    let snapshot = service.snapshot().await;

    let statistics = snapshot.statistics.expect("statistics slot should survive");
    assert_eq!(statistics.global_yoy.as_deref(), Some("3.4"));
    assert_eq!(statistics.period.as_deref(), Some("Q2 2023"));

    assert!(snapshot.karachi.is_none());

    let pakistan = snapshot.pakistan.expect("pakistan slot should survive");
    assert_eq!(pakistan.avg_price.as_deref(), Some("PKR 4.5 Crore"));
    assert_eq!(pakistan.one_year_change.as_deref(), Some("9.8%"));

    // Only the live feed contributes, capped at 3, order preserved
    assert_eq!(snapshot.news.len(), 3);
    assert!(snapshot.news.iter().all(|i| i.source == "Feed A"));
    assert_eq!(snapshot.news[0].title, "alpha story 1");
}

#[tokio::test]
async fn non_success_status_degrades_only_that_slot() {
    let karachi_url = serve_fixture("200 OK", "text/html", INDEX_PAGE.to_string()).await;
    let pakistan_url =
        serve_fixture("503 Service Unavailable", "text/html", "maintenance".to_string()).await;

    let mut config = base_config();
    config.karachi_index_url = karachi_url;
    config.pakistan_index_url = pakistan_url;

    let service = MarketService::new(config);
    let snapshot = service.snapshot().await;

    assert!(snapshot.karachi.is_some());
    assert!(snapshot.pakistan.is_none());
}

#[tokio::test]
async fn two_live_feeds_yield_six_headlines_in_feed_order() {
    let feed_a_url = serve_fixture("200 OK", "application/rss+xml", feed_page("alpha")).await;
    let feed_b_url = serve_fixture("200 OK", "application/rss+xml", feed_page("beta")).await;

    let mut config = base_config();
    config.news_feeds = vec![
        NewsFeed {
            label: "Feed A".to_string(),
            url: feed_a_url,
        },
        NewsFeed {
            label: "Feed B".to_string(),
            url: feed_b_url,
        },
    ];

    let service = MarketService::new(config);
    let snapshot = service.snapshot().await;

    assert_eq!(snapshot.news.len(), 6);
    assert!(snapshot.news[..3].iter().all(|i| i.source == "Feed A"));
    assert!(snapshot.news[3..].iter().all(|i| i.source == "Feed B"));
    assert_eq!(snapshot.news[0].title, "alpha story 1");
    assert_eq!(snapshot.news[3].title, "beta story 1");
}

#[tokio::test]
async fn fresh_cache_serves_the_same_snapshot() {
    let mut config = base_config();
    config.cache_ttl_secs = 600;

    let service = MarketService::new(config);
    let first = service.snapshot().await;
    let second = service.snapshot().await;

    assert_eq!(first.generated_at, second.generated_at);

    service.clear_cache();
    let third = service.snapshot().await;
    assert!(third.generated_at >= first.generated_at);
}
