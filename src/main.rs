// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::env;
use std::net::SocketAddr;

use anyhow::{anyhow, Result};
use fabstir_market_node::{
    api,
    market::{MarketConfig, MarketService},
    version,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting {}...", version::get_version_string());

    let config = MarketConfig::from_env();
    config
        .validate()
        .map_err(|e| anyhow!("Invalid market configuration: {}", e))?;

    tracing::info!(
        "Aggregating {} feeds, {} headlines per feed, cache TTL {}s",
        config.news_feeds.len(),
        config.items_per_feed,
        config.cache_ttl_secs,
    );

    let service = MarketService::new(config);

    let api_port = env::var("API_PORT").unwrap_or_else(|_| "8080".to_string());
    let addr: SocketAddr = format!("0.0.0.0:{}", api_port)
        .parse()
        .map_err(|e| anyhow!("Invalid API_PORT: {}", e))?;

    api::start_server(addr, service)
        .await
        .map_err(|e| anyhow!("API server failed: {}", e))?;

    Ok(())
}
