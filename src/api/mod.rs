// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod http_server;
pub mod market;

pub use http_server::{create_app, start_server, AppState};
pub use market::{snapshot_handler, MarketSnapshotResponse};
