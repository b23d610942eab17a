// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! TTL-based snapshot caching
//!
//! Wraps the stateless assembly path so repeated page loads do not hammer
//! the external sources. The assembly itself stays cache-agnostic.

use std::sync::RwLock;
use std::time::{Duration, Instant};

use super::types::MarketSnapshot;

/// TTL-bounded cache holding the most recent snapshot
///
/// A TTL of zero disables caching entirely.
pub struct SnapshotCache {
    entry: RwLock<Option<CachedSnapshot>>,
    ttl: Duration,
}

struct CachedSnapshot {
    snapshot: MarketSnapshot,
    inserted_at: Instant,
}

impl SnapshotCache {
    /// Create a new cache with the given TTL in seconds
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            entry: RwLock::new(None),
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    /// Get the cached snapshot, if present and still fresh
    pub fn get(&self) -> Option<MarketSnapshot> {
        if self.ttl.is_zero() {
            return None;
        }

        let entry = self.entry.read().ok()?;
        let cached = entry.as_ref()?;

        if cached.inserted_at.elapsed() > self.ttl {
            return None; // Expired
        }

        Some(cached.snapshot.clone())
    }

    /// Store a freshly assembled snapshot
    pub fn insert(&self, snapshot: &MarketSnapshot) {
        if self.ttl.is_zero() {
            return;
        }

        if let Ok(mut entry) = self.entry.write() {
            *entry = Some(CachedSnapshot {
                snapshot: snapshot.clone(),
                inserted_at: Instant::now(),
            });
        }
    }

    /// Drop the cached snapshot
    pub fn clear(&self) {
        if let Ok(mut entry) = self.entry.write() {
            *entry = None;
        }
    }

    /// Whether caching is active
    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }
}
