//! Hour-aligned memoization cache.
//!
//! Entries do not live for a fixed duration from insertion; they expire
//! at the top of the next UTC hour, so every cached value dies at the
//! same wall-clock boundary regardless of when it was written.

use std::sync::Arc;

use chrono::{DateTime, Duration, Timelike, Utc};
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

struct CacheEntry<V> {
    value: V,
    expires_at: DateTime<Utc>,
}

/// In-process cache keyed by string, expiring at UTC hour boundaries.
pub struct HourlyCache<V> {
    entries: DashMap<String, CacheEntry<V>>,
    in_flight: DashMap<String, Arc<Mutex<()>>>,
}

impl<V: Clone> HourlyCache<V> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            in_flight: DashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Utc::now())
    }

    /// Clock-injected lookup. Expired entries are evicted on read.
    pub fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<V> {
        if let Some(entry) = self.entries.get(key) {
            if now < entry.expires_at {
                debug!(key, "cache hit");
                return Some(entry.value.clone());
            }
            drop(entry);
            self.entries.remove(key);
        }
        debug!(key, "cache miss");
        None
    }

    pub fn insert(&self, key: &str, value: V) {
        self.insert_at(key, value, Utc::now());
    }

    pub fn insert_at(&self, key: &str, value: V, now: DateTime<Utc>) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: next_hour_boundary(now),
            },
        );
    }

    /// Acquires the per-key guard that coalesces concurrent misses into
    /// a single upstream fetch. Callers re-check the cache after the
    /// guard is held.
    pub async fn lock_key(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .in_flight
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}

impl<V: Clone> Default for HourlyCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// The top of the UTC hour strictly after `now`.
pub fn next_hour_boundary(now: DateTime<Utc>) -> DateTime<Utc> {
    let truncated = now
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now);
    truncated + Duration::hours(1)
}
