//! Freshness-windowed, size-bounded cache of sales pages.
//!
//! Entries are keyed by the canonical query key (see
//! [`SalesQuery::cache_key`](crate::query::SalesQuery::cache_key)). A read
//! inside the freshness window serves the cached page; a read after it is a
//! miss and drops the entry. When full, the least recently used key is
//! evicted.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::models::QueryResult;

struct CacheEntry {
    result: Arc<QueryResult>,
    fetched_at: Instant,
    last_used: u64,
}

pub struct QueryCache {
    entries: HashMap<String, CacheEntry>,
    freshness: Duration,
    capacity: usize,
    clock: u64,
}

impl QueryCache {
    /// Create a cache. A zero capacity is treated as one.
    pub fn new(freshness: Duration, capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            freshness,
            capacity: capacity.max(1),
            clock: 0,
        }
    }

    pub fn freshness(&self) -> Duration {
        self.freshness
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Return the page for `key` if it was fetched within the freshness window.
    pub fn get_fresh(&mut self, key: &str) -> Option<Arc<QueryResult>> {
        let now = Instant::now();
        let fresh = match self.entries.get(key) {
            Some(entry) => now.saturating_duration_since(entry.fetched_at) < self.freshness,
            None => return None,
        };

        if !fresh {
            debug!(key, "cached page is stale");
            self.entries.remove(key);
            return None;
        }

        self.clock += 1;
        let tick = self.clock;
        self.entries.get_mut(key).map(|entry| {
            entry.last_used = tick;
            entry.result.clone()
        })
    }

    /// Store `result` under `key`, stamping it with the current time.
    pub fn insert(&mut self, key: String, result: Arc<QueryResult>) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.evict_lru();
        }
        self.clock += 1;
        self.entries.insert(
            key,
            CacheEntry {
                result,
                fetched_at: Instant::now(),
                last_used: self.clock,
            },
        );
    }

    /// Whether an entry exists for `key`, fresh or not.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn invalidate(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_lru(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            debug!(key = %key, "evicting least recently used page");
            self.entries.remove(&key);
        }
    }
}
