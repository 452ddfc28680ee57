//! Cache Store Module
//!
//! Single-threaded cache engine combining a key index with the LRU recency
//! list and TTL expiration. [`crate::cache::Cache`] wraps it in a lock.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::cache::lru::{NodeId, RecencyList};
use crate::cache::{CacheEntry, CacheStats};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Cache storage with LRU eviction and TTL support.
///
/// Every live key has exactly one entry in `order`, and `index` maps the key
/// to that entry's handle.
#[derive(Debug)]
pub struct CacheStore {
    /// Key to recency list handle
    index: HashMap<String, NodeId>,
    /// Entries ordered most to least recently used
    order: RecencyList,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed (at least 1)
    capacity: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore holding at most `capacity` entries.
    ///
    /// A capacity of 0 is clamped to 1: the cache keeps only the most
    /// recent insert.
    pub fn new(capacity: usize) -> Self {
        if capacity == 0 {
            warn!("Cache capacity 0 requested, clamping to 1");
        }
        Self {
            index: HashMap::new(),
            order: RecencyList::new(),
            stats: CacheStats::new(),
            capacity: capacity.max(1),
        }
    }

    // == Set ==
    /// Stores a key-value pair expiring `ttl` from now.
    ///
    /// An existing entry for the key is dropped first, so overwriting on a
    /// full cache never evicts another key. Otherwise, at capacity, the
    /// least recently used entry is evicted before the insert.
    pub fn set(&mut self, key: String, value: String, ttl: Duration) -> Result<()> {
        if let Some(id) = self.index.remove(&key) {
            self.order.remove(id);
        }

        if self.order.len() >= self.capacity {
            if let Some(evicted) = self.order.evict_oldest() {
                self.index.remove(&evicted.key);
                self.stats.record_eviction();
                debug!(key = %evicted.key, "Evicted least recently used entry");
            }
        }

        let entry = CacheEntry::new(key.clone(), value, ttl);
        let id = self.order.push_front(entry);
        self.index.insert(key, id);

        Ok(())
    }

    // == Get ==
    /// Retrieves a value by key, promoting it to most recently used.
    ///
    /// This is not a pure read: a hit moves the entry to the front of the
    /// recency order and an expired entry is removed on discovery.
    pub fn get(&mut self, key: &str) -> Result<String> {
        let Some(&id) = self.index.get(key) else {
            self.stats.record_miss();
            return Err(CacheError::NotFound(key.to_string()));
        };

        let expired = match self.order.get(id) {
            Some(entry) => entry.is_expired(),
            None => true,
        };

        if expired {
            self.index.remove(key);
            if self.order.remove(id).is_some() {
                self.stats.record_expirations(1);
                debug!(key, "Removed expired entry on access");
            }
            self.stats.record_miss();
            return Err(CacheError::NotFound(key.to_string()));
        }

        self.order.touch(id);
        self.stats.record_hit();
        self.order
            .get(id)
            .map(|entry| entry.value.clone())
            .ok_or_else(|| CacheError::NotFound(key.to_string()))
    }

    // == Contains ==
    /// Checks whether a live entry exists for `key`.
    ///
    /// Same side effects as [`CacheStore::get`]: promotes on hit, removes on expiry.
    pub fn contains(&mut self, key: &str) -> bool {
        self.get(key).is_ok()
    }

    // == Flush ==
    /// Removes every entry. Statistics counters are kept.
    pub fn flush(&mut self) -> Result<()> {
        self.index.clear();
        self.order.clear();
        Ok(())
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired: Vec<NodeId> = self
            .order
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(id, _)| id)
            .collect();

        let mut removed = 0;
        for id in expired {
            if let Some(entry) = self.order.remove(id) {
                self.index.remove(&entry.key);
                removed += 1;
            }
        }

        self.stats.record_expirations(removed);
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.order.len());
        stats
    }

    // == Capacity ==
    /// Returns the effective capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Length ==
    /// Returns the current number of entries, including expired entries not
    /// yet removed.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.order.len() == 0
    }

    /// Keys from most to least recently used.
    #[cfg(test)]
    pub(crate) fn keys_by_recency(&self) -> Vec<String> {
        self.order.iter().map(|(_, e)| e.key.clone()).collect()
    }
}
