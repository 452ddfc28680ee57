//! Shared Cache Handle
//!
//! Thread-safe front end over [`CacheStore`]. Every operation takes the same
//! mutex for its full duration, so each call is atomic with respect to all
//! others, the background sweeper included.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;

use crate::cache::{CacheStats, CacheStore};
use crate::config::Config;
use crate::error::Result;
use crate::tasks::{spawn_sweeper, EvictionTicker};

// == Cache ==
/// Thread-safe LRU/TTL cache.
///
/// Cloning produces another handle to the same underlying store.
#[derive(Debug, Clone)]
pub struct Cache {
    inner: Arc<Mutex<CacheStore>>,
}

impl Cache {
    /// Creates a cache holding at most `capacity` live entries (0 is clamped to 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheStore::new(capacity))),
        }
    }

    /// Creates a cache sized from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.capacity)
    }

    /// Stores `value` under `key`, valid for `ttl`.
    ///
    /// Replaces any existing entry for the key, resetting its expiry and
    /// recency. Evicts the least recently used entry when full.
    pub fn set(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
        ttl: Duration,
    ) -> Result<()> {
        self.inner.lock().set(key.into(), value.into(), ttl)
    }

    /// Returns a copy of the value stored under `key`.
    ///
    /// Not read-only: a hit marks the entry most recently used, and an
    /// expired entry is deleted. Absent, expired and evicted keys all yield
    /// [`crate::CacheError::NotFound`].
    pub fn get(&self, key: &str) -> Result<String> {
        self.inner.lock().get(key)
    }

    /// Reports whether `key` holds a live value.
    ///
    /// Equivalent to [`Cache::get`] with the value discarded, side effects included.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().contains(key)
    }

    /// Discards every entry atomically.
    pub fn flush(&self) -> Result<()> {
        self.inner.lock().flush()
    }

    /// Runs one expiry sweep now, returning the number of entries removed.
    pub fn sweep_expired(&self) -> usize {
        self.inner.lock().cleanup_expired()
    }

    /// Starts the background sweeper, removing expired entries every `interval`.
    ///
    /// Spawns onto the current tokio runtime. Without one, a warning is
    /// logged and the returned ticker is already finished. The sweeper stops
    /// when the returned handle is stopped or dropped, or once every `Cache`
    /// handle has been dropped.
    pub fn start_eviction_ticker(&self, interval: Duration) -> EvictionTicker {
        spawn_sweeper(self.downgrade(), interval)
    }

    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    // == Capacity ==
    /// Returns the effective capacity (at least 1).
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Number of stored entries, including expired ones not yet removed.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    // == Is Empty ==
    /// Returns true if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub(crate) fn downgrade(&self) -> WeakCache {
        WeakCache {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

/// Non-owning reference held by the sweeper task.
#[derive(Debug, Clone)]
pub(crate) struct WeakCache {
    inner: Weak<Mutex<CacheStore>>,
}

impl WeakCache {
    pub(crate) fn upgrade(&self) -> Option<Cache> {
        self.inner.upgrade().map(|inner| Cache { inner })
    }
}
