//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with its key, value and absolute expiry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Key the entry is indexed under
    pub key: String,
    /// The stored value
    pub value: String,
    /// Absolute expiry instant, None = TTL too large to represent (never expires)
    pub expires_at: Option<Instant>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` from now.
    ///
    /// A zero TTL produces an entry that is already expired.
    pub fn new(key: String, value: String, ttl: Duration) -> Self {
        Self::with_start(key, value, ttl, Instant::now())
    }

    /// Creates a new cache entry expiring `ttl` after `start`.
    pub fn with_start(key: String, value: String, ttl: Duration, start: Instant) -> Self {
        Self {
            key,
            value,
            expires_at: start.checked_add(ttl),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so
    /// the entry is invalid as soon as its TTL has fully elapsed.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    /// Checks if the entry has expired against the current clock.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}
