//! scache - A thread-safe in-process key/value cache
//!
//! Bounds memory with LRU eviction and bounds validity with per-entry TTL.
//! Expired entries are removed lazily on access and by an optional
//! background sweeper.
//!
//! ```no_run
//! use std::time::Duration;
//! use scache::Cache;
//!
//! # async fn demo() -> scache::Result<()> {
//! let cache = Cache::new(2);
//! let ticker = cache.start_eviction_ticker(Duration::from_secs(1));
//!
//! cache.set("a", "1", Duration::from_secs(3600))?;
//! assert_eq!(cache.get("a")?, "1");
//!
//! ticker.stop().await;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{Cache, CacheStats};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::EvictionTicker;
