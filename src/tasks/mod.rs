//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside the cache.
//!
//! # Tasks
//! - Expiry sweep: Removes expired cache entries at a fixed interval

mod sweeper;

pub use sweeper::EvictionTicker;
pub(crate) use sweeper::spawn_sweeper;
