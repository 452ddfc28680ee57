//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// A miss is the only failure the engine reports. Absent, expired and
/// capacity-evicted keys all collapse into `NotFound`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key not found in cache (never set, expired, or evicted)
    #[error("Key not found: {0}")]
    NotFound(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = CacheError::NotFound("user:1".to_string());
        assert_eq!(err.to_string(), "Key not found: user:1");
    }
}
