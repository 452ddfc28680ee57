//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;
use std::time::Duration;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of live entries the cache can hold
    pub capacity: usize,
    /// Default TTL in seconds used by the demo binary
    pub default_ttl: u64,
    /// Background sweep interval in milliseconds
    pub sweep_interval_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SCACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `SCACHE_DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `SCACHE_SWEEP_INTERVAL_MS` - Sweep frequency in milliseconds (default: 1000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: env_or("SCACHE_CAPACITY", defaults.capacity),
            default_ttl: env_or("SCACHE_DEFAULT_TTL", defaults.default_ttl),
            sweep_interval_ms: env_or("SCACHE_SWEEP_INTERVAL_MS", defaults.sweep_interval_ms),
        }
    }

    /// Default TTL as a `Duration`.
    pub fn default_ttl_duration(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }

    /// Sweep interval as a `Duration`.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}

fn env_or<T: std::str::FromStr>(name: &str, fallback: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(fallback)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 1000,
            default_ttl: 300,
            sweep_interval_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.capacity, 1000);
        assert_eq!(config.default_ttl, 300);
        assert_eq!(config.sweep_interval_ms, 1000);
    }

    #[test]
    fn test_config_durations() {
        let config = Config {
            capacity: 10,
            default_ttl: 60,
            sweep_interval_ms: 250,
        };
        assert_eq!(config.default_ttl_duration(), Duration::from_secs(60));
        assert_eq!(config.sweep_interval(), Duration::from_millis(250));
    }

    // Env mutation is process-global, so the env cases share one test.
    #[test]
    fn test_config_from_env() {
        env::remove_var("SCACHE_CAPACITY");
        env::remove_var("SCACHE_DEFAULT_TTL");
        env::remove_var("SCACHE_SWEEP_INTERVAL_MS");

        let config = Config::from_env();
        assert_eq!(config.capacity, 1000);
        assert_eq!(config.default_ttl, 300);
        assert_eq!(config.sweep_interval_ms, 1000);

        env::set_var("SCACHE_CAPACITY", "42");
        env::set_var("SCACHE_DEFAULT_TTL", "not-a-number");
        env::set_var("SCACHE_SWEEP_INTERVAL_MS", "50");

        let config = Config::from_env();
        assert_eq!(config.capacity, 42);
        assert_eq!(config.default_ttl, 300);
        assert_eq!(config.sweep_interval_ms, 50);

        env::remove_var("SCACHE_CAPACITY");
        env::remove_var("SCACHE_DEFAULT_TTL");
        env::remove_var("SCACHE_SWEEP_INTERVAL_MS");
    }
}
