//! Expiry Sweeper Task
//!
//! Background task that periodically removes expired cache entries, so keys
//! that are written and never read again do not linger until capacity
//! eviction reaches them.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cache::WeakCache;

/// Smallest interval the sweeper will tick at.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// Largest interval the sweeper will tick at (365 days).
const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

// == Eviction Ticker ==
/// Handle to a running expiry sweeper.
///
/// Stop it with [`EvictionTicker::stop`]. Dropping the handle also signals
/// the task to exit.
#[derive(Debug)]
pub struct EvictionTicker {
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl EvictionTicker {
    /// Signals the sweeper to stop and waits for the task to finish.
    pub async fn stop(mut self) {
        self.signal_shutdown();
        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.await {
                warn!("Expiry sweeper ended abnormally: {}", err);
            }
        }
    }

    /// Returns true once the sweeper task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    fn signal_shutdown(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            // Receiver is gone if the task already exited
            let _ = tx.send(());
        }
    }
}

impl Drop for EvictionTicker {
    fn drop(&mut self) {
        self.signal_shutdown();
    }
}

/// Spawns a task that sweeps expired entries from `cache` every `interval`.
///
/// The first sweep runs one interval after start. The interval is clamped
/// to between 1ms and 365 days. The task exits when the returned ticker is
/// stopped or dropped, or when the cache itself has been dropped.
///
/// Outside a tokio runtime nothing is spawned: a warning is logged and the
/// returned ticker is already finished.
pub(crate) fn spawn_sweeper(cache: WeakCache, interval: Duration) -> EvictionTicker {
    let interval = clamp_interval(interval);

    let runtime = match Handle::try_current() {
        Ok(runtime) => runtime,
        Err(err) => {
            warn!("Expiry sweeper not started, no tokio runtime: {}", err);
            return EvictionTicker {
                shutdown: None,
                handle: None,
            };
        }
    };

    let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

    let handle = runtime.spawn(async move {
        info!("Starting expiry sweeper with interval of {:?}", interval);

        let start = time::Instant::now()
            .checked_add(interval)
            .unwrap_or_else(time::Instant::now);
        let mut ticker = time::interval_at(start, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                // Resolves on an explicit stop or when the ticker handle is dropped
                _ = &mut shutdown_rx => {
                    info!("Expiry sweeper stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let Some(cache) = cache.upgrade() else {
                        info!("Cache dropped, expiry sweeper exiting");
                        break;
                    };

                    let removed = cache.sweep_expired();
                    if removed > 0 {
                        info!("Expiry sweep: removed {} expired entries", removed);
                    } else {
                        debug!("Expiry sweep: no expired entries found");
                    }
                }
            }
        }
    });

    EvictionTicker {
        shutdown: Some(shutdown_tx),
        handle: Some(handle),
    }
}

// == Clamp Interval ==
/// Keeps the interval within what the timer can schedule.
fn clamp_interval(interval: Duration) -> Duration {
    if interval < MIN_SWEEP_INTERVAL {
        warn!(
            "Sweep interval {:?} is too small, clamping to {:?}",
            interval, MIN_SWEEP_INTERVAL
        );
        MIN_SWEEP_INTERVAL
    } else if interval > MAX_SWEEP_INTERVAL {
        warn!(
            "Sweep interval {:?} is too large, clamping to {:?}",
            interval, MAX_SWEEP_INTERVAL
        );
        MAX_SWEEP_INTERVAL
    } else {
        interval
    }
}

#[cfg(test)]
mod tests {
    use super::{clamp_interval, MAX_SWEEP_INTERVAL, MIN_SWEEP_INTERVAL};
    use crate::cache::Cache;
    use std::time::Duration;

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn test_sweeper_removes_expired_entries() {
        let cache = Cache::new(100);
        cache
            .set("expire_soon", "value", Duration::from_millis(20))
            .unwrap();

        let ticker = cache.start_eviction_ticker(Duration::from_millis(50));

        tokio::time::sleep(Duration::from_millis(200)).await;

        // Removed without any read touching it
        assert_eq!(cache.len(), 0, "Expired entry should have been swept");
        assert_eq!(cache.stats().expirations, 1);

        ticker.stop().await;
    }

    #[tokio::test]
    async fn test_sweeper_preserves_valid_entries() {
        let cache = Cache::new(100);
        cache.set("long_lived", "value", HOUR).unwrap();

        let ticker = cache.start_eviction_ticker(Duration::from_millis(20));

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(cache.get("long_lived").unwrap(), "value");

        ticker.stop().await;
    }

    #[tokio::test]
    async fn test_sweeper_stop_finishes_task() {
        let cache = Cache::new(10);
        let ticker = cache.start_eviction_ticker(Duration::from_secs(60));

        assert!(!ticker.is_finished());

        tokio::time::timeout(Duration::from_secs(1), ticker.stop())
            .await
            .expect("stop should complete promptly");
    }

    #[tokio::test]
    async fn test_sweeper_drop_stops_sweeping() {
        let cache = Cache::new(10);
        let ticker = cache.start_eviction_ticker(Duration::from_millis(20));
        drop(ticker);

        // Let the task observe the closed channel
        tokio::time::sleep(Duration::from_millis(30)).await;

        cache.set("stale", "value", Duration::ZERO).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(cache.len(), 1, "No sweep should run after the ticker is dropped");
    }

    #[tokio::test]
    async fn test_sweeper_exits_when_cache_dropped() {
        let cache = Cache::new(10);
        let ticker = cache.start_eviction_ticker(Duration::from_millis(20));

        drop(cache);
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(ticker.is_finished());
    }

    #[tokio::test]
    async fn test_sweeper_zero_interval_clamped() {
        let cache = Cache::new(10);
        cache.set("stale", "value", Duration::ZERO).unwrap();

        let ticker = cache.start_eviction_ticker(Duration::ZERO);
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(cache.is_empty());
        ticker.stop().await;
    }

    #[tokio::test]
    async fn test_sweeper_huge_interval_keeps_running() {
        let cache = Cache::new(10);
        let ticker = cache.start_eviction_ticker(Duration::MAX);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!ticker.is_finished(), "Sweeper should survive a huge interval");

        tokio::time::timeout(Duration::from_secs(1), ticker.stop())
            .await
            .expect("stop should complete promptly");
    }

    #[test]
    fn test_clamp_interval_bounds() {
        assert_eq!(clamp_interval(Duration::ZERO), MIN_SWEEP_INTERVAL);
        assert_eq!(clamp_interval(Duration::MAX), MAX_SWEEP_INTERVAL);
        assert_eq!(clamp_interval(HOUR), HOUR);
    }

    #[test]
    fn test_sweeper_without_runtime_does_not_panic() {
        let cache = Cache::new(10);
        cache.set("stale", "value", Duration::ZERO).unwrap();

        let ticker = cache.start_eviction_ticker(Duration::from_millis(10));

        assert!(ticker.is_finished());
        drop(ticker);
        // Lazy expiry still works without the sweeper
        assert!(!cache.contains("stale"));
    }
}
