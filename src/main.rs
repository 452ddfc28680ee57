//! scache demo
//!
//! Exercises the cache end to end: LRU eviction, TTL expiry, background
//! sweeping and concurrent access, then prints the resulting statistics.

use std::time::Duration;

use anyhow::{ensure, Context};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scache::{Cache, Config};

const WORKERS: usize = 4;
const OPS_PER_WORKER: usize = 500;

/// Main entry point for the demo.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache and start the expiry sweeper
/// 4. Run the LRU scenario, a TTL scenario and a concurrent workload
/// 5. Print statistics and stop the sweeper
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: capacity={}, default_ttl={}s, sweep_interval={}ms",
        config.capacity, config.default_ttl, config.sweep_interval_ms
    );

    let cache = Cache::from_config(&config);
    let ticker = cache.start_eviction_ticker(config.sweep_interval());

    lru_scenario().context("LRU scenario failed")?;
    ttl_scenario(&cache, &config).await?;
    concurrent_workload(&cache, &config).await?;

    let stats = cache.stats();
    info!("Hit rate: {:.1}%", stats.hit_rate() * 100.0);
    println!(
        "{}",
        serde_json::to_string_pretty(&stats).context("Failed to serialize stats")?
    );

    ticker.stop().await;
    info!("Demo complete");
    Ok(())
}

/// Capacity 2: touching `a` makes `b` the eviction victim when `c` arrives.
fn lru_scenario() -> anyhow::Result<()> {
    let cache = Cache::new(2);
    let hour = Duration::from_secs(3600);

    cache.set("a", "1", hour)?;
    cache.set("b", "2", hour)?;
    cache.get("a")?;
    cache.set("c", "3", hour)?;

    ensure!(!cache.contains("b"), "b should have been evicted");
    ensure!(cache.get("a")? == "1", "a should survive");
    ensure!(cache.get("c")? == "3", "c should be present");
    info!("LRU scenario: b evicted, a and c retained");
    Ok(())
}

/// A short-lived key that is never read is removed by the sweeper.
async fn ttl_scenario(cache: &Cache, config: &Config) -> anyhow::Result<()> {
    let ttl = Duration::from_millis(50);
    cache.set("ephemeral", "gone soon", ttl)?;

    let before = cache.len();
    tokio::time::sleep(ttl + config.sweep_interval() * 2).await;
    let after = cache.len();

    if after < before {
        info!("TTL scenario: sweeper removed the unread expired key");
    } else {
        warn!("TTL scenario: expired key still present after two sweep intervals");
    }
    Ok(())
}

/// Several threads hammer an overlapping key range.
async fn concurrent_workload(cache: &Cache, config: &Config) -> anyhow::Result<()> {
    let ttl = config.default_ttl_duration();

    let workers: Vec<_> = (0..WORKERS)
        .map(|worker| {
            let cache = cache.clone();
            tokio::task::spawn_blocking(move || -> scache::Result<usize> {
                let mut hits = 0;
                for i in 0..OPS_PER_WORKER {
                    let key = format!("key:{}", (worker * 31 + i) % 64);
                    if i % 3 == 0 {
                        cache.set(key, format!("worker{worker}:{i}"), ttl)?;
                    } else if cache.get(&key).is_ok() {
                        hits += 1;
                    }
                }
                Ok(hits)
            })
        })
        .collect();

    let mut total_hits = 0;
    for worker in workers {
        total_hits += worker.await.context("Worker panicked")??;
    }

    info!(
        "Concurrent workload: {} workers, {} hits, {} entries live",
        WORKERS,
        total_hits,
        cache.len()
    );
    Ok(())
}
