//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries, so
//! entries nobody reads again stop occupying the size budget.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{BoundedLruCache, Clock, SizeEstimator};

/// Spawns a background task that periodically purges expired cache entries.
///
/// The task runs in an infinite loop, sleeping for `interval` between
/// sweeps. Each sweep holds the write lock only while purging.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(BoundedLruCache::<String>::new(1024)));
/// let sweep_handle = spawn_sweep_task(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<V, E, C>(
    cache: Arc<RwLock<BoundedLruCache<V, E, C>>>,
    interval: Duration,
) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
    E: SizeEstimator<V> + 'static,
    C: Clock + 'static,
{
    tokio::spawn(async move {
        info!(
            interval_ms = interval.as_millis() as u64,
            "Starting TTL sweep task"
        );

        loop {
            tokio::time::sleep(interval).await;

            let (removed, total_size) = {
                let mut cache_guard = cache.write().await;
                let removed = cache_guard.purge_expired();
                (removed, cache_guard.total_size())
            };

            if removed > 0 {
                info!(removed, total_size, "TTL sweep removed expired entries");
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    })
}
