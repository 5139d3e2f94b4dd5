/// Background maintenance for the media cache
use crate::resolution::MediaUrlCache;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::info;

/// Scheduler for periodic cache maintenance.
///
/// Eviction-on-access keeps lookups correct on its own; the sweep only
/// bounds memory held by keys that are never looked up again.
pub struct MaintenanceScheduler {
    cache: Arc<MediaUrlCache>,
    sweep_interval: Duration,
}

impl MaintenanceScheduler {
    /// Create a scheduler sweeping every 30 minutes
    pub fn new(cache: Arc<MediaUrlCache>) -> Self {
        Self {
            cache,
            sweep_interval: Duration::from_secs(1800),
        }
    }

    /// Override the sweep interval
    pub fn with_interval(mut self, sweep_interval: Duration) -> Self {
        self.sweep_interval = sweep_interval;
        self
    }

    /// Start the background sweep task
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        info!("Starting media cache maintenance");

        tokio::spawn(Self::cleanup_job(self.cache, self.sweep_interval))
    }

    /// Evict expired cache entries on every tick
    async fn cleanup_job(cache: Arc<MediaUrlCache>, sweep_interval: Duration) {
        let mut interval = interval(sweep_interval);
        // The first tick fires immediately; skip it so a fresh cache is not
        // swept at startup
        interval.tick().await;

        loop {
            interval.tick().await;

            let evicted = cache.cleanup_expired().await;
            if evicted > 0 {
                info!("Evicted {} expired media URL(s) from cache", evicted);
            }
        }
    }
}
