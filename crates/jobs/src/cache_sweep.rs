use mcgate_application::ports::CacheSweepPort;
use mcgate_domain::CacheConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Periodically drops expired status cache entries.
pub struct CacheSweepJob {
    sweeper: Arc<dyn CacheSweepPort>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl CacheSweepJob {
    pub fn new(sweeper: Arc<dyn CacheSweepPort>) -> Self {
        Self {
            sweeper,
            interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn from_config(sweeper: Arc<dyn CacheSweepPort>, config: &CacheConfig) -> Self {
        Self::new(sweeper).with_interval(config.sweep_interval_secs)
    }

    pub fn with_interval(mut self, secs: u64) -> Self {
        self.interval_secs = secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval_secs,
            "Starting cache sweep job"
        );

        let job = Arc::clone(&self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(job.interval());
            // The first tick fires immediately; nothing can have expired yet.
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = job.shutdown.cancelled() => {
                        info!("CacheSweepJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let outcome = job.sweeper.run_sweep_cycle();
                        if outcome.entries_removed > 0 {
                            info!(
                                entries_removed = outcome.entries_removed,
                                cache_size = outcome.cache_size,
                                "Cache sweep cycle completed"
                            );
                        } else {
                            debug!(
                                cache_size = outcome.cache_size,
                                "Cache sweep found nothing expired"
                            );
                        }
                    }
                }
            }
        });
    }
}
