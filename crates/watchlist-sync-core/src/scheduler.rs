use crate::sync::WatchlistSyncEngine;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::info;
use watchlist_sync_config::SchedulerConfig;

/// Interval-driven sweep loop. A single ticker with delayed missed-tick
/// behavior runs every sweep to completion before the next can start, so
/// no two passes for the same user ever overlap.
pub struct SyncScheduler {
    engine: Arc<WatchlistSyncEngine>,
    config: SchedulerConfig,
}

impl SyncScheduler {
    pub fn new(engine: Arc<WatchlistSyncEngine>, config: SchedulerConfig) -> Self {
        Self { engine, config }
    }

    pub async fn run(&self) {
        if self.config.run_on_startup {
            info!("Running initial watchlist sync on startup");
            self.sweep().await;
        }

        let mut ticker = tokio::time::interval(Duration::from_secs(self.config.interval_secs));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; consume it so the first
        // scheduled sweep happens a full interval from now
        ticker.tick().await;

        info!(
            interval_secs = self.config.interval_secs,
            "Watchlist sync scheduler started"
        );

        loop {
            ticker.tick().await;
            self.sweep().await;
        }
    }

    async fn sweep(&self) {
        let summary = self.engine.sync_all().await;
        info!(
            users_synced = summary.users_synced,
            requests_created = summary.requests_created,
            duration_ms = summary.duration.as_millis() as u64,
            error_count = summary.errors.len(),
            "Watchlist sync sweep completed"
        );
    }
}
