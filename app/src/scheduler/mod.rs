use std::{sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    task::{JoinHandle, JoinSet},
    time::{Instant, MissedTickBehavior},
};

use crate::sync::{BroadcastSource, Synchronizer};

/// Triggers a sync pass right away and then once every `period`.
///
/// Each tick spawns its pass, so the timer keeps its rhythm while a slow pass
/// is running; the synchronizer's run-lock turns an overlapping tick into a
/// no-op.
pub struct SyncScheduler {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl SyncScheduler {
    pub fn start<S>(synchronizer: Arc<Synchronizer<S>>, period: Duration) -> Self
    where
        S: BroadcastSource + Send + Sync + 'static,
    {
        let (shutdown, mut stopped) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now(), period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut passes = JoinSet::new();

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let synchronizer = synchronizer.clone();
                        passes.spawn(async move {
                            synchronizer.run_pass().await;
                        });
                    }
                    Some(joined) = passes.join_next(), if !passes.is_empty() => {
                        if let Err(e) = joined {
                            tracing::error!("Sync pass task failed: {}", e);
                        }
                    }
                    _ = stopped.changed() => break,
                }
            }

            if !passes.is_empty() {
                tracing::info!("Waiting for {} in-flight sync pass(es)", passes.len());
            }
            while let Some(joined) = passes.join_next().await {
                if let Err(e) = joined {
                    tracing::error!("Sync pass task failed: {}", e);
                }
            }

            tracing::info!("Sync scheduler stopped");
        });

        tracing::info!("Sync scheduler started, polling every {}s", period.as_secs());
        Self { shutdown, handle }
    }

    /// Stops the timer and waits for any pass still in flight, so the caller
    /// can close the database afterwards.
    pub async fn shutdown(self) {
        self.shutdown.send(true).ok();
        if let Err(e) = self.handle.await {
            tracing::error!("Sync scheduler task failed: {}", e);
        }
    }
}
