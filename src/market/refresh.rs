use crate::market::aggregator::SnapshotAggregator;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const MAX_BACKOFF_SHIFT: u32 = 5;

/// Cancellable periodic snapshot refresh
///
/// Runs `capture` on a fixed interval and backs off exponentially (with
/// jitter) while captures keep failing. A stop request takes effect at the
/// next loop turn; an in-flight capture is already bounded by the feed
/// timeouts, so shutdown cannot hang indefinitely.
pub struct RefreshTask {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl RefreshTask {
    pub fn spawn(aggregator: Arc<SnapshotAggregator>, interval: Duration) -> Self {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let handle = tokio::spawn(async move {
            let mut consecutive_failures: u32 = 0;
            info!(interval_secs = interval.as_secs(), "refresh task started");
            loop {
                let delay = next_delay(interval, consecutive_failures);
                tokio::select! {
                    _ = stop_rx.changed() => {
                        info!("refresh task stopping");
                        break;
                    }
                    _ = tokio::time::sleep(delay) => {
                        match aggregator.capture().await {
                            Ok(snapshot) => {
                                consecutive_failures = 0;
                                debug!(premium_a = %snapshot.premium_a, "background refresh");
                            }
                            Err(e) => {
                                consecutive_failures += 1;
                                warn!(
                                    error = %e,
                                    consecutive_failures,
                                    "background refresh failed"
                                );
                            }
                        }
                    }
                }
            }
        });
        Self { stop_tx, handle }
    }

    /// Signal the loop to stop and wait for it to finish
    pub async fn shutdown(self) {
        let _ = self.stop_tx.send(true);
        let _ = self.handle.await;
    }
}

/// Interval for the next capture attempt
///
/// Healthy: the base interval. Failing: base doubled per consecutive
/// failure (capped), plus deterministic jitter to avoid hammering a
/// recovering upstream in lockstep with other instances.
fn next_delay(base: Duration, consecutive_failures: u32) -> Duration {
    if consecutive_failures == 0 {
        return base;
    }
    let shift = consecutive_failures.min(MAX_BACKOFF_SHIFT);
    let mut delay = base.saturating_mul(1u32 << shift);

    // Jitter to prevent thundering herd
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    let mut hasher = DefaultHasher::new();
    consecutive_failures.hash(&mut hasher);
    let jitter_ms = hasher.finish() % 500;
    delay += Duration::from_millis(jitter_ms);
    delay
}
