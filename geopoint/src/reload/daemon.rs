//! Periodic refresh daemon.
//!
//! Re-runs the reload pipeline on a fixed interval so the served
//! dataset tracks the upstream source. Failures are logged and retried
//! with exponential backoff; they never take down the daemon and never
//! disturb the snapshot being served.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::source::RowSource;

use super::config::RefreshConfig;
use super::ReloadController;

/// Periodic reload driver.
///
/// `start()` consumes the daemon and spawns the loop as a tokio task;
/// the returned handle resolves once the cancellation token fires and
/// the loop drains.
pub struct RefreshDaemon<S: RowSource> {
    controller: ReloadController<S>,
    config: RefreshConfig,
    shutdown: CancellationToken,
}

impl<S: RowSource + 'static> RefreshDaemon<S> {
    /// Create a daemon around an existing controller.
    ///
    /// Cancelling `shutdown` stops the loop after the current tick.
    pub fn new(
        controller: ReloadController<S>,
        config: RefreshConfig,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            controller,
            config,
            shutdown,
        }
    }

    /// Start the refresh loop as an async task.
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    /// Run the refresh loop.
    async fn run(self) {
        tracing::info!(
            interval_secs = self.config.interval.as_secs(),
            "Refresh daemon started"
        );

        let mut interval = tokio::time::interval(self.config.interval);
        // The first tick fires immediately; the initial load already
        // happened at startup, so skip it.
        interval.tick().await;

        let mut consecutive_errors: u32 = 0;

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                _ = interval.tick() => {}
            }

            if consecutive_errors > 0 {
                let backoff = calculate_backoff(consecutive_errors, self.config.max_backoff);
                tracing::debug!(
                    backoff_secs = backoff.as_secs(),
                    consecutive_errors,
                    "Backing off after failed refreshes"
                );
                tokio::select! {
                    _ = self.shutdown.cancelled() => break,
                    _ = tokio::time::sleep(backoff) => {}
                }
            }

            match self.controller.reload().await {
                Ok(summary) => {
                    consecutive_errors = 0;
                    tracing::debug!(
                        records = summary.record_count,
                        elapsed_ms = summary.elapsed.as_millis() as u64,
                        "Periodic refresh complete"
                    );
                }
                Err(e) => {
                    consecutive_errors += 1;
                    tracing::warn!(
                        error = %e,
                        consecutive_errors,
                        "Periodic refresh failed; previous dataset still served"
                    );
                }
            }
        }

        tracing::info!("Refresh daemon stopped");
    }
}

/// Exponential backoff: 2^n seconds, capped at `max`.
fn calculate_backoff(consecutive_errors: u32, max: Duration) -> Duration {
    let secs = 2u64.saturating_pow(consecutive_errors.min(20));
    Duration::from_secs(secs).min(max)
}
