//! Reload pipeline: fetch rows, build off to the side, publish on success.
//!
//! - [`ReloadController`] - one-shot reload: source -> build -> publish
//! - [`RefreshDaemon`] - periodic reloads with backoff and cancellation
//!
//! The invariant both uphold: a failed fetch or build never touches the
//! currently published snapshot. The new dataset is built entirely
//! outside the store and swapped in with a single atomic publish, so
//! concurrent queries are never blocked and never see partial state.

mod config;
mod daemon;
mod error;

pub use config::{RefreshConfig, DEFAULT_MAX_BACKOFF_SECS, DEFAULT_REFRESH_INTERVAL_SECS};
pub use daemon::RefreshDaemon;
pub use error::ReloadError;

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::dataset::Dataset;
use crate::source::RowSource;
use crate::store::DatasetStore;

/// Outcome of a successful reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadSummary {
    /// Number of records in the published dataset.
    pub record_count: usize,
    /// Wall time for the whole fetch-build-publish pipeline.
    pub elapsed: Duration,
}

/// Runs the load pipeline against a row source and publishes the result.
///
/// Shared between the initial startup load and every subsequent reload -
/// there is no separate "first load" path, which keeps startup an
/// explicit, retryable step rather than a side effect of process setup.
pub struct ReloadController<S: RowSource> {
    source: S,
    store: Arc<DatasetStore>,
}

impl<S: RowSource> ReloadController<S> {
    /// Create a controller loading from `source` into `store`.
    pub fn new(source: S, store: Arc<DatasetStore>) -> Self {
        Self { source, store }
    }

    /// The store this controller publishes into.
    pub fn store(&self) -> &Arc<DatasetStore> {
        &self.store
    }

    /// Fetch fresh rows, build a new dataset, and publish it.
    ///
    /// The fetch and build happen entirely off to the side; queries keep
    /// reading the previous snapshot until the final atomic publish. On
    /// any failure the previous snapshot stays in place untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ReloadError`] if the source fetch fails or a row is
    /// malformed. The error is reported to whoever triggered the reload;
    /// it never corrupts served state.
    pub async fn reload(&self) -> Result<ReloadSummary, ReloadError> {
        let started = Instant::now();

        let rows = self.source.fetch_rows().await?;
        let row_count = rows.len();

        let dataset = Dataset::from_rows(rows)?;
        let record_count = dataset.len();

        self.store.publish(Arc::new(dataset));

        let elapsed = started.elapsed();
        tracing::info!(
            rows = row_count,
            records = record_count,
            elapsed_ms = elapsed.as_millis() as u64,
            "Dataset reloaded and published"
        );

        Ok(ReloadSummary {
            record_count,
            elapsed,
        })
    }
}
