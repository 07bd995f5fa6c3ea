//! Process-wide holder of the current dataset snapshot.
//!
//! The store is a single atomic slot: `publish` swaps in a new snapshot
//! pointer, `current` loads whichever snapshot is in effect at that
//! instant. Readers never take a lock and writers never block readers -
//! a query that loaded the previous snapshot keeps it alive through its
//! own `Arc` until it finishes.

use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::dataset::Dataset;

/// Atomic slot holding "the current dataset".
///
/// Starts uninitialized; [`DatasetStore::current`] returns `None` until
/// the first [`DatasetStore::publish`]. `None` is deliberately distinct
/// from an empty dataset so callers can tell "no data yet" from
/// "dataset empty by design".
///
/// Intended usage is one store per process, shared as `Arc<DatasetStore>`
/// between the query service and the reload controller.
#[derive(Debug, Default)]
pub struct DatasetStore {
    slot: ArcSwapOption<Dataset>,
}

impl DatasetStore {
    /// Create an empty, uninitialized store.
    pub fn new() -> Self {
        Self {
            slot: ArcSwapOption::const_empty(),
        }
    }

    /// Atomically make `dataset` the current snapshot.
    ///
    /// Safe to call while queries concurrently read the previous
    /// snapshot: the swap is a single atomic pointer exchange, so no
    /// reader ever observes a half-updated dataset.
    pub fn publish(&self, dataset: Arc<Dataset>) {
        self.slot.store(Some(dataset));
    }

    /// The snapshot in effect at the moment of the call.
    ///
    /// O(1) and lock-free; the returned `Arc` pins that snapshot for as
    /// long as the caller holds it, regardless of later publishes.
    /// Returns `None` if nothing has been published yet.
    pub fn current(&self) -> Option<Arc<Dataset>> {
        self.slot.load_full()
    }

    /// True once an initial snapshot has been published.
    pub fn is_initialized(&self) -> bool {
        self.slot.load().is_some()
    }
}
