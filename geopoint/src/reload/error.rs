//! Error types for the reload pipeline.

use thiserror::Error;

use crate::dataset::DatasetError;
use crate::source::SourceError;

/// Errors that can occur during a reload attempt.
///
/// Either phase failing leaves the previously published dataset
/// untouched; the store is only written after both succeed.
#[derive(Debug, Error)]
pub enum ReloadError {
    /// The row source could not deliver rows.
    #[error("row fetch failed: {0}")]
    Source(#[from] SourceError),

    /// Rows were fetched but the dataset build rejected them.
    #[error("dataset build failed: {0}")]
    Build(#[from] DatasetError),
}
