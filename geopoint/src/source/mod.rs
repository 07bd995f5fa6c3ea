//! Row sources: the consumed boundary to external tabular stores.
//!
//! The [`RowSource`] trait abstracts over where rows come from, so the
//! reload pipeline works identically against a remote export endpoint
//! ([`HttpRowSource`]) or a local file ([`FileRowSource`]). A fetch
//! always returns the complete row set; there is no incremental fetch.

mod error;
mod file;
mod http;

pub use error::SourceError;
pub use file::FileRowSource;
pub use http::HttpRowSource;

use std::future::Future;

use crate::dataset::Row;

/// Trait for fetching the full row set from an external source.
///
/// Implementations should return every row the source currently holds,
/// in source order - the dataset build relies on that order for its
/// documented last-row-wins overwrite behavior.
pub trait RowSource: Send + Sync {
    /// Fetch all rows from the source.
    fn fetch_rows(&self) -> impl Future<Output = Result<Vec<Row>, SourceError>> + Send;
}
