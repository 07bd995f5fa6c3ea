//! Error types for row sources.

use thiserror::Error;

/// Errors that can occur when fetching rows from an external source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed (connect, timeout, or non-success status).
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The payload was fetched but is not a JSON array of row objects.
    #[error("failed to parse rows: {0}")]
    Parse(String),

    /// Local I/O failed (file sources).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
