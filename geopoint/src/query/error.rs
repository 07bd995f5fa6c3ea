//! Query error types.

use thiserror::Error;

/// Errors surfaced to callers of the query service.
///
/// Every failure is a typed result - nothing here crashes the process.
/// The variants map one-to-one onto the caller-visible failure kinds:
/// client error, service-not-ready, and no-data.
#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    /// A query parameter is missing entirely.
    #[error("missing required parameter '{name}'")]
    MissingParameter {
        /// Parameter name ("lat" or "lon").
        name: &'static str,
    },

    /// A query parameter is present but not numeric.
    #[error("parameter '{name}' is not numeric: '{value}'")]
    InvalidParameter {
        /// Parameter name ("lat" or "lon").
        name: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },

    /// No dataset has ever been published; the service is not ready.
    #[error("no dataset has been loaded yet")]
    Uninitialized,

    /// The current dataset is empty, so there is no record to return.
    #[error("no data available")]
    NoData,
}

impl QueryError {
    /// True for failures caused by the caller's input rather than
    /// service state.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingParameter { .. } | Self::InvalidParameter { .. }
        )
    }
}
