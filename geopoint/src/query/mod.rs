//! Query orchestration: parse, resolve, shape the response.
//!
//! [`QueryService`] is the caller-facing entry point: it parses raw
//! latitude/longitude parameters, reads the current snapshot from the
//! [`DatasetStore`], delegates to the locator, and attaches query
//! metadata (elapsed time, nearest-match coordinates) to the result.
//!
//! Exact and nearest matches are never conflated: a nearest match
//! always carries the matched coordinates and an explicit message flag.

mod error;

pub use error::QueryError;

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::dataset::FieldMap;
use crate::locator::{self, MatchKind};
use crate::store::DatasetStore;

/// Message attached to responses answered by the nearest-neighbor
/// fallback rather than an exact key.
pub const NEAREST_MATCH_MESSAGE: &str = "approximate match: nearest known coordinate returned";

/// A successful query result.
///
/// Serializes to the wire shape clients expect: the record's fields at
/// the top level, `execution_time` as a formatted string, and - only
/// for nearest matches - `nearest_lat`, `nearest_lon`, and `message`.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    /// The matched record's fields.
    #[serde(flatten)]
    pub fields: FieldMap,

    /// Elapsed resolution time, formatted as `"0.0042 seconds"`.
    pub execution_time: String,

    /// Latitude of the matched key, present only on nearest matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest_lat: Option<f64>,

    /// Longitude of the matched key, present only on nearest matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest_lon: Option<f64>,

    /// Approximate-match flag, present only on nearest matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,

    /// Raw elapsed resolution time for in-process callers.
    #[serde(skip)]
    pub elapsed: Duration,
}

impl QueryResponse {
    /// True if this response came from the nearest-neighbor fallback.
    pub fn is_nearest(&self) -> bool {
        self.message.is_some()
    }
}

/// Caller-facing query entry point.
///
/// Stateless apart from the shared store handle; cheap to clone and
/// safe to use from any number of concurrent tasks.
#[derive(Clone)]
pub struct QueryService {
    store: Arc<DatasetStore>,
}

impl QueryService {
    /// Create a query service reading snapshots from `store`.
    pub fn new(store: Arc<DatasetStore>) -> Self {
        Self { store }
    }

    /// Answer a coordinate query from raw request parameters.
    ///
    /// Parses both parameters, reads the snapshot current at this
    /// instant, and resolves the point. The snapshot is pinned for the
    /// duration of the call - a concurrent reload cannot tear it.
    ///
    /// # Errors
    ///
    /// - [`QueryError::MissingParameter`] / [`QueryError::InvalidParameter`]
    ///   if either parameter is absent or non-numeric
    /// - [`QueryError::Uninitialized`] if no dataset was ever published
    /// - [`QueryError::NoData`] if the current dataset is empty
    pub fn handle(
        &self,
        raw_lat: Option<&str>,
        raw_lon: Option<&str>,
    ) -> Result<QueryResponse, QueryError> {
        let started = Instant::now();

        let lat = parse_param("lat", raw_lat)?;
        let lon = parse_param("lon", raw_lon)?;

        let dataset = self.store.current().ok_or(QueryError::Uninitialized)?;

        let resolved = locator::resolve(&dataset, lat, lon).map_err(|_| QueryError::NoData)?;

        let elapsed = started.elapsed();
        let (nearest_lat, nearest_lon, message) = match resolved.kind {
            MatchKind::Exact => (None, None, None),
            MatchKind::Nearest(key) => (Some(key.lat), Some(key.lon), Some(NEAREST_MATCH_MESSAGE)),
        };

        tracing::debug!(
            lat,
            lon,
            nearest = resolved.kind.is_nearest(),
            elapsed_us = elapsed.as_micros() as u64,
            "Query resolved"
        );

        Ok(QueryResponse {
            fields: resolved.record.fields.clone(),
            execution_time: format!("{:.4} seconds", elapsed.as_secs_f64()),
            nearest_lat,
            nearest_lon,
            message,
            elapsed,
        })
    }
}

/// Parse one raw query parameter as `f64`.
fn parse_param(name: &'static str, raw: Option<&str>) -> Result<f64, QueryError> {
    let raw = raw.ok_or(QueryError::MissingParameter { name })?;
    raw.trim()
        .parse::<f64>()
        .map_err(|_| QueryError::InvalidParameter {
            name,
            value: raw.to_string(),
        })
}
