//! Dataset type definitions

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field name carrying the latitude in source rows.
pub const LATITUDE_FIELD: &str = "Latitude";

/// Field name carrying the longitude in source rows.
pub const LONGITUDE_FIELD: &str = "Longitude";

/// Open mapping from field name to JSON scalar (string, number, or bool).
///
/// Rows arrive from tabular sources with arbitrary column sets, so the
/// payload stays schemaless rather than being forced into a struct.
pub type FieldMap = serde_json::Map<String, serde_json::Value>;

/// Exact (latitude, longitude) lookup key.
///
/// Equality and hashing are bit-level float equality on both components
/// (`f64::to_bits`) - there is no tolerance band. Two coordinates match
/// only if they are the same parsed number. Consequences of bit identity:
/// `-0.0` and `0.0` are distinct keys, and identical NaN bit patterns
/// compare equal. Coordinates here come from parsed decimal text, where
/// neither case arises in practice.
#[derive(Debug, Clone, Copy)]
pub struct CoordKey {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl CoordKey {
    /// Create a new coordinate key.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Squared Euclidean distance to another point in degree space.
    ///
    /// No square root - the squared form is monotonic, which is all a
    /// nearest-neighbor comparison needs.
    #[inline]
    pub fn distance_sq(&self, lat: f64, lon: f64) -> f64 {
        let dlat = lat - self.lat;
        let dlon = lon - self.lon;
        dlat * dlat + dlon * dlon
    }

    /// Total order over keys: latitude ascending, then longitude ascending.
    ///
    /// Used to break distance ties deterministically. `total_cmp` keeps
    /// the order total even for non-finite components.
    #[inline]
    pub fn cmp_lat_lon(&self, other: &Self) -> std::cmp::Ordering {
        self.lat
            .total_cmp(&other.lat)
            .then_with(|| self.lon.total_cmp(&other.lon))
    }
}

impl PartialEq for CoordKey {
    fn eq(&self, other: &Self) -> bool {
        self.lat.to_bits() == other.lat.to_bits() && self.lon.to_bits() == other.lon.to_bits()
    }
}

impl Eq for CoordKey {}

impl Hash for CoordKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lat.to_bits().hash(state);
        self.lon.to_bits().hash(state);
    }
}

impl fmt::Display for CoordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// A single source row, exactly as delivered by a row source.
///
/// This is our own type, decoupled from any transport: a JSON object with
/// at least `Latitude` and `Longitude` columns plus arbitrary others.
/// Validation happens at dataset build time, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// All named fields of the row.
    #[serde(flatten)]
    pub fields: FieldMap,
}

impl Row {
    /// Create a row from a field map.
    pub fn new(fields: FieldMap) -> Self {
        Self { fields }
    }
}

/// Immutable payload stored for one coordinate key.
///
/// Carries every field of the originating row, including the original
/// `Latitude`/`Longitude` values. Records are never mutated after the
/// dataset build; queries that need to attach metadata clone the fields
/// into a new response instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// The key this record is stored under.
    pub key: CoordKey,
    /// The row's named fields.
    pub fields: FieldMap,
}

/// Errors raised while building a dataset from source rows.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A row lacks a required coordinate column.
    #[error("row {index} is missing required field '{field}'")]
    MissingField {
        /// Zero-based position of the row in source order.
        index: usize,
        /// The missing column name.
        field: &'static str,
    },

    /// A coordinate column is present but not parseable as a number.
    #[error("row {index} field '{field}' is not numeric: {value}")]
    UnparseableCoordinate {
        /// Zero-based position of the row in source order.
        index: usize,
        /// The offending column name.
        field: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },
}
