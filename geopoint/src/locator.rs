//! Exact and nearest-neighbor resolution over a dataset snapshot.
//!
//! Stateless query logic: an O(1) exact lookup on the bit-exact key,
//! falling back to a brute-force O(n) nearest-neighbor scan by squared
//! Euclidean distance in degree space.
//!
//! The linear scan is a deliberate scaling limit: datasets here are
//! sheet-sized (hundreds of rows). If they grow, a spatial index (grid
//! bucketing or a k-d tree) can replace the scan behind [`resolve`]
//! without changing callers.

use thiserror::Error;

use crate::dataset::{CoordKey, Dataset, Record};

/// How a query point was matched against the dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchKind {
    /// The query coordinates equal a stored key exactly.
    Exact,
    /// No exact key; the closest key by squared Euclidean distance.
    ///
    /// Carries the matched key so callers can report which coordinate
    /// actually answered the query.
    Nearest(CoordKey),
}

impl MatchKind {
    /// True for nearest (approximate) matches.
    pub fn is_nearest(&self) -> bool {
        matches!(self, Self::Nearest(_))
    }
}

/// A resolved query: the winning record and how it was found.
#[derive(Debug)]
pub struct ResolvedMatch<'a> {
    /// The record answering the query.
    pub record: &'a Record,
    /// Exact hit or nearest-neighbor fallback.
    pub kind: MatchKind,
}

/// Errors raised during resolution.
#[derive(Debug, Error, PartialEq)]
pub enum LocateError {
    /// The dataset holds no records, so there is nothing to return.
    #[error("dataset is empty")]
    EmptyDataset,
}

/// Resolve a query point against a dataset snapshot.
///
/// Tries the exact key first, then falls back to the nearest stored key
/// by squared Euclidean distance. Distance ties are broken
/// deterministically: smallest latitude wins, then smallest longitude -
/// repeated identical queries always return the same record regardless
/// of map iteration order.
///
/// Coordinates are not range-validated. Out-of-range values (beyond
/// [-90, 90] / [-180, 180]) are accepted and resolved geometrically like
/// any other point; rejecting them is a product decision this layer
/// does not take.
///
/// # Errors
///
/// Returns [`LocateError::EmptyDataset`] if the dataset has no records.
pub fn resolve(dataset: &Dataset, lat: f64, lon: f64) -> Result<ResolvedMatch<'_>, LocateError> {
    if dataset.is_empty() {
        return Err(LocateError::EmptyDataset);
    }

    // Exact match on the bit-exact key - O(1)
    let query_key = CoordKey::new(lat, lon);
    if let Some(record) = dataset.get(&query_key) {
        return Ok(ResolvedMatch {
            record,
            kind: MatchKind::Exact,
        });
    }

    // Nearest-neighbor fallback - O(n) scan over every key
    let mut best: Option<(f64, &CoordKey, &Record)> = None;

    for (key, record) in dataset.iter() {
        let dist = key.distance_sq(lat, lon);

        let replace = match best {
            None => true,
            Some((best_dist, best_key, _)) => match dist.total_cmp(&best_dist) {
                std::cmp::Ordering::Less => true,
                std::cmp::Ordering::Equal => {
                    key.cmp_lat_lon(best_key) == std::cmp::Ordering::Less
                }
                std::cmp::Ordering::Greater => false,
            },
        };

        if replace {
            best = Some((dist, key, record));
        }
    }

    // Dataset is non-empty, so the scan always produced a winner
    let (_, key, record) = best.ok_or(LocateError::EmptyDataset)?;

    Ok(ResolvedMatch {
        record,
        kind: MatchKind::Nearest(*key),
    })
}
