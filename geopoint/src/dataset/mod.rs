//! Dataset model: coordinate-keyed record snapshots.
//!
//! A [`Dataset`] is an immutable point-in-time snapshot mapping exact
//! coordinate keys to records, built in one pass from externally
//! supplied rows:
//!
//! - [`CoordKey`] - bit-exact (latitude, longitude) lookup key
//! - [`Row`] - a raw source row (open field map)
//! - [`Record`] - the immutable payload stored per key
//! - [`Dataset`] - the snapshot itself
//!
//! Snapshots are never mutated after the build; a reload builds a whole
//! new `Dataset` and swaps it in via the store.

mod types;

pub use types::{
    CoordKey, DatasetError, FieldMap, Record, Row, LATITUDE_FIELD, LONGITUDE_FIELD,
};

use std::collections::HashMap;

use serde_json::Value;

/// Immutable snapshot of coordinate-keyed records.
///
/// Built once from a sequence of rows and then only read. Lookup is O(1)
/// on the exact key; the nearest-neighbor scan in the locator iterates
/// every entry.
#[derive(Debug, Default)]
pub struct Dataset {
    records: HashMap<CoordKey, Record>,
}

impl Dataset {
    /// Build a dataset from source rows, consumed in source order.
    ///
    /// Each row must carry numeric `Latitude` and `Longitude` columns.
    /// Sheet-style sources deliver numbers as strings, so both JSON
    /// numbers and numeric strings are accepted.
    ///
    /// Duplicate keys are not an error: the later row in source order
    /// silently overwrites the earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if any row is missing a coordinate column
    /// or carries one that does not parse as a number. The build is
    /// all-or-nothing - a single malformed row aborts the whole attempt.
    pub fn from_rows(rows: Vec<Row>) -> Result<Self, DatasetError> {
        let mut records = HashMap::with_capacity(rows.len());

        for (index, row) in rows.into_iter().enumerate() {
            let lat = coordinate_field(&row, index, LATITUDE_FIELD)?;
            let lon = coordinate_field(&row, index, LONGITUDE_FIELD)?;

            let key = CoordKey::new(lat, lon);
            records.insert(
                key,
                Record {
                    key,
                    fields: row.fields,
                },
            );
        }

        Ok(Self { records })
    }

    /// Look up the record stored under an exact key.
    pub fn get(&self, key: &CoordKey) -> Option<&Record> {
        self.records.get(key)
    }

    /// Number of records in the snapshot.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the snapshot holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over all (key, record) entries.
    ///
    /// Iteration order is unspecified; callers that need determinism
    /// (the locator's tie-break) must impose their own order.
    pub fn iter(&self) -> impl Iterator<Item = (&CoordKey, &Record)> {
        self.records.iter()
    }
}

/// Extract one coordinate column from a row and parse it as `f64`.
fn coordinate_field(row: &Row, index: usize, field: &'static str) -> Result<f64, DatasetError> {
    let value = row
        .fields
        .get(field)
        .ok_or(DatasetError::MissingField { index, field })?;

    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| DatasetError::UnparseableCoordinate {
        index,
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(entries: serde_json::Value) -> Row {
        serde_json::from_value(entries).expect("test row should deserialize")
    }

    #[test]
    fn test_from_rows_builds_keyed_records() {
        let dataset = Dataset::from_rows(vec![
            row(json!({"Latitude": 10.0, "Longitude": 20.0, "value": "A"})),
            row(json!({"Latitude": 10.0, "Longitude": 21.0, "value": "B"})),
        ])
        .unwrap();

        assert_eq!(dataset.len(), 2);
        let record = dataset.get(&CoordKey::new(10.0, 20.0)).unwrap();
        assert_eq!(record.fields["value"], json!("A"));
    }

    #[test]
    fn test_from_rows_accepts_string_coordinates() {
        // Sheet sources deliver numbers as strings
        let dataset = Dataset::from_rows(vec![row(json!({
            "Latitude": "53.63",
            "Longitude": " 9.98 ",
            "site": "EDDH"
        }))])
        .unwrap();

        let record = dataset.get(&CoordKey::new(53.63, 9.98)).unwrap();
        assert_eq!(record.fields["site"], json!("EDDH"));
        // Original string values survive in the record fields
        assert_eq!(record.fields["Latitude"], json!("53.63"));
    }

    #[test]
    fn test_from_rows_missing_latitude_fails() {
        let result = Dataset::from_rows(vec![
            row(json!({"Latitude": 1.0, "Longitude": 2.0})),
            row(json!({"Longitude": 2.0})),
        ]);

        match result {
            Err(DatasetError::MissingField { index, field }) => {
                assert_eq!(index, 1);
                assert_eq!(field, LATITUDE_FIELD);
            }
            other => panic!("Expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_from_rows_non_numeric_longitude_fails() {
        let result = Dataset::from_rows(vec![row(json!({
            "Latitude": 1.0,
            "Longitude": "east-ish"
        }))]);

        match result {
            Err(DatasetError::UnparseableCoordinate { index, field, .. }) => {
                assert_eq!(index, 0);
                assert_eq!(field, LONGITUDE_FIELD);
            }
            other => panic!("Expected UnparseableCoordinate, got {:?}", other),
        }
    }

    #[test]
    fn test_from_rows_boolean_coordinate_fails() {
        let result = Dataset::from_rows(vec![row(json!({
            "Latitude": true,
            "Longitude": 2.0
        }))]);

        assert!(matches!(
            result,
            Err(DatasetError::UnparseableCoordinate { .. })
        ));
    }

    #[test]
    fn test_from_rows_duplicate_key_last_row_wins() {
        let dataset = Dataset::from_rows(vec![
            row(json!({"Latitude": 10.0, "Longitude": 20.0, "value": "first"})),
            row(json!({"Latitude": 10.0, "Longitude": 20.0, "value": "second"})),
        ])
        .unwrap();

        assert_eq!(dataset.len(), 1);
        let record = dataset.get(&CoordKey::new(10.0, 20.0)).unwrap();
        assert_eq!(record.fields["value"], json!("second"));
    }

    #[test]
    fn test_from_rows_empty_input_builds_empty_dataset() {
        let dataset = Dataset::from_rows(Vec::new()).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.len(), 0);
    }

    #[test]
    fn test_get_misses_on_inexact_coordinates() {
        let dataset = Dataset::from_rows(vec![row(json!({
            "Latitude": 10.0,
            "Longitude": 20.0
        }))])
        .unwrap();

        assert!(dataset.get(&CoordKey::new(10.0, 20.0)).is_some());
        assert!(dataset.get(&CoordKey::new(10.0, 20.0000001)).is_none());
    }
}
