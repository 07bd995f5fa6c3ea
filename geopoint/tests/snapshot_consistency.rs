//! Snapshot consistency under concurrent reload.
//!
//! Verifies the store's core concurrency guarantee: queries racing a
//! reload observe either the pre-reload or the post-reload dataset in
//! full, never a mix. Two datasets with disjoint key sets are published
//! in alternation while reader threads query continuously; every answer
//! must come entirely from one dataset or the other.
//!
//! Run with: `cargo test --test snapshot_consistency`

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde_json::json;

use geopoint::dataset::{Dataset, Row};
use geopoint::query::QueryService;
use geopoint::store::DatasetStore;

// ============================================================================
// Test Helpers
// ============================================================================

/// Dataset "A": two records around the origin, every field tagged "A".
fn dataset_a() -> Arc<Dataset> {
    build_dataset(vec![
        json!({"Latitude": 0.0, "Longitude": 0.0, "set": "A", "value": "a0"}),
        json!({"Latitude": 0.0, "Longitude": 1.0, "set": "A", "value": "a1"}),
    ])
}

/// Dataset "B": two records far from A's keys, every field tagged "B".
fn dataset_b() -> Arc<Dataset> {
    build_dataset(vec![
        json!({"Latitude": 50.0, "Longitude": 50.0, "set": "B", "value": "b0"}),
        json!({"Latitude": 50.0, "Longitude": 51.0, "set": "B", "value": "b1"}),
    ])
}

fn build_dataset(rows: Vec<serde_json::Value>) -> Arc<Dataset> {
    let rows: Vec<Row> = rows
        .into_iter()
        .map(|v| serde_json::from_value(v).expect("test row"))
        .collect();
    Arc::new(Dataset::from_rows(rows).expect("test dataset"))
}

// ============================================================================
// Consistency Under Reload
// ============================================================================

#[test]
fn test_concurrent_queries_observe_one_complete_snapshot() {
    let store = Arc::new(DatasetStore::new());
    store.publish(dataset_a());

    let service = QueryService::new(Arc::clone(&store));
    let stop = Arc::new(AtomicBool::new(false));

    // Reader threads: hammer queries and record which set answered
    let mut readers = Vec::new();
    for _ in 0..4 {
        let service = service.clone();
        let stop = Arc::clone(&stop);
        readers.push(thread::spawn(move || {
            let mut saw_a = false;
            let mut saw_b = false;

            while !stop.load(Ordering::Relaxed) {
                // (25, 25) is between the two key clusters; the nearest
                // key depends entirely on which snapshot the query sees
                let response = service
                    .handle(Some("25.0"), Some("25.0"))
                    .expect("query should always succeed while initialized");

                match response.fields["set"].as_str() {
                    Some("A") => {
                        saw_a = true;
                        // A's nearest key to (25,25) is (0,1); a record
                        // from A with B's coordinates would mean a torn
                        // snapshot
                        assert_eq!(response.nearest_lat, Some(0.0));
                        assert_eq!(response.nearest_lon, Some(1.0));
                        assert_eq!(response.fields["value"], json!("a1"));
                    }
                    Some("B") => {
                        saw_b = true;
                        assert_eq!(response.nearest_lat, Some(50.0));
                        assert_eq!(response.nearest_lon, Some(50.0));
                        assert_eq!(response.fields["value"], json!("b0"));
                    }
                    other => panic!("Record from unknown dataset: {:?}", other),
                }
            }

            (saw_a, saw_b)
        }));
    }

    // Writer: flip between the two snapshots as fast as possible
    let writer = {
        let store = Arc::clone(&store);
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let a = dataset_a();
            let b = dataset_b();
            let mut publish_b = true;
            while !stop.load(Ordering::Relaxed) {
                store.publish(if publish_b { Arc::clone(&b) } else { Arc::clone(&a) });
                publish_b = !publish_b;
            }
        })
    };

    thread::sleep(Duration::from_millis(300));
    stop.store(true, Ordering::Relaxed);
    writer.join().expect("writer thread");

    let mut any_a = false;
    let mut any_b = false;
    for reader in readers {
        let (saw_a, saw_b) = reader.join().expect("reader thread");
        any_a |= saw_a;
        any_b |= saw_b;
    }

    // With the writer flipping for 300ms, readers should genuinely have
    // raced both snapshots
    assert!(any_a, "Readers never observed dataset A");
    assert!(any_b, "Readers never observed dataset B");
}

#[test]
fn test_pinned_snapshot_is_immune_to_publishes() {
    let store = Arc::new(DatasetStore::new());
    store.publish(dataset_a());

    // A long-running "query" pins the snapshot it started with
    let pinned = store.current().expect("initialized");

    for _ in 0..100 {
        store.publish(dataset_b());
        store.publish(dataset_a());
    }

    // The pinned snapshot still answers entirely from A
    let record = pinned
        .get(&geopoint::dataset::CoordKey::new(0.0, 0.0))
        .expect("pinned snapshot must keep its records");
    assert_eq!(record.fields["set"], json!("A"));
    assert_eq!(pinned.len(), 2);
}
