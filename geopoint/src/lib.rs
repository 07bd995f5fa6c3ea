//! geopoint - in-memory geospatial point lookup with hot reload
//!
//! This library answers point-lookup and nearest-neighbor queries
//! against a small, periodically-refreshed coordinate-keyed dataset.
//! Clients supply a latitude/longitude pair; the service returns the
//! record at that exact coordinate, or the record for the closest known
//! coordinate otherwise.
//!
//! # High-Level API
//!
//! ```ignore
//! use std::sync::Arc;
//! use geopoint::query::QueryService;
//! use geopoint::reload::ReloadController;
//! use geopoint::source::HttpRowSource;
//! use geopoint::store::DatasetStore;
//!
//! let store = Arc::new(DatasetStore::new());
//! let source = HttpRowSource::new("https://example.test/rows.json")?;
//! let controller = ReloadController::new(source, Arc::clone(&store));
//!
//! controller.reload().await?;
//!
//! let service = QueryService::new(store);
//! let response = service.handle(Some("53.63"), Some("9.98"))?;
//! ```
//!
//! The dataset lives only in memory: a reload builds a whole new
//! snapshot off to the side and swaps it in atomically, so concurrent
//! queries always observe one complete snapshot and are never blocked.

pub mod dataset;
pub mod locator;
pub mod logging;
pub mod query;
pub mod reload;
pub mod source;
pub mod store;

/// Version of the geopoint library and CLI.
///
/// Synchronized across all components in the workspace; defined in
/// `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
