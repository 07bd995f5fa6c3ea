//! Local file row source.

use std::path::{Path, PathBuf};

use crate::dataset::Row;

use super::error::SourceError;
use super::RowSource;

/// Row source reading a JSON array of row objects from a local file.
///
/// The offline analog of [`HttpRowSource`](super::HttpRowSource): same
/// payload shape, full re-read on every fetch. Used by the CLI and by
/// tests.
pub struct FileRowSource {
    path: PathBuf,
}

impl FileRowSource {
    /// Create a source reading rows from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RowSource for FileRowSource {
    async fn fetch_rows(&self) -> Result<Vec<Row>, SourceError> {
        let bytes = tokio::fs::read(&self.path).await?;
        serde_json::from_slice::<Vec<Row>>(&bytes).map_err(|e| SourceError::Parse(e.to_string()))
    }
}
