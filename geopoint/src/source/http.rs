//! HTTP row source backed by `reqwest`.

use std::time::Duration;

use crate::dataset::Row;

use super::error::SourceError;
use super::RowSource;

/// Default HTTP timeout for a full row fetch.
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Row source fetching a JSON array of row objects over HTTP.
///
/// Expects the endpoint to return the complete row set on every request
/// (export endpoints of tabular stores behave this way); there is no
/// incremental fetch. Uses a reusable `reqwest::Client` with connection
/// pooling and a request timeout.
pub struct HttpRowSource {
    /// Reusable HTTP client with connection pooling.
    http: reqwest::Client,

    /// Endpoint returning the JSON row array.
    url: String,
}

impl HttpRowSource {
    /// Create a source fetching rows from `url` with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>) -> Result<Self, SourceError> {
        Self::with_timeout(url, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a source with an explicit request timeout.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Http(e.to_string()))?;

        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// The endpoint this source fetches from.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RowSource for HttpRowSource {
    async fn fetch_rows(&self) -> Result<Vec<Row>, SourceError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?
            .error_for_status()
            .map_err(|e| SourceError::Http(e.to_string()))?;

        response
            .json::<Vec<Row>>()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))
    }
}
