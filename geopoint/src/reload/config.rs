//! Configuration for the periodic refresh daemon.

use std::time::Duration;

/// Default refresh interval.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 300;

/// Default maximum backoff after consecutive failed refreshes.
pub const DEFAULT_MAX_BACKOFF_SECS: u64 = 300;

/// Configuration for the refresh daemon.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// How often to re-fetch and republish the dataset.
    pub interval: Duration,

    /// Cap on the exponential backoff applied after consecutive
    /// failures.
    pub max_backoff: Duration,
}

impl RefreshConfig {
    /// Create a config with the given refresh interval and the default
    /// backoff cap.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            ..Default::default()
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS),
            max_backoff: Duration::from_secs(DEFAULT_MAX_BACKOFF_SECS),
        }
    }
}
