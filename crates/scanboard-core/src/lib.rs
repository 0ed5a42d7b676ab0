//! Scanboard Core
//!
//! Browser-independent logic behind the scan dashboard: validation of scan
//! targets typed into the new-scan form, the status model reported by the
//! server, and the polling state machine that keeps active scan rows fresh
//! until they settle.

pub mod display;
pub mod poller;
pub mod status;
pub mod target;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub use poller::{
    ActiveScanPoller, HttpStatusSource, PageControl, ScanReference, Scheduler, StatusSource,
    StatusView, TrackState,
};
pub use status::{ScanId, ScanStatus, ScanStatusSnapshot};
pub use target::{validate_target, TargetKind, TargetValidator, ValidationResult};

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Status request for scan {scan_id} returned HTTP {code}")]
    UnexpectedStatus { scan_id: ScanId, code: u16 },

    #[error("Malformed status response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Timing and endpoint settings for the active-scan poller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Period between polling rounds (milliseconds)
    pub poll_interval_ms: u64,
    /// Delay between a scan settling and the page reload (milliseconds)
    pub reload_delay_ms: u64,
    /// Path of the status endpoint; the scan id is appended as a segment
    pub status_path: String,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 5000,
            reload_delay_ms: 2000,
            status_path: "/scan_status".to_string(),
        }
    }
}

impl PollerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn reload_delay(&self) -> Duration {
        Duration::from_millis(self.reload_delay_ms)
    }

    /// Reject settings that would spin the timer or build unusable URLs
    pub fn validate(&self) -> CoreResult<()> {
        if self.poll_interval_ms == 0 {
            return Err(CoreError::Config(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }

        if self.status_path.trim_matches('/').is_empty() {
            return Err(CoreError::Config("status_path must not be empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timings() {
        let config = PollerConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_millis(5000));
        assert_eq!(config.reload_delay(), Duration::from_millis(2000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_interval() {
        let config = PollerConfig {
            poll_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_rejects_empty_status_path() {
        let config = PollerConfig {
            status_path: "/".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: PollerConfig = serde_json::from_str(r#"{"poll_interval_ms": 1000}"#).unwrap();
        assert_eq!(config.poll_interval_ms, 1000);
        assert_eq!(config.reload_delay_ms, 2000);
        assert_eq!(config.status_path, "/scan_status");
    }
}
