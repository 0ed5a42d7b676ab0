//! Scan status as reported by the status endpoint

use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque scan identifier, taken verbatim from the page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanId(String);

impl ScanId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScanId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ScanId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Reported lifecycle state of a scan.
///
/// Statuses the dashboard does not know are kept verbatim so the row can
/// still display them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScanStatus {
    Queued,
    Running,
    Completed,
    Failed,
    Cancelled,
    Other(String),
}

impl ScanStatus {
    /// Queued and running scans are still in progress
    pub fn is_active(&self) -> bool {
        matches!(self, ScanStatus::Queued | ScanStatus::Running)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ScanStatus::Queued => "queued",
            ScanStatus::Running => "running",
            ScanStatus::Completed => "completed",
            ScanStatus::Failed => "failed",
            ScanStatus::Cancelled => "cancelled",
            ScanStatus::Other(status) => status,
        }
    }
}

impl From<String> for ScanStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "queued" => ScanStatus::Queued,
            "running" => ScanStatus::Running,
            "completed" => ScanStatus::Completed,
            "failed" => ScanStatus::Failed,
            "cancelled" => ScanStatus::Cancelled,
            _ => ScanStatus::Other(status),
        }
    }
}

impl From<&str> for ScanStatus {
    fn from(status: &str) -> Self {
        Self::from(status.to_string())
    }
}

impl From<ScanStatus> for String {
    fn from(status: ScanStatus) -> Self {
        match status {
            ScanStatus::Other(status) => status,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One poll response for one scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStatusSnapshot {
    pub status: ScanStatus,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl ScanStatusSnapshot {
    pub fn new(status: impl Into<ScanStatus>) -> Self {
        Self {
            status: status.into(),
            start_time: None,
            end_time: None,
        }
    }

    /// Decode a status endpoint body
    pub fn from_json(body: &str) -> CoreResult<Self> {
        serde_json::from_str(body).map_err(|e| CoreError::MalformedResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_statuses() {
        assert!(ScanStatus::Queued.is_active());
        assert!(ScanStatus::Running.is_active());
        assert!(!ScanStatus::Completed.is_active());
        assert!(!ScanStatus::Failed.is_active());
        assert!(!ScanStatus::Cancelled.is_active());
        assert!(!ScanStatus::from("paused").is_active());
    }

    #[test]
    fn test_decode_endpoint_body() {
        let body = r#"{"id": 7, "status": "running", "start_time": "2024-03-01T10:15:00", "end_time": null}"#;
        let snapshot = ScanStatusSnapshot::from_json(body).unwrap();
        assert_eq!(snapshot.status, ScanStatus::Running);
        assert_eq!(snapshot.start_time.as_deref(), Some("2024-03-01T10:15:00"));
        assert_eq!(snapshot.end_time, None);
    }

    #[test]
    fn test_unknown_status_kept_verbatim() {
        let snapshot = ScanStatusSnapshot::from_json(r#"{"status": "archived"}"#).unwrap();
        assert_eq!(snapshot.status, ScanStatus::Other("archived".to_string()));
        assert_eq!(snapshot.status.as_str(), "archived");
    }

    #[test]
    fn test_malformed_bodies() {
        for body in ["", "not json", r#"{"state": "running"}"#, r#"{"status": 3}"#] {
            assert!(matches!(
                ScanStatusSnapshot::from_json(body),
                Err(CoreError::MalformedResponse(_))
            ));
        }
    }
}
