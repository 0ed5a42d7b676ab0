//! Presentation helpers shared with the page: confirmation prompts, the
//! details toggle, and timestamp formatting.

use chrono::{DateTime, NaiveDateTime};

pub const CONFIRM_DELETE_REPORT: &str = "Are you sure you want to delete this report?";
pub const CONFIRM_CANCEL_SCAN: &str = "Are you sure you want to cancel this scan?";

pub const NOT_AVAILABLE: &str = "N/A";
pub const INVALID_DATE: &str = "Invalid Date";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Visibility of a collapsible details panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailsVisibility {
    Hidden,
    Shown,
}

impl DetailsVisibility {
    pub fn toggled(self) -> Self {
        match self {
            DetailsVisibility::Hidden => DetailsVisibility::Shown,
            DetailsVisibility::Shown => DetailsVisibility::Hidden,
        }
    }

    /// Label of the button controlling a panel in this state
    pub fn button_label(self) -> &'static str {
        match self {
            DetailsVisibility::Hidden => "Show Details",
            DetailsVisibility::Shown => "Hide Details",
        }
    }
}

/// Format a timestamp from the server for display.
///
/// Accepts RFC 3339 and the naive ISO-8601 form the status endpoint emits.
pub fn format_timestamp(value: Option<&str>) -> String {
    let value = match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return NOT_AVAILABLE.to_string(),
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return parsed.format(TIMESTAMP_FORMAT).to_string();
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return parsed.format(TIMESTAMP_FORMAT).to_string();
        }
    }

    INVALID_DATE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_toggle() {
        let state = DetailsVisibility::Hidden;
        assert_eq!(state.button_label(), "Show Details");
        let state = state.toggled();
        assert_eq!(state, DetailsVisibility::Shown);
        assert_eq!(state.button_label(), "Hide Details");
        assert_eq!(state.toggled(), DetailsVisibility::Hidden);
    }

    #[test]
    fn test_missing_timestamp() {
        assert_eq!(format_timestamp(None), "N/A");
        assert_eq!(format_timestamp(Some("")), "N/A");
        assert_eq!(format_timestamp(Some("  ")), "N/A");
    }

    #[test]
    fn test_naive_iso_timestamp() {
        assert_eq!(
            format_timestamp(Some("2024-03-01T10:15:42.123456")),
            "2024-03-01 10:15:42"
        );
        assert_eq!(format_timestamp(Some("2024-03-01T10:15:42")), "2024-03-01 10:15:42");
    }

    #[test]
    fn test_rfc3339_timestamp() {
        assert_eq!(
            format_timestamp(Some("2024-03-01T10:15:42+02:00")),
            "2024-03-01 10:15:42"
        );
    }

    #[test]
    fn test_unparseable_timestamp() {
        assert_eq!(format_timestamp(Some("yesterday")), "Invalid Date");
    }
}
