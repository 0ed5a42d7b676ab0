//! Scan target validation
//!
//! Accepts what the scanner can be pointed at: a single IPv4 address, an
//! IPv4 CIDR range, or a hostname.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const EMPTY_TARGET_MESSAGE: &str = "Please enter a target IP or hostname.";
pub const INVALID_TARGET_MESSAGE: &str = "Please enter a valid IP address, CIDR range, or hostname.";

/// Shown when a submission is blocked by a failed validation
pub const SUBMIT_BLOCKED_MESSAGE: &str = "Please enter a valid IP address or range.";

static DEFAULT_VALIDATOR: Lazy<TargetValidator> = Lazy::new(TargetValidator::new);

/// Validate with the shared default validator
pub fn validate_target(raw: &str) -> ValidationResult {
    DEFAULT_VALIDATOR.validate(raw)
}

/// Which grammar accepted a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    Ipv4Address,
    Ipv4Cidr,
    Hostname,
}

/// Outcome of validating one candidate target.
///
/// The message is empty exactly when the result is valid; the constructors
/// are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    is_valid: bool,
    message: String,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: String::new(),
        }
    }

    /// An empty message is replaced with the generic invalid-target text
    pub fn invalid(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.is_empty() {
            INVALID_TARGET_MESSAGE.to_string()
        } else {
            message
        };

        Self {
            is_valid: false,
            message,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub struct TargetValidator {
    ipv4_regex: Regex,
    hostname_regex: Regex,
}

impl TargetValidator {
    pub fn new() -> Self {
        Self {
            ipv4_regex: Regex::new(
                r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)(?:/(?:3[0-2]|[1-2][0-9]|[0-9]))?$",
            )
            .unwrap(),
            hostname_regex: Regex::new(
                r"^(?:(?:[a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9\-]*[a-zA-Z0-9])\.)*(?:[A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9\-]*[A-Za-z0-9])$",
            )
            .unwrap(),
        }
    }

    /// Validate an untrimmed value from the target field
    pub fn validate(&self, raw: &str) -> ValidationResult {
        let value = raw.trim();

        if value.is_empty() {
            return ValidationResult::invalid(EMPTY_TARGET_MESSAGE);
        }

        match self.classify(value) {
            Some(_) => ValidationResult::valid(),
            None => ValidationResult::invalid(INVALID_TARGET_MESSAGE),
        }
    }

    /// Name the grammar that accepts `raw`, if any
    pub fn classify(&self, raw: &str) -> Option<TargetKind> {
        let value = raw.trim();

        if self.ipv4_regex.is_match(value) {
            return Some(if value.contains('/') {
                TargetKind::Ipv4Cidr
            } else {
                TargetKind::Ipv4Address
            });
        }

        // A dotted quad of numbers is an address attempt, never a hostname
        if is_dotted_quad(value) {
            return None;
        }

        if self.hostname_regex.is_match(value) {
            return Some(TargetKind::Hostname);
        }

        None
    }
}

impl Default for TargetValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn is_dotted_quad(value: &str) -> bool {
    let labels: Vec<&str> = value.split('.').collect();
    labels.len() == 4
        && labels
            .iter()
            .all(|label| !label.is_empty() && label.bytes().all(|b| b.is_ascii_digit()))
}
