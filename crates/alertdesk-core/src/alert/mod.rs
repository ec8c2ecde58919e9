//! Alert payloads exchanged with the backend.

mod filter;
mod severity;

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

pub use filter::AlertFilter;
use serde::{Deserialize, Serialize};
pub use severity::Severity;

/// Source label attached to alerts submitted from the chat client.
pub const DEFAULT_SOURCE: &str = "web_interface";

/// Backend-assigned alert identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(pub i64);

impl AlertId {
    /// Creates a typed alert identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for AlertId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<i64> for AlertId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

/// Request body for submitting a new alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAlert {
    /// Free-form alert text.
    pub message: String,
    /// Origin of the alert.
    pub source: String,
}

impl NewAlert {
    /// Creates an alert submitted from the chat client.
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_source(message, DEFAULT_SOURCE)
    }

    /// Creates an alert with an explicit source label.
    pub fn with_source(message: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: source.into(),
        }
    }
}

/// A stored alert as returned by the backend.
///
/// Returned both when an alert is processed and when history is listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Backend identifier.
    pub id: AlertId,
    /// Severity assigned by the classifier.
    pub severity: Severity,
    /// Original alert text.
    #[serde(default)]
    pub message: String,
    /// Origin of the alert.
    #[serde(default)]
    pub source: String,
    /// Server-side creation time, verbatim.
    ///
    /// Kept for completeness only; bubbles are stamped at render time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Key of the JIRA issue linked to this alert, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jira_ticket_id: Option<String>,
}

impl Alert {
    /// Returns the linked JIRA ticket, ignoring empty keys.
    pub fn ticket(&self) -> Option<&str> {
        self.jira_ticket_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Automated incident response recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatedResponse {
    /// Recommendation text.
    pub response: String,
}

/// Display message returned by the ticket and Slack actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionReply {
    /// Human-readable outcome.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_alert_uses_web_interface_source() {
        let alert = NewAlert::new("Port scan detected");
        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"message": "Port scan detected", "source": "web_interface"})
        );
    }

    #[test]
    fn alert_deserializes_backend_response() {
        let json = r#"{
            "id": 17,
            "source": "web_interface",
            "severity": "High",
            "message": "Repeated admin login failures",
            "created_at": "2024-03-01T10:15:00.123456",
            "jira_ticket_id": "SEC-42"
        }"#;

        let alert: Alert = serde_json::from_str(json).unwrap();
        assert_eq!(alert.id, AlertId::new(17));
        assert_eq!(alert.severity, Severity::High);
        assert_eq!(alert.ticket(), Some("SEC-42"));
    }

    #[test]
    fn alert_tolerates_missing_optional_fields() {
        let alert: Alert =
            serde_json::from_str(r#"{"id": 3, "severity": "Low", "jira_ticket_id": null}"#)
                .unwrap();
        assert_eq!(alert.ticket(), None);
        assert!(alert.message.is_empty());
    }

    #[test]
    fn empty_ticket_is_ignored() {
        let alert: Alert =
            serde_json::from_str(r#"{"id": 3, "severity": "Low", "jira_ticket_id": ""}"#).unwrap();
        assert_eq!(alert.ticket(), None);
    }

    #[test]
    fn alert_id_parses_and_displays() {
        let id: AlertId = " 42 ".parse().unwrap();
        assert_eq!(id, AlertId::new(42));
        assert_eq!(id.to_string(), "42");
        assert!("abc".parse::<AlertId>().is_err());
    }
}
