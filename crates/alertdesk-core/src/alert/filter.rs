//! Alert history filtering.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use super::Severity;

/// Optional filters for the alert history listing.
///
/// Unset fields are omitted from the query string entirely, so the default
/// filter produces an empty query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertFilter {
    /// Only alerts with this severity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    /// Only alerts reported by this source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Only alerts created at or after this instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Timestamp>,
    /// Only alerts created at or before this instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Timestamp>,
}

impl AlertFilter {
    /// Creates a filter that matches every alert.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the listing to one severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Restricts the listing to one source.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the inclusive lower bound on creation time.
    pub fn with_start_date(mut self, start_date: Timestamp) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets the inclusive upper bound on creation time.
    pub fn with_end_date(mut self, end_date: Timestamp) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Returns whether no filter is set.
    pub fn is_empty(&self) -> bool {
        self.severity.is_none()
            && self.source.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    /// Returns the query parameters in a stable order.
    ///
    /// Instants are rendered as ISO-8601 in UTC.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(severity) = self.severity {
            pairs.push(("severity", severity.to_string()));
        }
        if let Some(source) = &self.source {
            pairs.push(("source", source.clone()));
        }
        if let Some(start_date) = self.start_date {
            pairs.push(("start_date", start_date.to_string()));
        }
        if let Some(end_date) = self.end_date {
            pairs.push(("end_date", end_date.to_string()));
        }
        pairs
    }

    /// Encodes the filter as an `application/x-www-form-urlencoded` query.
    pub fn query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in self.query_pairs() {
            serializer.append_pair(name, &value);
        }
        serializer.finish()
    }
}
