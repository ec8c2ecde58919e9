#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Alertdesk Core
//!
//! Domain types and service abstractions shared by the alertdesk crates.
//!
//! The alert backend classifies free-form alert text, stores it, and exposes
//! follow-up actions (automated response recommendation, JIRA ticket, Slack
//! notification). This crate models those payloads and defines the
//! [`AlertProvider`] trait that transport implementations fulfil, without
//! depending on any concrete HTTP client.
//!
//! # Example
//!
//! ```rust,ignore
//! use alertdesk_core::{AlertService, NewAlert};
//!
//! // Create a service from any AlertProvider implementation
//! let service = AlertService::new(my_provider);
//!
//! let alert = service.process_alert(&NewAlert::new("Failed SSH logins from 10.0.0.7")).await?;
//! println!("{} -> {}", alert.id, alert.severity);
//! ```

mod error;
mod service;

pub mod alert;

pub use alert::{
    ActionReply, Alert, AlertFilter, AlertId, AutomatedResponse, DEFAULT_SOURCE, NewAlert,
    Severity,
};
pub use error::{BoxedError, Error, ErrorKind, Result};
pub use service::AlertService;

/// Tracing target for alert service operations.
pub const TRACING_TARGET: &str = "alertdesk_core::service";

/// Core trait for talking to the alert-processing backend.
///
/// Implement this trait to provide a transport (HTTP, in-memory mock, ...).
/// Every method corresponds to exactly one backend endpoint.
#[async_trait::async_trait]
pub trait AlertProvider: Send + Sync {
    /// Submits a new alert for classification (`POST /process_alert/`).
    async fn process_alert(&self, alert: &NewAlert) -> Result<Alert>;

    /// Fetches the automated response recommendation (`GET /automated_response/{id}`).
    async fn automated_response(&self, alert_id: AlertId) -> Result<AutomatedResponse>;

    /// Lists stored alerts matching the filter (`GET /alerts/?...`).
    async fn list_alerts(&self, filter: &AlertFilter) -> Result<Vec<Alert>>;

    /// Fetches a single alert (`GET /alert/{id}`).
    async fn fetch_alert(&self, alert_id: AlertId) -> Result<Alert>;

    /// Creates a JIRA ticket for the alert (`POST /create_ticket/{id}`).
    async fn create_ticket(&self, alert_id: AlertId) -> Result<ActionReply>;

    /// Sends a Slack notification for the alert (`POST /slack_alert/{id}`).
    async fn send_slack_alert(&self, alert_id: AlertId) -> Result<ActionReply>;
}
