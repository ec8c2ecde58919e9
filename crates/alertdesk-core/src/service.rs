//! Alert service wrapper with observability.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use crate::{
    ActionReply, Alert, AlertFilter, AlertId, AlertProvider, AutomatedResponse, NewAlert, Result,
    TRACING_TARGET,
};

/// Alert service wrapper with observability.
///
/// This wrapper adds structured logging to any [`AlertProvider`]
/// implementation. The inner provider is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct AlertService {
    inner: Arc<dyn AlertProvider>,
}

impl fmt::Debug for AlertService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertService").finish_non_exhaustive()
    }
}

impl AlertService {
    /// Create a new alert service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: AlertProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Create a service from an already shared provider.
    pub fn from_shared(provider: Arc<dyn AlertProvider>) -> Self {
        Self { inner: provider }
    }

    /// Submits a new alert for classification.
    pub async fn process_alert(&self, alert: &NewAlert) -> Result<Alert> {
        tracing::debug!(
            target: TRACING_TARGET,
            source = %alert.source,
            message_len = alert.message.len(),
            "Submitting alert"
        );

        let result = self
            .observe("process_alert", self.inner.process_alert(alert))
            .await;

        if let Ok(processed) = &result {
            tracing::info!(
                target: TRACING_TARGET,
                alert_id = %processed.id,
                severity = %processed.severity,
                jira_ticket_id = ?processed.jira_ticket_id,
                "Alert processed"
            );
        }

        result
    }

    /// Fetches the automated response recommendation for an alert.
    pub async fn automated_response(&self, alert_id: AlertId) -> Result<AutomatedResponse> {
        tracing::debug!(target: TRACING_TARGET, %alert_id, "Requesting automated response");
        self.observe(
            "automated_response",
            self.inner.automated_response(alert_id),
        )
        .await
    }

    /// Lists stored alerts matching the filter.
    pub async fn list_alerts(&self, filter: &AlertFilter) -> Result<Vec<Alert>> {
        tracing::debug!(
            target: TRACING_TARGET,
            query = %filter.query_string(),
            "Listing alerts"
        );

        let result = self
            .observe("list_alerts", self.inner.list_alerts(filter))
            .await;

        if let Ok(alerts) = &result {
            tracing::debug!(target: TRACING_TARGET, count = alerts.len(), "Alerts listed");
        }

        result
    }

    /// Fetches a single alert.
    pub async fn fetch_alert(&self, alert_id: AlertId) -> Result<Alert> {
        tracing::debug!(target: TRACING_TARGET, %alert_id, "Fetching alert");
        self.observe("fetch_alert", self.inner.fetch_alert(alert_id))
            .await
    }

    /// Creates a JIRA ticket for the alert.
    pub async fn create_ticket(&self, alert_id: AlertId) -> Result<ActionReply> {
        tracing::debug!(target: TRACING_TARGET, %alert_id, "Creating JIRA ticket");
        self.observe("create_ticket", self.inner.create_ticket(alert_id))
            .await
    }

    /// Sends a Slack notification for the alert.
    pub async fn send_slack_alert(&self, alert_id: AlertId) -> Result<ActionReply> {
        tracing::debug!(target: TRACING_TARGET, %alert_id, "Sending Slack notification");
        self.observe("send_slack_alert", self.inner.send_slack_alert(alert_id))
            .await
    }

    /// Times a provider call and logs its outcome.
    async fn observe<T, F>(&self, operation: &'static str, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let started_at = Instant::now();
        let result = call.await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(_) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    operation,
                    elapsed_ms = elapsed.as_millis(),
                    "Backend call completed"
                );
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    operation,
                    error = %error,
                    kind = %error.kind,
                    elapsed_ms = elapsed.as_millis(),
                    "Backend call failed"
                );
            }
        }

        result
    }
}
