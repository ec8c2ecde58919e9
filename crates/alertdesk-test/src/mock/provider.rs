//! Mock alert backend.

use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use alertdesk_core::{
    ActionReply, Alert, AlertFilter, AlertId, AlertProvider, AutomatedResponse, Error, NewAlert,
    Result, Severity,
};
use strum::{AsRefStr, Display};
use tokio::sync::Notify;

/// Backend endpoints, used to select failures and count calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Endpoint {
    ProcessAlert,
    AutomatedResponse,
    ListAlerts,
    FetchAlert,
    CreateTicket,
    SlackAlert,
}

/// One recorded call to the mock backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    ProcessAlert(NewAlert),
    AutomatedResponse(AlertId),
    ListAlerts(AlertFilter),
    FetchAlert(AlertId),
    CreateTicket(AlertId),
    SlackAlert(AlertId),
}

impl MockCall {
    /// Returns the endpoint this call targeted.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::ProcessAlert(_) => Endpoint::ProcessAlert,
            Self::AutomatedResponse(_) => Endpoint::AutomatedResponse,
            Self::ListAlerts(_) => Endpoint::ListAlerts,
            Self::FetchAlert(_) => Endpoint::FetchAlert,
            Self::CreateTicket(_) => Endpoint::CreateTicket,
            Self::SlackAlert(_) => Endpoint::SlackAlert,
        }
    }
}

#[derive(Debug)]
struct MockState {
    severity: Severity,
    jira_ticket_id: Option<String>,
    history: Vec<Alert>,
    failures: HashSet<Endpoint>,
    calls: Vec<MockCall>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            severity: Severity::Low,
            jira_ticket_id: None,
            history: Vec::new(),
            failures: HashSet::new(),
            calls: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
struct MockInner {
    next_id: AtomicI64,
    state: Mutex<MockState>,
    gate: Mutex<Option<Arc<Notify>>>,
}

/// Mock alert backend.
///
/// Clones share state, so a test can keep one handle while another is
/// owned by the service under test. Submissions are assigned increasing
/// ids starting at 1 and classified with the configured severity.
#[derive(Debug, Clone, Default)]
pub struct MockAlertProvider {
    inner: Arc<MockInner>,
}

impl MockAlertProvider {
    /// Creates a mock that classifies everything as `Low`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the severity assigned to submitted alerts.
    pub fn with_severity(self, severity: Severity) -> Self {
        self.state().severity = severity;
        self
    }

    /// Sets the JIRA ticket attached to submitted alerts.
    pub fn with_ticket(self, ticket: impl Into<String>) -> Self {
        self.state().jira_ticket_id = Some(ticket.into());
        self
    }

    /// Sets the alerts returned by history listings.
    pub fn with_history(self, history: Vec<Alert>) -> Self {
        self.state().history = history;
        self
    }

    /// Makes every call to `endpoint` fail with a 500 error.
    pub fn fail(&self, endpoint: Endpoint) {
        self.state().failures.insert(endpoint);
    }

    /// Lets calls to `endpoint` succeed again.
    pub fn recover(&self, endpoint: Endpoint) {
        self.state().failures.remove(&endpoint);
    }

    /// Makes subsequent submissions wait until the returned handle is notified.
    ///
    /// The call is recorded before waiting. Each `notify_one` releases one
    /// pending submission.
    pub fn hold_submissions(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.lock_gate() = Some(notify.clone());
        notify
    }

    /// Returns every recorded call in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state().calls.clone()
    }

    /// Counts recorded calls to one endpoint.
    pub fn count(&self, endpoint: Endpoint) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|call| call.endpoint() == endpoint)
            .count()
    }

    /// Builds a stored alert the way the backend would return it.
    pub fn alert(id: i64, severity: Severity, message: &str) -> Alert {
        Alert {
            id: AlertId::new(id),
            severity,
            message: message.to_owned(),
            source: alertdesk_core::DEFAULT_SOURCE.to_owned(),
            created_at: None,
            jira_ticket_id: None,
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_gate(&self) -> MutexGuard<'_, Option<Arc<Notify>>> {
        self.inner
            .gate
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records the call and reports whether its endpoint is failing.
    fn record(&self, call: MockCall) -> Result<()> {
        let endpoint = call.endpoint();
        let mut state = self.state();
        state.calls.push(call);
        if state.failures.contains(&endpoint) {
            return Err(Error::from_status(500).with_message(format!("{endpoint} failed")));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl AlertProvider for MockAlertProvider {
    async fn process_alert(&self, alert: &NewAlert) -> Result<Alert> {
        let outcome = self.record(MockCall::ProcessAlert(alert.clone()));

        let gate = self.lock_gate().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        outcome?;

        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let state = self.state();
        Ok(Alert {
            id: AlertId::new(id),
            severity: state.severity,
            message: alert.message.clone(),
            source: alert.source.clone(),
            created_at: None,
            jira_ticket_id: state.jira_ticket_id.clone(),
        })
    }

    async fn automated_response(&self, alert_id: AlertId) -> Result<AutomatedResponse> {
        self.record(MockCall::AutomatedResponse(alert_id))?;
        Ok(AutomatedResponse {
            response: format!("Contain the affected host for alert {alert_id}"),
        })
    }

    async fn list_alerts(&self, filter: &AlertFilter) -> Result<Vec<Alert>> {
        self.record(MockCall::ListAlerts(filter.clone()))?;
        let history = self
            .state()
            .history
            .iter()
            .filter(|alert| filter.severity.is_none_or(|severity| alert.severity == severity))
            .cloned()
            .collect();
        Ok(history)
    }

    async fn fetch_alert(&self, alert_id: AlertId) -> Result<Alert> {
        self.record(MockCall::FetchAlert(alert_id))?;
        self.state()
            .history
            .iter()
            .find(|alert| alert.id == alert_id)
            .cloned()
            .ok_or_else(|| Error::from_status(404).with_message("Alert not found"))
    }

    async fn create_ticket(&self, alert_id: AlertId) -> Result<ActionReply> {
        self.record(MockCall::CreateTicket(alert_id))?;
        Ok(ActionReply {
            message: format!("JIRA ticket created: SEC-{alert_id}"),
        })
    }

    async fn send_slack_alert(&self, alert_id: AlertId) -> Result<ActionReply> {
        self.record(MockCall::SlackAlert(alert_id))?;
        Ok(ActionReply {
            message: "Slack notification sent successfully".to_owned(),
        })
    }
}
