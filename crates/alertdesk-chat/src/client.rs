//! Chat controller.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use alertdesk_core::{
    Alert, AlertId, AlertService, DEFAULT_SOURCE, Error, NewAlert, Result, Severity,
};
use jiff::Zoned;
use jiff::tz::TimeZone;

use crate::{
    Author, Bubble, BubbleAction, HistoryControls, IndicatorId, RenderTarget, TRACING_TARGET,
};

/// Notices shown when an operation fails.
pub mod messages {
    pub const PROCESS_ALERT_FAILED: &str = "Error processing alert. Please try again.";
    pub const LOAD_HISTORY_FAILED: &str = "Error loading alert history. Please try again.";
    pub const CREATE_TICKET_FAILED: &str = "Error creating JIRA ticket. Please try again.";
    pub const SLACK_FAILED: &str = "Error sending Slack notification. Please try again.";
    pub const LOAD_ALERT_FAILED: &str = "Error loading alert. Please try again.";
}

/// Result of [`ChatClient::submit_alert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The text was empty after trimming; nothing happened.
    Empty,
    /// Another submission was in flight; nothing happened.
    Busy,
    /// The backend stored and classified the alert.
    Processed(Alert),
    /// The submission or its follow-up failed and an error notice was shown.
    Failed,
}

/// Result of the stateless chat operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Failed,
}

/// Holds the in-flight flag for the lifetime of one submission.
struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Drives the alert conversation on a render target.
///
/// Operations take `&self` and may run concurrently; only alert
/// submissions are serialized. A submission started while another one is
/// pending is dropped without rendering anything or calling the backend.
pub struct ChatClient<T> {
    service: AlertService,
    target: T,
    source: String,
    time_zone: TimeZone,
    processing: AtomicBool,
}

impl<T> fmt::Debug for ChatClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClient")
            .field("source", &self.source)
            .field("processing", &self.processing)
            .finish_non_exhaustive()
    }
}

impl<T> ChatClient<T>
where
    T: RenderTarget,
{
    /// Creates a controller rendering in the system time zone.
    pub fn new(service: AlertService, target: T) -> Self {
        Self {
            service,
            target,
            source: DEFAULT_SOURCE.to_owned(),
            time_zone: TimeZone::system(),
            processing: AtomicBool::new(false),
        }
    }

    /// Sets the source label attached to submitted alerts.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Sets the time zone used for bubble timestamps and history dates.
    pub fn with_time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Returns the render target.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Returns the source label attached to submitted alerts.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns whether a submission is in flight.
    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::Acquire)
    }

    /// Submits alert text for classification.
    ///
    /// The user bubble is rendered before the backend is called. High and
    /// Critical alerts are followed by the automated response
    /// recommendation. Any failure, including one of the follow-up request,
    /// renders [`messages::PROCESS_ALERT_FAILED`].
    pub async fn submit_alert(&self, text: &str) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::Empty;
        }

        let Some(_in_flight) = InFlight::acquire(&self.processing) else {
            tracing::debug!(target: TRACING_TARGET, "Submission already in flight, ignoring");
            return SubmitOutcome::Busy;
        };

        self.render(text, true, None, None);
        let indicator = self.target.show_indicator();

        let alert = NewAlert::with_source(text, self.source.as_str());
        let outcome = match self.process(&alert, indicator).await {
            Ok(processed) => SubmitOutcome::Processed(processed),
            Err(error) => {
                self.target.remove_indicator(indicator);
                tracing::error!(target: TRACING_TARGET, error = %error, "Error processing alert");
                self.render(messages::PROCESS_ALERT_FAILED, false, None, None);
                SubmitOutcome::Failed
            }
        };

        self.target.scroll_to_end();
        outcome
    }

    async fn process(&self, alert: &NewAlert, indicator: IndicatorId) -> Result<Alert> {
        let processed = self.service.process_alert(alert).await?;
        self.target.remove_indicator(indicator);

        let mut content = format!("Alert processed with severity: {}", processed.severity);
        if let Some(ticket) = processed.ticket() {
            content.push_str(&format!("\nJIRA ticket created: {ticket}"));
        }
        self.render(content, false, Some(processed.severity), Some(processed.id));

        if processed.severity.is_elevated() {
            let recommendation = self.service.automated_response(processed.id).await?;
            self.render(recommendation.response, false, None, None);
        }

        Ok(processed)
    }

    /// Replaces the conversation with alerts matching the controls.
    ///
    /// On failure the current conversation is kept and
    /// [`messages::LOAD_HISTORY_FAILED`] is appended.
    pub async fn load_history(&self, controls: &HistoryControls) -> Outcome {
        let indicator = self.target.show_indicator();

        let result = match controls.to_filter(&self.time_zone) {
            Ok(filter) => self.service.list_alerts(&filter).await,
            Err(error) => Err(error),
        };

        let outcome = match result {
            Ok(alerts) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    count = alerts.len(),
                    "Rendering alert history"
                );
                self.target.clear();
                for alert in &alerts {
                    self.render_alert(alert);
                }
                Outcome::Completed
            }
            Err(error) => {
                tracing::error!(target: TRACING_TARGET, error = %error, "Error loading history");
                self.render(messages::LOAD_HISTORY_FAILED, false, None, None);
                Outcome::Failed
            }
        };

        self.target.remove_indicator(indicator);
        outcome
    }

    /// Creates a JIRA ticket for an alert and renders the backend's reply.
    pub async fn create_jira_ticket(&self, alert_id: AlertId) -> Outcome {
        let outcome = match self.service.create_ticket(alert_id).await {
            Ok(reply) => {
                self.render(reply.message, false, None, None);
                Outcome::Completed
            }
            Err(error) => self.fail(
                "Error creating JIRA ticket",
                &error,
                messages::CREATE_TICKET_FAILED,
            ),
        };

        self.target.scroll_to_end();
        outcome
    }

    /// Sends a Slack notification for an alert and renders the backend's reply.
    pub async fn send_slack_notification(&self, alert_id: AlertId) -> Outcome {
        let outcome = match self.service.send_slack_alert(alert_id).await {
            Ok(reply) => {
                self.render(reply.message, false, None, None);
                Outcome::Completed
            }
            Err(error) => self.fail(
                "Error sending Slack notification",
                &error,
                messages::SLACK_FAILED,
            ),
        };

        self.target.scroll_to_end();
        outcome
    }

    /// Appends a single stored alert to the conversation.
    pub async fn show_alert(&self, alert_id: AlertId) -> Outcome {
        let outcome = match self.service.fetch_alert(alert_id).await {
            Ok(alert) => {
                self.render_alert(&alert);
                Outcome::Completed
            }
            Err(error) => self.fail("Error loading alert", &error, messages::LOAD_ALERT_FAILED),
        };

        self.target.scroll_to_end();
        outcome
    }

    /// Runs the operation behind a bubble's action control.
    pub async fn dispatch(&self, action: BubbleAction) -> Outcome {
        match action {
            BubbleAction::CreateTicket(alert_id) => self.create_jira_ticket(alert_id).await,
            BubbleAction::SendSlack(alert_id) => self.send_slack_notification(alert_id).await,
        }
    }

    /// Builds a bubble stamped with the current local time and appends it.
    pub fn render(
        &self,
        message: impl Into<String>,
        is_user: bool,
        severity: Option<Severity>,
        alert_id: Option<AlertId>,
    ) -> Bubble {
        let author = if is_user { Author::User } else { Author::System };
        let now = Zoned::now().with_time_zone(self.time_zone.clone());
        let bubble = Bubble::new(author, message, severity, alert_id, &now);
        self.target.append(bubble.clone());
        bubble
    }

    fn render_alert(&self, alert: &Alert) {
        self.render(
            alert.message.as_str(),
            false,
            Some(alert.severity),
            Some(alert.id),
        );
        if let Some(ticket) = alert.ticket() {
            self.render(format!("JIRA ticket: {ticket}"), false, None, None);
        }
    }

    fn fail(&self, context: &str, error: &Error, notice: &str) -> Outcome {
        tracing::error!(target: TRACING_TARGET, error = %error, "{context}");
        self.render(notice, false, None, None);
        Outcome::Failed
    }
}
