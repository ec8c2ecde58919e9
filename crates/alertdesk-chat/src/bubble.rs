//! Rendered chat messages.

use alertdesk_core::{AlertId, Severity};
use jiff::Zoned;

/// Who a bubble speaks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Author {
    /// Text the user submitted.
    User,
    /// Backend responses, history entries and error notices.
    System,
}

/// Follow-up action offered on a bubble that refers to a stored alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BubbleAction {
    /// Create a JIRA ticket for the alert.
    CreateTicket(AlertId),
    /// Send a Slack notification for the alert.
    SendSlack(AlertId),
}

impl BubbleAction {
    /// Returns the alert the action applies to.
    pub const fn alert_id(&self) -> AlertId {
        match self {
            Self::CreateTicket(id) | Self::SendSlack(id) => *id,
        }
    }

    /// Returns the control label shown for this action.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CreateTicket(_) => "Create JIRA Ticket",
            Self::SendSlack(_) => "Send to Slack",
        }
    }
}

/// One rendered chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bubble {
    pub author: Author,
    pub content: String,
    /// Severity badge, if any.
    pub severity: Option<Severity>,
    /// Alert the bubble refers to, if any.
    pub alert_id: Option<AlertId>,
    /// Local wall-clock time at which the bubble was rendered.
    pub timestamp: String,
    pub actions: Vec<BubbleAction>,
}

impl Bubble {
    /// Builds a bubble stamped with `now`.
    ///
    /// Action controls are attached only to system bubbles that carry an
    /// alert id.
    pub fn new(
        author: Author,
        content: impl Into<String>,
        severity: Option<Severity>,
        alert_id: Option<AlertId>,
        now: &Zoned,
    ) -> Self {
        let actions = match (author, alert_id) {
            (Author::System, Some(id)) => {
                vec![BubbleAction::CreateTicket(id), BubbleAction::SendSlack(id)]
            }
            _ => Vec::new(),
        };

        Self {
            author,
            content: content.into(),
            severity,
            alert_id,
            timestamp: format_timestamp(now),
            actions,
        }
    }

    /// Returns whether the bubble was authored by the user.
    pub fn is_user(&self) -> bool {
        self.author == Author::User
    }

    /// Returns whether the bubble gets severity-specific highlighting.
    pub fn is_elevated(&self) -> bool {
        self.severity.is_some_and(|severity| severity.is_elevated())
    }
}

/// Formats a time as a 12-hour `hh:mm AM/PM` clock reading.
pub fn format_timestamp(time: &Zoned) -> String {
    time.strftime("%I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use jiff::tz::TimeZone;

    use super::*;

    fn evening() -> Zoned {
        date(2024, 3, 1)
            .at(21, 7, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap()
    }

    #[test]
    fn timestamp_uses_twelve_hour_clock() {
        assert_eq!(format_timestamp(&evening()), "09:07 PM");

        let morning = date(2024, 3, 1)
            .at(0, 30, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap();
        assert_eq!(format_timestamp(&morning), "12:30 AM");
    }

    #[test]
    fn actions_only_on_system_bubbles_with_alert() {
        let id = AlertId::new(4);

        let system = Bubble::new(Author::System, "x", Some(Severity::Low), Some(id), &evening());
        assert_eq!(
            system.actions,
            vec![BubbleAction::CreateTicket(id), BubbleAction::SendSlack(id)]
        );

        let user = Bubble::new(Author::User, "x", None, Some(id), &evening());
        assert!(user.actions.is_empty());

        let notice = Bubble::new(Author::System, "x", None, None, &evening());
        assert!(notice.actions.is_empty());
    }

    #[test]
    fn only_high_and_critical_are_elevated() {
        let bubble = |severity| Bubble::new(Author::System, "x", severity, None, &evening());

        assert!(bubble(Some(Severity::Critical)).is_elevated());
        assert!(bubble(Some(Severity::High)).is_elevated());
        assert!(!bubble(Some(Severity::Medium)).is_elevated());
        assert!(!bubble(None).is_elevated());
    }
}
