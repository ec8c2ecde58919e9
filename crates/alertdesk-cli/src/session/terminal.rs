//! Terminal render target.

use std::collections::HashSet;
use std::io::{self, Stdout, Write};
use std::sync::{Mutex, MutexGuard};

use alertdesk_chat::{Author, Bubble, BubbleAction, IndicatorId, RenderTarget};

use crate::TRACING_TARGET_SESSION;

const INDENT: &str = "    ";

#[derive(Debug)]
struct Screen<W> {
    writer: W,
    indicators: HashSet<IndicatorId>,
    next_indicator: u64,
}

/// Renders the conversation as plain text lines.
///
/// A terminal cannot take lines back, so removing an indicator only
/// forgets it and clearing prints a separator.
#[derive(Debug)]
pub struct TerminalTarget<W = Stdout> {
    screen: Mutex<Screen<W>>,
}

impl TerminalTarget<Stdout> {
    /// Creates a target writing to stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W> TerminalTarget<W>
where
    W: Write + Send,
{
    pub fn new(writer: W) -> Self {
        Self {
            screen: Mutex::new(Screen {
                writer,
                indicators: HashSet::new(),
                next_indicator: 0,
            }),
        }
    }

    /// Prints a line that is not part of the conversation.
    pub fn notice(&self, text: &str) {
        let mut screen = self.lock();
        Self::emit(&mut screen.writer, text);
    }

    fn lock(&self) -> MutexGuard<'_, Screen<W>> {
        self.screen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn emit(writer: &mut W, text: &str) {
        if let Err(error) = writeln!(writer, "{text}") {
            tracing::warn!(
                target: TRACING_TARGET_SESSION,
                error = %error,
                "Failed to write to terminal"
            );
        }
    }
}

impl<W> RenderTarget for TerminalTarget<W>
where
    W: Write + Send,
{
    fn append(&self, bubble: Bubble) {
        let text = format_bubble(&bubble);
        let mut screen = self.lock();
        Self::emit(&mut screen.writer, &text);
    }

    fn clear(&self) {
        let mut screen = self.lock();
        screen.indicators.clear();
        Self::emit(&mut screen.writer, "──────── alert history ────────");
    }

    fn show_indicator(&self) -> IndicatorId {
        let mut screen = self.lock();
        screen.next_indicator += 1;
        let indicator = IndicatorId(screen.next_indicator);
        screen.indicators.insert(indicator);
        Self::emit(&mut screen.writer, "…");
        indicator
    }

    fn remove_indicator(&self, indicator: IndicatorId) {
        self.lock().indicators.remove(&indicator);
    }

    fn scroll_to_end(&self) {
        if let Err(error) = self.lock().writer.flush() {
            tracing::warn!(
                target: TRACING_TARGET_SESSION,
                error = %error,
                "Failed to flush terminal"
            );
        }
    }
}

/// Formats a bubble as terminal lines.
///
/// Elevated alerts are marked with `!!`; continuation lines and action
/// hints are indented under the header.
fn format_bubble(bubble: &Bubble) -> String {
    let speaker = match bubble.author {
        Author::User => "you",
        Author::System => "alertdesk",
    };

    let mut header = format!("[{}] {speaker}", bubble.timestamp);
    if let Some(severity) = bubble.severity {
        let marker = if bubble.is_elevated() { "!!" } else { "" };
        header.push_str(&format!(" {marker}[{}]", severity.to_string().to_uppercase()));
    }
    if let Some(alert_id) = bubble.alert_id {
        header.push_str(&format!(" #{alert_id}"));
    }

    let mut lines = bubble.content.lines();
    let mut text = format!("{header}: {}", lines.next().unwrap_or_default());
    for line in lines {
        text.push('\n');
        text.push_str(INDENT);
        text.push_str(line);
    }

    if !bubble.actions.is_empty() {
        let hints: Vec<String> = bubble
            .actions
            .iter()
            .map(|action| {
                let command = match action {
                    BubbleAction::CreateTicket(_) => "ticket",
                    BubbleAction::SendSlack(_) => "slack",
                };
                format!("{} (/{command} {})", action.label(), action.alert_id())
            })
            .collect();
        text.push('\n');
        text.push_str(INDENT);
        text.push_str(&hints.join(" · "));
    }

    text
}

#[cfg(test)]
mod tests {
    use alertdesk_core::{AlertId, Severity};
    use jiff::Zoned;
    use jiff::civil::date;
    use jiff::tz::TimeZone;

    use super::*;

    fn evening() -> Zoned {
        date(2024, 3, 1)
            .at(21, 7, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap()
    }

    fn output(target: TerminalTarget<Vec<u8>>) -> String {
        let screen = target
            .screen
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        String::from_utf8(screen.writer).unwrap()
    }

    #[test]
    fn user_bubble_is_one_line() {
        let bubble = Bubble::new(Author::User, "Port scan", None, None, &evening());
        assert_eq!(format_bubble(&bubble), "[09:07 PM] you: Port scan");
    }

    #[test]
    fn alert_bubble_shows_badge_and_actions() {
        let bubble = Bubble::new(
            Author::System,
            "Alert processed with severity: Critical\nJIRA ticket created: SEC-3",
            Some(Severity::Critical),
            Some(AlertId::new(3)),
            &evening(),
        );

        assert_eq!(
            format_bubble(&bubble),
            "[09:07 PM] alertdesk !![CRITICAL] #3: Alert processed with severity: Critical\n    \
             JIRA ticket created: SEC-3\n    \
             Create JIRA Ticket (/ticket 3) · Send to Slack (/slack 3)"
        );
    }

    #[test]
    fn low_severity_is_not_marked() {
        let bubble = Bubble::new(
            Author::System,
            "Failed login",
            Some(Severity::Low),
            None,
            &evening(),
        );
        assert_eq!(format_bubble(&bubble), "[09:07 PM] alertdesk [LOW]: Failed login");
    }

    #[test]
    fn target_writes_lines_in_order() {
        let target = TerminalTarget::new(Vec::new());
        let indicator = target.show_indicator();
        target.append(Bubble::new(Author::System, "done", None, None, &evening()));
        target.remove_indicator(indicator);
        target.remove_indicator(indicator);
        target.clear();
        target.notice("bye");
        target.scroll_to_end();

        assert_eq!(
            output(target),
            "…\n[09:07 PM] alertdesk: done\n──────── alert history ────────\nbye\n"
        );
    }
}
