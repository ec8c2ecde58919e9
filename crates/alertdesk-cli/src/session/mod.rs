//! Interactive chat session and one-shot command execution.

mod input;
mod shutdown;
mod terminal;

use std::sync::Arc;

use alertdesk_chat::{ChatClient, HistoryControls, Outcome, RenderTarget, SubmitOutcome};
use anyhow::Context;
use input::{Input, parse_line};
use shutdown::shutdown_signal;
pub use terminal::TerminalTarget;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

use crate::TRACING_TARGET_SESSION;
use crate::config::Command;

const BANNER: &str = "Describe a security alert to classify it. Type /help for commands.";

const HELP: &str = "\
Type alert text to submit it for classification.

Commands:
  /history [--severity S] [--source SRC] [--start-date YYYY-MM-DD] [--end-date YYYY-MM-DD]
  /show <id>      show a stored alert
  /ticket <id>    create a JIRA ticket for an alert
  /slack <id>     send a Slack notification for an alert
  /submit <text>  submit text that starts with a slash
  /help           show this help
  /quit           end the session";

/// Runs one command against the chat client.
///
/// Submissions that were empty or dropped because another one was in
/// flight count as completed.
pub async fn execute<T>(client: &ChatClient<T>, command: Command) -> Outcome
where
    T: RenderTarget,
{
    match command {
        Command::Chat => Outcome::Completed,
        Command::Submit { text } => match client.submit_alert(&text.join(" ")).await {
            SubmitOutcome::Failed => Outcome::Failed,
            SubmitOutcome::Empty | SubmitOutcome::Busy | SubmitOutcome::Processed(_) => {
                Outcome::Completed
            }
        },
        Command::History(args) => client.load_history(&HistoryControls::from(args)).await,
        Command::Ticket { id } => client.create_jira_ticket(id).await,
        Command::Slack { id } => client.send_slack_notification(id).await,
        Command::Show { id } => client.show_alert(id).await,
    }
}

/// Reads lines from stdin until EOF, `/quit`, or a shutdown signal.
///
/// Every line is handled on its own task so a slow backend call does not
/// block further input. Operations still pending when the session ends are
/// cancelled.
pub async fn run(client: Arc<ChatClient<TerminalTarget>>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tasks = JoinSet::new();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    client.target().notice(BANNER);

    loop {
        while let Some(joined) = tasks.try_join_next() {
            if let Err(error) = joined {
                tracing::error!(
                    target: TRACING_TARGET_SESSION,
                    error = %error,
                    "Chat operation aborted"
                );
            }
        }

        let line = tokio::select! {
            () = &mut shutdown => break,
            line = lines.next_line() => line.context("failed to read from stdin")?,
        };
        let Some(line) = line else {
            break;
        };

        match parse_line(&line) {
            Ok(Input::Empty) => {}
            Ok(Input::Help) => client.target().notice(HELP),
            Ok(Input::Quit) => break,
            Ok(Input::Alert(text)) => {
                let client = client.clone();
                tasks.spawn(async move {
                    client.submit_alert(&text).await;
                });
            }
            Ok(Input::Command(Command::Chat)) => {
                client.target().notice("Already in a chat session.");
            }
            Ok(Input::Command(command)) => {
                tracing::debug!(
                    target: TRACING_TARGET_SESSION,
                    command = command.name(),
                    "Running session command"
                );
                let client = client.clone();
                tasks.spawn(async move {
                    execute(&client, command).await;
                });
            }
            Err(error) => client.target().notice(error.to_string().trim_end()),
        }
    }

    tracing::debug!(
        target: TRACING_TARGET_SESSION,
        pending = tasks.len(),
        "Ending chat session"
    );
    tasks.shutdown().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use alertdesk_chat::{MemoryTarget, messages};
    use alertdesk_core::{AlertId, Severity};
    use alertdesk_test::{Endpoint, MockAlertProvider, create_mock_service};

    use super::*;
    use crate::config::HistoryArgs;

    fn client(mock: &MockAlertProvider) -> ChatClient<MemoryTarget> {
        ChatClient::new(create_mock_service(mock), MemoryTarget::new())
    }

    #[tokio::test]
    async fn submit_joins_words() {
        let mock = MockAlertProvider::new();
        let client = client(&mock);

        let command = Command::Submit {
            text: vec!["Port".to_owned(), "scan".to_owned()],
        };
        assert_eq!(execute(&client, command).await, Outcome::Completed);
        assert_eq!(client.target().contents()[0], "Port scan");
    }

    #[tokio::test]
    async fn failures_are_reported() {
        let mock = MockAlertProvider::new();
        mock.fail(Endpoint::ProcessAlert);
        mock.fail(Endpoint::FetchAlert);
        let client = client(&mock);

        let submit = Command::Submit {
            text: vec!["Beaconing".to_owned()],
        };
        assert_eq!(execute(&client, submit).await, Outcome::Failed);

        let show = Command::Show { id: AlertId::new(1) };
        assert_eq!(execute(&client, show).await, Outcome::Failed);
        assert_eq!(
            client.target().contents(),
            vec![
                "Beaconing",
                messages::PROCESS_ALERT_FAILED,
                messages::LOAD_ALERT_FAILED,
            ]
        );
    }

    #[tokio::test]
    async fn history_and_actions_reach_the_backend() {
        let mock = MockAlertProvider::new().with_history(vec![
            MockAlertProvider::alert(1, Severity::Low, "Failed login"),
            MockAlertProvider::alert(2, Severity::High, "Privilege escalation"),
        ]);
        let client = client(&mock);

        let history = Command::History(HistoryArgs {
            severity: Some(Severity::High),
            ..HistoryArgs::default()
        });
        assert_eq!(execute(&client, history).await, Outcome::Completed);
        assert_eq!(client.target().contents(), vec!["Privilege escalation"]);

        let ticket = Command::Ticket { id: AlertId::new(2) };
        assert_eq!(execute(&client, ticket).await, Outcome::Completed);
        let slack = Command::Slack { id: AlertId::new(2) };
        assert_eq!(execute(&client, slack).await, Outcome::Completed);

        assert_eq!(mock.count(Endpoint::CreateTicket), 1);
        assert_eq!(mock.count(Endpoint::SlackAlert), 1);
    }
}
