//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── backend: ReqwestConfig   # API URL, request timeout, user agent
//! ├── source: String           # Source label for submitted alerts
//! └── command: Option<Command> # Subcommand, defaults to `chat`
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! alertdesk --api-url http://alerts.internal:8000/ history --severity high
//!
//! # Or via environment variables
//! ALERTDESK_API_URL=http://alerts.internal:8000/ alertdesk
//! ```

mod command;

use std::process;

use alertdesk_core::{AlertService, DEFAULT_SOURCE};
use alertdesk_reqwest::{ReqwestClient, ReqwestConfig};
use anyhow::{Context, anyhow};
use clap::Parser;
pub use command::{Command, HistoryArgs};

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Longest accepted request timeout, in seconds.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "alertdesk")]
#[command(about = "Chat with the security alert triage backend")]
#[command(version)]
pub struct Cli {
    /// Alert backend connection.
    #[clap(flatten)]
    pub backend: ReqwestConfig,

    /// Source label attached to submitted alerts.
    #[arg(long, env = "ALERTDESK_SOURCE", default_value = DEFAULT_SOURCE)]
    pub source: String,

    /// Command to run; starts an interactive session when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded before clap parses arguments, so its values
    /// act as defaults for the `env` fallbacks.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Validates all configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL is not an HTTP(S) URL, the request
    /// timeout exceeds five minutes, or the source label is blank.
    pub fn validate(&self) -> anyhow::Result<()> {
        let scheme = self.backend.base_url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(anyhow!(
                "API URL {} must use http or https, not {scheme}",
                self.backend.base_url
            ));
        }

        if self.backend.http_timeout > MAX_REQUEST_TIMEOUT_SECS {
            return Err(anyhow!(
                "Request timeout {} seconds is invalid. Must be at most {MAX_REQUEST_TIMEOUT_SECS} seconds.",
                self.backend.http_timeout
            ));
        }

        if self.source.trim().is_empty() {
            return Err(anyhow!("Alert source label must not be empty"));
        }

        Ok(())
    }

    /// Creates the alert service for the configured backend.
    pub fn create_service(&self) -> anyhow::Result<AlertService> {
        let client =
            ReqwestClient::new(self.backend.clone()).context("failed to create HTTP client")?;
        Ok(client.into_service())
    }

    /// Logs configuration at debug level.
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            api_url = %self.backend.effective_base_url(),
            request_timeout_secs = self.backend.effective_timeout().as_secs(),
            user_agent = %self.backend.effective_user_agent(),
            source = %self.source,
            command = self.command.as_ref().map_or("chat", Command::name),
            "Backend configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use alertdesk_core::{AlertId, Severity};
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("alertdesk").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_start_a_chat_session() {
        let cli = parse(&[]);

        assert_eq!(cli.command, None);
        assert_eq!(cli.backend.base_url.as_str(), "http://127.0.0.1:8000/");
        assert_eq!(cli.source, "web_interface");
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn global_flags_configure_the_backend() {
        let cli = parse(&[
            "--api-url",
            "https://alerts.example.com/api/",
            "--request-timeout",
            "5",
            "--http-user-agent",
            "soc-console/2",
            "--source",
            "terminal",
            "ticket",
            "42",
        ]);

        assert_eq!(cli.backend.base_url.as_str(), "https://alerts.example.com/api/");
        assert_eq!(cli.backend.http_timeout, 5);
        assert_eq!(cli.backend.effective_user_agent(), "soc-console/2");
        assert_eq!(cli.source, "terminal");
        assert_eq!(cli.command, Some(Command::Ticket { id: AlertId::new(42) }));
    }

    #[test]
    fn history_flags_are_typed() {
        let cli = parse(&["history", "--severity", "critical", "--start-date", "2024-03-01"]);

        let Some(Command::History(args)) = cli.command else {
            panic!("expected history command");
        };
        assert_eq!(args.severity, Some(Severity::Critical));
        assert_eq!(args.start_date, Some(jiff::civil::date(2024, 3, 1)));
        assert_eq!(args.end_date, None);
    }

    #[test]
    fn rejects_invalid_configuration() {
        assert!(Cli::try_parse_from(["alertdesk", "--api-url", "not a url"]).is_err());
        assert!(parse(&["--api-url", "ftp://alerts.example.com/"]).validate().is_err());
        assert!(parse(&["--request-timeout", "301"]).validate().is_err());
        assert!(parse(&["--source", "  "]).validate().is_err());
    }
}
