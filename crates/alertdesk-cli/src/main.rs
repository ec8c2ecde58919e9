#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod session;
mod telemetry;

use std::process;
use std::sync::Arc;

use alertdesk_chat::{ChatClient, Outcome};
use anyhow::Context;

use crate::config::{Cli, Command};
use crate::session::TerminalTarget;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "alertdesk_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "alertdesk_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "alertdesk_cli::config";
pub const TRACING_TARGET_SESSION: &str = "alertdesk_cli::session";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::debug!(
            target: TRACING_TARGET_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing()?;
    cli.log();
    cli.validate().context("invalid configuration")?;

    let service = cli
        .create_service()
        .context("failed to create alert service")?;
    let client =
        ChatClient::new(service, TerminalTarget::stdout()).with_source(cli.source.clone());

    match cli.command.unwrap_or_default() {
        Command::Chat => session::run(Arc::new(client)).await,
        command => {
            let name = command.name();
            match session::execute(&client, command).await {
                Outcome::Completed => Ok(()),
                Outcome::Failed => Err(anyhow::anyhow!("{name} failed")),
            }
        }
    }
}
