//! Subcommands shared by the command line and the interactive session.

use alertdesk_chat::HistoryControls;
use alertdesk_core::{AlertId, Severity};
use clap::{Args, Subcommand};
use jiff::civil::Date;

/// Operations the client can run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Start an interactive chat session.
    #[default]
    Chat,

    /// Submit alert text for classification.
    Submit {
        /// Alert text; multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Show stored alerts, optionally filtered.
    History(HistoryArgs),

    /// Create a JIRA ticket for an alert.
    Ticket {
        /// Alert identifier.
        id: AlertId,
    },

    /// Send a Slack notification for an alert.
    Slack {
        /// Alert identifier.
        id: AlertId,
    },

    /// Show a single stored alert.
    Show {
        /// Alert identifier.
        id: AlertId,
    },
}

impl Command {
    /// Returns the subcommand name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Submit { .. } => "submit",
            Self::History(_) => "history",
            Self::Ticket { .. } => "ticket",
            Self::Slack { .. } => "slack",
            Self::Show { .. } => "show",
        }
    }
}

/// History filter flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct HistoryArgs {
    /// Only alerts with this severity (low, medium, high, critical).
    #[arg(long)]
    pub severity: Option<Severity>,

    /// Only alerts from this source.
    #[arg(long)]
    pub source: Option<String>,

    /// Only alerts created from the start of this day on (YYYY-MM-DD, local time).
    #[arg(long)]
    pub start_date: Option<Date>,

    /// Only alerts created up to the start of this day (YYYY-MM-DD, local time).
    #[arg(long)]
    pub end_date: Option<Date>,
}

impl From<HistoryArgs> for HistoryControls {
    fn from(args: HistoryArgs) -> Self {
        Self {
            severity: args.severity,
            source: args.source,
            start_date: args.start_date,
            end_date: args.end_date,
        }
    }
}
