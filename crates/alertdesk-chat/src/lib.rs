#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Alertdesk Chat
//!
//! The chat controller of the alertdesk client. [`ChatClient`] turns user
//! intents (submit an alert, load history, create a ticket, notify Slack)
//! into backend calls through an [`AlertService`](alertdesk_core::AlertService)
//! and renders the results as [`Bubble`]s on a [`RenderTarget`].
//!
//! The render target is an abstraction over whatever displays the
//! conversation; [`MemoryTarget`] keeps it in memory, front-ends provide
//! their own.
//!
//! # Example
//!
//! ```rust,ignore
//! use alertdesk_chat::{ChatClient, HistoryControls, MemoryTarget};
//! use alertdesk_core::Severity;
//!
//! let client = ChatClient::new(service, MemoryTarget::new());
//! client.submit_alert("Outbound traffic spike to unknown ASN").await;
//!
//! let controls = HistoryControls::new().with_severity(Severity::Critical);
//! client.load_history(&controls).await;
//! ```

mod bubble;
mod client;
mod history;
mod render;

pub use bubble::{Author, Bubble, BubbleAction, format_timestamp};
pub use client::{ChatClient, Outcome, SubmitOutcome, messages};
pub use history::HistoryControls;
pub use render::{Entry, IndicatorId, MemoryTarget, RenderTarget};

/// Tracing target for chat controller operations.
pub const TRACING_TARGET: &str = "alertdesk_chat::client";
