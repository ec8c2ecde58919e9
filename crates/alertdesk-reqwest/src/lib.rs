//! Reqwest-based HTTP client for the alertdesk backend.
//!
//! This crate provides the reqwest implementation of
//! [`AlertProvider`](alertdesk_core::AlertProvider), the [`ReqwestClient`].
//!
//! # Example
//!
//! ```rust,ignore
//! use alertdesk_core::{AlertFilter, AlertService, Severity};
//! use alertdesk_reqwest::{ReqwestClient, ReqwestConfig};
//!
//! // Create a client with default configuration (http://127.0.0.1:8000/)
//! let client = ReqwestClient::new(ReqwestConfig::default())?;
//!
//! // Convert to a service for dependency injection
//! let service: AlertService = client.into_service();
//!
//! let filter = AlertFilter::new().with_severity(Severity::High);
//! let alerts = service.list_alerts(&filter).await?;
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod connect;
mod error;
mod service;

pub use crate::connect::{DEFAULT_BASE_URL, ReqwestClient, ReqwestConfig, TRACING_TARGET};
pub use crate::error::{Error, Result};
