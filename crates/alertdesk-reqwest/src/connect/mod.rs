//! Reqwest client module.
//!
//! This module provides the main client interface for HTTP operations.
//! It wraps the `reqwest` crate for talking to the alert backend.

mod client;
mod config;

pub use client::{ReqwestClient, TRACING_TARGET};
pub use config::{DEFAULT_BASE_URL, ReqwestConfig};
