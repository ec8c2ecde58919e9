#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Test doubles for the alertdesk crates.
//!
//! [`MockAlertProvider`] stands in for the alert backend: it answers every
//! endpoint from canned data, records each call, and can be told to fail
//! individual endpoints or to hold submissions until released.

mod mock;

pub use mock::{Endpoint, MockAlertProvider, MockCall, create_mock_service};
