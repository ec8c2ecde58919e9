//! Internal error types for alertdesk-reqwest.

use thiserror::Error;

/// Result type alias for alertdesk-reqwest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for alertdesk-reqwest operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Endpoint URL could not be built.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl From<Error> for alertdesk_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Reqwest(e) => {
                if let Some(status) = e.status() {
                    alertdesk_core::Error::from_status(status.as_u16()).with_source(e)
                } else if e.is_timeout() {
                    alertdesk_core::Error::timeout()
                        .with_message(e.to_string())
                        .with_source(e)
                } else if e.is_connect() {
                    alertdesk_core::Error::network_error()
                        .with_message("Connection failed")
                        .with_source(e)
                } else if e.is_decode() {
                    alertdesk_core::Error::serialization()
                        .with_message(e.to_string())
                        .with_source(e)
                } else {
                    alertdesk_core::Error::network_error()
                        .with_message(e.to_string())
                        .with_source(e)
                }
            }
            Error::Serde(e) => alertdesk_core::Error::from(e),
            Error::Url(e) => alertdesk_core::Error::from(e),
        }
    }
}
