//! Reqwest-based HTTP client for the alert backend.

use std::sync::Arc;

use alertdesk_core::{AlertFilter, AlertId, AlertService};
use reqwest::Client;
use url::Url;

use super::ReqwestConfig;
use crate::error::Error;

/// Tracing target for reqwest client operations.
pub const TRACING_TARGET: &str = "alertdesk_reqwest::client";

/// Inner client that holds the HTTP client and configuration.
struct ReqwestClientInner {
    http: Client,
    base_url: Url,
    config: ReqwestConfig,
}

/// Reqwest-based HTTP client for the alert-processing backend.
///
/// This client implements the [`AlertProvider`](alertdesk_core::AlertProvider)
/// trait. Every non-success HTTP status is reported as an error.
///
/// # Examples
///
/// ```rust,ignore
/// use alertdesk_core::{AlertProvider, NewAlert};
/// use alertdesk_reqwest::{ReqwestClient, ReqwestConfig};
///
/// let client = ReqwestClient::new(ReqwestConfig::default())?;
/// let alert = client.process_alert(&NewAlert::new("Malware signature on ws-12")).await?;
/// ```
#[derive(Clone)]
pub struct ReqwestClient {
    inner: Arc<ReqwestClientInner>,
}

impl std::fmt::Debug for ReqwestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestClient {
    /// Creates a new reqwest client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new(config: ReqwestConfig) -> alertdesk_core::Result<Self> {
        let timeout = config.effective_timeout();
        let user_agent = config.effective_user_agent();
        let base_url = config.effective_base_url();

        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %base_url,
            timeout_ms = timeout.as_millis(),
            "Creating reqwest client"
        );

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(&user_agent)
            .build()
            .map_err(|e| {
                alertdesk_core::Error::configuration()
                    .with_message("failed to create HTTP client")
                    .with_source(e)
            })?;

        let inner = ReqwestClientInner {
            http,
            base_url,
            config,
        };
        let client = Self {
            inner: Arc::new(inner),
        };

        tracing::info!(
            target: TRACING_TARGET,
            base_url = %client.base_url(),
            "Reqwest client created successfully"
        );

        Ok(client)
    }

    /// Creates a new reqwest client with default configuration.
    pub fn with_defaults() -> alertdesk_core::Result<Self> {
        Self::new(ReqwestConfig::default())
    }

    /// Gets the underlying HTTP client.
    pub(crate) fn http(&self) -> &Client {
        &self.inner.http
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ReqwestConfig {
        &self.inner.config
    }

    /// Gets the normalized backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolves an endpoint path against the backend base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, Error> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Builds the history listing URL.
    ///
    /// The `?` is always present, so an empty filter yields `/alerts/?`.
    pub(crate) fn alerts_url(&self, filter: &AlertFilter) -> Result<Url, Error> {
        let mut url = self.endpoint("alerts/")?;
        url.set_query(Some(&filter.query_string()));
        Ok(url)
    }

    /// Builds a per-alert endpoint URL such as `create_ticket/{id}`.
    pub(crate) fn alert_url(&self, prefix: &str, alert_id: AlertId) -> Result<Url, Error> {
        self.endpoint(&format!("{prefix}/{alert_id}"))
    }

    /// Converts this client into an [`AlertService`] for use with dependency injection.
    pub fn into_service(self) -> AlertService {
        AlertService::new(self)
    }
}

#[cfg(test)]
mod tests {
    use alertdesk_core::Severity;

    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ReqwestClient::with_defaults().unwrap();
        assert!(client.config().user_agent.is_none());
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:8000/");
    }

    #[test]
    fn test_alerts_url_keeps_empty_query() {
        let client = ReqwestClient::with_defaults().unwrap();

        let url = client.alerts_url(&AlertFilter::new()).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/alerts/?");

        let filter = AlertFilter::new().with_severity(Severity::High);
        let url = client.alerts_url(&filter).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/alerts/?severity=High");
    }

    #[test]
    fn test_alert_url() {
        let config = ReqwestConfig::new(Url::parse("https://soc.example.com/backend").unwrap());
        let client = ReqwestClient::new(config).unwrap();

        let url = client.alert_url("slack_alert", AlertId::new(12)).unwrap();
        assert_eq!(url.as_str(), "https://soc.example.com/backend/slack_alert/12");
    }
}
