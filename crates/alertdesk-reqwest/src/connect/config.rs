//! Reqwest client configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

/// Default timeout for HTTP requests: 30 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default address of the alert backend.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/";

/// Configuration for the reqwest HTTP client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ReqwestConfig {
    /// Base URL of the alert backend
    #[cfg_attr(
        feature = "config",
        arg(long = "api-url", env = "ALERTDESK_API_URL", default_value = DEFAULT_BASE_URL)
    )]
    #[serde(default = "default_base_url")]
    pub base_url: Url,

    /// HTTP request timeout in seconds
    #[cfg_attr(
        feature = "config",
        arg(
            long = "request-timeout",
            env = "ALERTDESK_REQUEST_TIMEOUT",
            default_value = "30"
        )
    )]
    #[serde(default = "default_timeout_secs")]
    pub http_timeout: u64,

    /// User-Agent header to send with requests
    #[cfg_attr(
        feature = "config",
        arg(long = "http-user-agent", env = "ALERTDESK_USER_AGENT")
    )]
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ReqwestConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            http_timeout: default_timeout_secs(),
            user_agent: None,
        }
    }
}

impl ReqwestConfig {
    /// Create a configuration pointing at the given backend.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            ..Self::default()
        }
    }

    /// Sets the request timeout in seconds.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.http_timeout = timeout_secs;
        self
    }

    /// Sets the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Returns the effective timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.http_timeout == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.http_timeout)
        }
    }

    /// Returns the effective user agent, using default if not set.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .filter(|agent| !agent.is_empty())
            .unwrap_or_else(Self::default_user_agent)
    }

    /// Returns the base URL with a trailing slash so endpoint paths join
    /// below it instead of replacing its last segment.
    pub fn effective_base_url(&self) -> Url {
        let mut base_url = self.base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        base_url
    }

    /// Returns the default user agent string.
    fn default_user_agent() -> String {
        format!("alertdesk/{}", env!("CARGO_PKG_VERSION"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ReqwestConfig::default();
        assert_eq!(config.effective_timeout(), Duration::from_secs(30));
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
        assert!(config.effective_user_agent().starts_with("alertdesk/"));
    }

    #[test]
    fn test_effective_timeout_uses_default_when_zero() {
        let config = ReqwestConfig::default().with_timeout_secs(0);
        assert_eq!(
            config.effective_timeout(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_effective_user_agent_ignores_empty() {
        let config = ReqwestConfig::default().with_user_agent("");
        assert!(config.effective_user_agent().starts_with("alertdesk/"));

        let config = ReqwestConfig::default().with_user_agent("soc-console/2");
        assert_eq!(config.effective_user_agent(), "soc-console/2");
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = ReqwestConfig::new(Url::parse("https://alerts.example.com/api").unwrap());
        let base_url = config.effective_base_url();
        assert_eq!(base_url.as_str(), "https://alerts.example.com/api/");
        assert_eq!(
            base_url.join("process_alert/").unwrap().as_str(),
            "https://alerts.example.com/api/process_alert/"
        );
    }
}
