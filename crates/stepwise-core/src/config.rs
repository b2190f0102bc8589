//! Backend connection settings.

use std::time::Duration;

use crate::error::{Result, StudyError};

/// Address of a backend running locally with its default settings.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Per-request timeout covering connect, send and receive.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

const DEFAULT_USER_AGENT: &str = concat!("stepwise/", env!("CARGO_PKG_VERSION"));

/// Settings for [`crate::client::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without a trailing slash
    pub api_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Joins an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Builder for [`ClientConfig`]. Unset values fall back to the defaults.
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    api_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_url<S: Into<String>>(mut self, api_url: Option<S>) -> Self {
        if let Some(api_url) = api_url {
            self.api_url = Some(api_url.into());
        }
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        if let Some(timeout) = timeout {
            self.timeout = Some(timeout);
        }
        self
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Validates and builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::InvalidInput` if the URL is not an http(s)
    /// address or the timeout is zero.
    pub fn build(self) -> Result<ClientConfig> {
        let defaults = ClientConfig::default();

        let api_url = self
            .api_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(StudyError::invalid_input("api_url")
                .with_reason(format!("'{api_url}' is not an http or https URL")));
        }

        let timeout = self.timeout.unwrap_or(defaults.timeout);
        if timeout.is_zero() {
            return Err(StudyError::invalid_input("timeout").with_reason("must be positive"));
        }

        Ok(ClientConfig {
            api_url,
            timeout,
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
        })
    }
}
