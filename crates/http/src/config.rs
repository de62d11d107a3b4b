//! Client configuration

use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use serde_with::{DurationSeconds, serde_as};
use std::time::Duration;
use url::Url;

/// Backend address used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// User agent sent by native builds
pub const DEFAULT_USER_AGENT: &str = concat!("docuchat-client/", env!("CARGO_PKG_VERSION"));

/// Transport configuration for [`ApiClient`](crate::ApiClient)
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base address of the backend, without a trailing slash
    pub base_url: String,
    /// Request timeout (ignored on wasm, where fetch has no timeout)
    #[serde_as(as = "Option<DurationSeconds<u64>>")]
    pub timeout: Option<Duration>,
    /// User agent header
    pub user_agent: String,
    /// Send cookies with cross-origin requests so the refresh cookie reaches
    /// the backend
    pub include_credentials: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            include_credentials: true,
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at `base_url` with default settings otherwise
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Check the base URL and return it normalised (no trailing slash)
    pub fn normalized_base_url(&self) -> Result<String, ClientError> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ClientError::Configuration("base_url is required".into()));
        }
        let parsed = Url::parse(trimmed)
            .map_err(|e| ClientError::Configuration(format!("invalid base_url {trimmed:?}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::Configuration(format!(
                "unsupported base_url scheme {:?}",
                parsed.scheme()
            )));
        }
        Ok(trimmed.to_string())
    }
}
