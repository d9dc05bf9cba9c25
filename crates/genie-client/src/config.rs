use std::time::Duration;

use crate::errors::ClientError;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// Environment variable holding the agent base URL.
pub const AGENT_URL_ENV: &str = "GENIE_AGENT_URL";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "GENIE_TIMEOUT_SECS";

/// Configuration for the agent client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the agent; requests are POSTed here and the agent card is
    /// resolved relative to it.
    pub base_url: String,
    /// Overall HTTP timeout, covering the whole streamed response.
    ///
    /// Repository analysis can take minutes, hence the long default.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Creates a config for the given base URL with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().base_url(base_url)
    }

    /// Builds a config from `GENIE_AGENT_URL` and `GENIE_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let mut config = Self::default();
        if let Some(url) = lookup(AGENT_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(TIMEOUT_ENV).filter(|v| !v.trim().is_empty()) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ClientError::Config(format!("{TIMEOUT_ENV} must be a whole number of seconds, got {raw:?}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        config.validate()?;
        Ok(config)
    }

    /// Overrides the agent base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the HTTP timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ClientError> {
        if self.base_url.trim().is_empty() {
            return Err(ClientError::Config("agent base URL must not be empty".into()));
        }
        if self.timeout.is_zero() {
            return Err(ClientError::Config("timeout must be greater than 0".into()));
        }
        Ok(())
    }

    pub(crate) fn rpc_url(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }

    pub(crate) fn agent_card_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            crate::card::AGENT_CARD_PATH
        )
    }
}
