//! Configuration types for the Apollo SDK.

use crate::error::ApolloResult;
use std::time::Duration;
use url::Url;

/// Base URL of the public Apollo REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.apollo.io/api/v1";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "APOLLO_API_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "APOLLO_API_BASE";

/// Configuration for the Apollo client.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: Url,
    /// API key sent as `x-api-key`. Checked when a request is made, not
    /// when the client is built.
    pub api_key: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Read `APOLLO_API_KEY` and `APOLLO_API_BASE` from the environment.
    pub fn from_env() -> ApolloResult<Self> {
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(Url::parse(&base_url)?);
        config.api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());
        Ok(config)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}
