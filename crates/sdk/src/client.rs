//! Main client for the Apollo SDK.

use crate::api::{OrganizationsApi, PeopleApi};
use crate::config::{ClientConfig, DEFAULT_BASE_URL};
use crate::error::ApolloResult;
use crate::resolve::CompanyResolver;
use crate::transport::HttpTransport;
use apollo_core::{HttpMethod, RemoteRequest};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Main client for interacting with the Apollo API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApolloClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl ApolloClient {
    /// Create a new client builder.
    pub fn builder() -> ApolloClientBuilder {
        ApolloClientBuilder::new()
    }

    /// Create a client from `APOLLO_API_KEY` and `APOLLO_API_BASE`.
    pub fn from_env() -> ApolloResult<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> ApolloResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the people API.
    pub fn people(&self) -> PeopleApi<'_> {
        PeopleApi::new(self)
    }

    /// Get the organizations API.
    pub fn organizations(&self) -> OrganizationsApi<'_> {
        OrganizationsApi::new(self)
    }

    /// Get the company resolver for name-based lookups.
    pub fn resolver(&self) -> CompanyResolver<'_> {
        CompanyResolver::new(self)
    }

    /// Call an arbitrary endpoint.
    pub async fn call(
        &self,
        endpoint: &str,
        method: HttpMethod,
        body: Option<&Map<String, Value>>,
    ) -> ApolloResult<Value> {
        self.http.call(endpoint, method, body).await
    }

    /// Send a request built from tool arguments.
    pub async fn send(&self, request: &RemoteRequest) -> ApolloResult<Value> {
        self.http.send(request).await
    }
}

/// Builder for creating an ApolloClient.
pub struct ApolloClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
}

impl ApolloClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Override the API base URL. Defaults to the public Apollo API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key for authentication.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the API key if one is available.
    pub fn maybe_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> ApolloResult<ApolloClient> {
        let base_url = Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        let config = ClientConfig {
            base_url,
            api_key: self.api_key,
            timeout: self.timeout,
        };

        ApolloClient::from_config(config)
    }
}

impl Default for ApolloClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
