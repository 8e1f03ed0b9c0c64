//! HTTP transport layer for the Apollo SDK.

use crate::config::ClientConfig;
use crate::error::{ApolloError, ApolloResult};
use apollo_core::{HttpMethod, RemoteRequest};
use reqwest::{header, Client, RequestBuilder};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

const API_KEY_HEADER: &str = "x-api-key";

/// HTTP transport for making API requests.
///
/// Every request carries the API key, a JSON content type and
/// `Cache-Control: no-cache`. Failures are never retried.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> ApolloResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
        headers.insert(header::CACHE_CONTROL, header::HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Build a URL for the given endpoint path, keeping any path prefix
    /// the base URL carries (such as `/api/v1`).
    fn build_url(&self, path: &str) -> ApolloResult<url::Url> {
        let mut base = self.config.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        Ok(base.join(path.trim_start_matches('/'))?)
    }

    /// The configured key, or a configuration error if there is none.
    fn api_key(&self) -> ApolloResult<header::HeaderValue> {
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(ApolloError::missing_api_key)?;
        header::HeaderValue::from_str(key)
            .map_err(|_| ApolloError::Config("Invalid API key format".to_string()))
    }

    /// Send a request and decode the JSON response.
    async fn execute(&self, request_builder: RequestBuilder) -> ApolloResult<Value> {
        let api_key = self.api_key()?;
        let response = request_builder.header(API_KEY_HEADER, api_key).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Apollo API returned an error");
            return Err(ApolloError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Call an endpoint. For `GET` the body becomes query parameters, with
    /// null entries dropped; for `POST` it is sent as the JSON payload.
    /// A `GET` without parameters is sent as-is.
    pub async fn call(
        &self,
        endpoint: &str,
        method: HttpMethod,
        body: Option<&Map<String, Value>>,
    ) -> ApolloResult<Value> {
        let url = self.build_url(endpoint)?;

        let request = match method {
            HttpMethod::Get => {
                debug!(url = %url, "GET request");
                let query = body.map(query_pairs).unwrap_or_default();
                self.client.get(url).query(&query)
            }
            HttpMethod::Post => {
                debug!(url = %url, "POST request");
                let empty = Map::new();
                self.client.post(url).json(body.unwrap_or(&empty))
            }
        };

        self.execute(request).await
    }

    /// Send a request built by the request mapper.
    pub async fn send(&self, request: &RemoteRequest) -> ApolloResult<Value> {
        self.call(request.endpoint(), request.method(), Some(request.params()))
            .await
    }
}

fn query_pairs(params: &Map<String, Value>) -> Vec<(String, String)> {
    params
        .iter()
        .filter_map(|(key, value)| query_value(value).map(|value| (key.clone(), value)))
        .collect()
}

fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(query_value)
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}
