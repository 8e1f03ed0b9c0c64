use crate::server::DEFAULT_SERVER_NAME;
use anyhow::{Context, Result};
use apollo_sdk::config::DEFAULT_BASE_URL;
use apollo_sdk::ApolloClient;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Settings of the `apollo-mcp` binary. The API key is never read from
/// this file, only from the environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct McpConfig {
    #[serde(default)]
    pub apollo: ApolloSection,

    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApolloSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_server_name")]
    pub name: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_server_name() -> String {
    DEFAULT_SERVER_NAME.to_string()
}

impl Default for ApolloSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            name: default_server_name(),
        }
    }
}

impl McpConfig {
    /// Load the config file if it exists, otherwise use defaults.
    pub fn load(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::info!("Configuration file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)
            .context("Failed to read configuration file")?;
        toml::from_str(&content).context("Failed to parse configuration file")
    }

    /// Build the Apollo client for these settings.
    pub fn client(&self, api_key: Option<String>) -> Result<ApolloClient> {
        ApolloClient::builder()
            .base_url(self.apollo.base_url.clone())
            .maybe_api_key(api_key)
            .timeout(Duration::from_secs(self.apollo.timeout_secs))
            .build()
            .context("Invalid Apollo client configuration")
    }
}
