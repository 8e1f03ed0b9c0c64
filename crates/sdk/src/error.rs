//! Error types for the Apollo SDK.

/// Result type for SDK operations.
pub type ApolloResult<T> = Result<T, ApolloError>;

/// Error types that can occur when calling the Apollo API.
#[derive(Debug, thiserror::Error)]
pub enum ApolloError {
    /// The request never got a response: DNS, refused connection, timeout.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status. Carries the raw body verbatim.
    #[error("Apollo API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Invalid or missing configuration, most often the API key.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApolloError {
    /// Error raised when no API key was configured.
    pub fn missing_api_key() -> Self {
        Self::Config("APOLLO_API_KEY environment variable is required".to_string())
    }

    /// Network-level failure, as opposed to an error response from the API.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    /// HTTP status of an API error response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
