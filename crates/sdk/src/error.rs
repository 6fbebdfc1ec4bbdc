//! Error types for the Dumpling SDK.

/// Result type for SDK operations.
pub type DumplingResult<T> = Result<T, DumplingError>;

/// Error types that can occur when calling the Dumpling API.
#[derive(Debug, thiserror::Error)]
pub enum DumplingError {
    /// Transport-level failure (DNS, connection refused, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status, or a body that is not JSON.
    #[error("Upstream API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// No credential was supplied for the request.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request body could not be encoded as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl DumplingError {
    /// HTTP status carried by the error, if the upstream answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error was caused by the request itself (4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(400..=499))
    }

    /// Create an API error from a status code and response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        Self::Api {
            status,
            body: body.to_string(),
        }
    }
}
