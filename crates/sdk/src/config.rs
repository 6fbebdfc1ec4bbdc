//! Configuration types for the Dumpling SDK.

use std::time::Duration;
use url::Url;

/// Default upstream base URL.
pub const DEFAULT_BASE_URL: &str = "https://app.dumplingai.com";

/// Configuration for the Dumpling client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Dumpling API.
    pub base_url: Url,
    /// Request timeout. `None` leaves the HTTP client's own default in place.
    pub timeout: Option<Duration>,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: None,
            user_agent: format!("dumpling-sdk/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_new() {
        let url = Url::parse("https://example.com").unwrap();
        let config = ClientConfig::new(url.clone());

        assert_eq!(config.base_url, url);
        assert!(config.timeout.is_none());
        assert!(config.user_agent.starts_with("dumpling-sdk/"));
    }

    #[test]
    fn test_default_base_url_parses() {
        let url = Url::parse(DEFAULT_BASE_URL).unwrap();
        assert_eq!(url.host_str(), Some("app.dumplingai.com"));
    }
}
