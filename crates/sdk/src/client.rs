//! Main client for the Dumpling SDK.

use crate::config::{ClientConfig, DEFAULT_BASE_URL};
use crate::error::DumplingResult;
use crate::transport::HttpTransport;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Main client for calling the Dumpling API.
///
/// The client holds no credential: every call is handed the API key to use,
/// so callers can resolve it as late as they like.
#[derive(Debug, Clone)]
pub struct DumplingClient {
    config: Arc<ClientConfig>,
    http: HttpTransport,
}

impl DumplingClient {
    /// Create a new client builder.
    pub fn builder() -> DumplingClientBuilder {
        DumplingClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> DumplingResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// Base URL every endpoint path is joined onto.
    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// POST `body` as JSON to `path` with a bearer `api_key` and return the JSON reply.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        api_key: &str,
    ) -> DumplingResult<Value> {
        self.http.post_json(path, body, api_key).await
    }
}

/// Builder for creating a DumplingClient.
pub struct DumplingClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl DumplingClientBuilder {
    /// Create a new builder pointing at the public Dumpling API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Set the base URL of the Dumpling API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> DumplingResult<DumplingClient> {
        let base_url = Url::parse(&self.base_url)?;

        let mut config = ClientConfig::new(base_url);
        config.timeout = self.timeout;
        if let Some(agent) = self.user_agent {
            config.user_agent = agent;
        }

        DumplingClient::from_config(config)
    }
}

impl Default for DumplingClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DumplingError;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_builder_defaults_to_public_api() {
        let client = DumplingClient::builder().build().unwrap();
        assert_eq!(client.base_url().as_str(), "https://app.dumplingai.com/");
    }

    #[test]
    fn test_builder_rejects_invalid_url() {
        let result = DumplingClient::builder().base_url("not a url").build();
        assert!(matches!(result, Err(DumplingError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_post_json_through_client() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/run-python-code"))
            .and(header("Authorization", "Bearer sk-abc"))
            .and(header("User-Agent", "custom-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stdout": "2\n"})))
            .mount(&server)
            .await;

        let client = DumplingClient::builder()
            .base_url(server.uri())
            .user_agent("custom-agent")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        let reply = client
            .post_json("/api/v1/run-python-code", &json!({"code": "print(1+1)"}), "sk-abc")
            .await
            .unwrap();
        assert_eq!(reply["stdout"], "2\n");
    }
}
