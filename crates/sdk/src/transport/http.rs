//! HTTP transport layer for the Dumpling SDK.

use crate::config::ClientConfig;
use crate::error::{DumplingError, DumplingResult};
use reqwest::{header, Client};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// HTTP transport for making API requests.
///
/// One attempt per call: no retries, no backoff.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> DumplingResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Build a URL for the given path.
    ///
    /// Paths resolve beneath the base URL, so a base of
    /// `https://proxy.local/dumpling` keeps its `/dumpling` prefix.
    fn build_url(&self, path: &str) -> DumplingResult<url::Url> {
        let mut base = self.config.base_url.clone();
        if !base.path().ends_with('/') {
            let dir = format!("{}/", base.path());
            base.set_path(&dir);
        }
        base.join(path.trim_start_matches('/'))
            .map_err(DumplingError::InvalidUrl)
    }

    /// Execute an authenticated POST with a JSON body and parse the JSON reply.
    ///
    /// An empty `api_key` fails before any network activity.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        api_key: &str,
    ) -> DumplingResult<Value> {
        if api_key.trim().is_empty() {
            return Err(DumplingError::Authentication(
                "API key is empty or not set".to_string(),
            ));
        }

        let payload = serde_json::to_vec(body)?;
        let url = self.build_url(path)?;
        debug!(url = %url, "POST request");

        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "Upstream returned error status");
            return Err(DumplingError::from_response(status.as_u16(), &text));
        }

        serde_json::from_str(&text)
            .map_err(|_| DumplingError::from_response(status.as_u16(), &text))
    }
}
