// Request forwarding: one upstream POST per tool invocation

use crate::config::{CredentialSource, DEFAULT_PREVIEW_LENGTH};
use crate::error::ToolError;
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::definition::ToolDefinition;
use crate::tools::registry::Tool;
use crate::tools::schema::ValidatedInput;
use dumpling_sdk::DumplingClient;
use serde_json::Value;
use std::sync::Arc;

/// Shared by every forwarding tool: the HTTP client, where the API key comes
/// from, and the preview length used when truncating payloads.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: DumplingClient,
    credentials: CredentialSource,
    preview_length: usize,
}

impl Forwarder {
    pub fn new(client: DumplingClient, credentials: CredentialSource) -> Self {
        Self {
            client,
            credentials,
            preview_length: DEFAULT_PREVIEW_LENGTH,
        }
    }

    pub fn with_preview_length(mut self, preview_length: usize) -> Self {
        self.preview_length = preview_length;
        self
    }

    pub fn preview_length(&self) -> usize {
        self.preview_length
    }

    /// POST `body` to `path`. The credential is resolved first, so a missing
    /// key fails without touching the network.
    pub async fn forward(&self, path: &str, body: &Value) -> Result<Value, ToolError> {
        let api_key = self.credentials.resolve()?;
        Ok(self.client.post_json(path, body, &api_key).await?)
    }
}

/// A tool backed by a declarative definition and one upstream endpoint.
pub struct ForwardingTool {
    definition: ToolDefinition,
    forwarder: Arc<Forwarder>,
}

impl ForwardingTool {
    pub fn new(definition: ToolDefinition, forwarder: Arc<Forwarder>) -> Self {
        Self {
            definition,
            forwarder,
        }
    }
}

#[async_trait::async_trait]
impl Tool for ForwardingTool {
    fn schema(&self) -> ToolSchema {
        self.definition.schema()
    }

    fn validate(&self, arguments: &Value) -> Result<ValidatedInput, ToolError> {
        self.definition.validate(arguments)
    }

    async fn execute(&self, input: ValidatedInput) -> Result<CallToolResult, ToolError> {
        self.definition.check_preconditions(&input)?;

        let body = self.definition.build_body(&input);
        tracing::debug!(tool = self.definition.name, path = self.definition.path, "Forwarding tool call");

        let raw = self.forwarder.forward(self.definition.path, &body).await?;
        let text = self
            .definition
            .shape
            .render(raw, self.forwarder.preview_length());

        Ok(CallToolResult::text(text))
    }
}
