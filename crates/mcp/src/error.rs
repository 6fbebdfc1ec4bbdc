// Error taxonomy for tool dispatch

use dumpling_sdk::DumplingError;

/// Errors raised while resolving, validating or executing a tool call.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Missing or unusable configuration, usually the API credential.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Arguments do not match the tool's input schema.
    #[error("{field}: {reason}")]
    Validation { field: String, reason: String },

    /// No tool with this name is registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Upstream answered with a non-2xx status or an unparseable body.
    #[error("Upstream API error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    /// Upstream could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// A tool-specific cross-field requirement was not met.
    #[error("{0}")]
    Precondition(String),

    /// The request body could not be encoded.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Errors the host caused by the shape of its request, reported as
    /// JSON-RPC errors rather than as failed tool results.
    pub fn is_protocol_error(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::UnknownTool(_))
    }
}

impl From<DumplingError> for ToolError {
    fn from(err: DumplingError) -> Self {
        match err {
            DumplingError::Authentication(msg) | DumplingError::Config(msg) => Self::Config(msg),
            DumplingError::InvalidUrl(e) => Self::Config(format!("invalid API URL: {}", e)),
            DumplingError::Api { status, body } => Self::Upstream { status, body },
            DumplingError::Http(e) => Self::Network(e.to_string()),
            DumplingError::Json(e) => Self::Internal(e.to_string()),
        }
    }
}
