// Server configuration and credential resolution

use crate::error::ToolError;
use anyhow::{Context, Result};
use dumpling_sdk::{DumplingClient, DumplingResult, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the upstream API key.
pub const DEFAULT_API_KEY_ENV: &str = "DUMPLING_API_KEY";

/// Characters of a base64 payload kept in tool output.
pub const DEFAULT_PREVIEW_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct McpConfig {
    /// Upstream API base URL
    pub base_url: String,

    /// Name of the environment variable the API key is read from
    pub api_key_env: String,

    /// Length of the preview kept when truncating encoded payloads
    pub preview_length: usize,

    /// Request timeout; unset leaves the HTTP client default
    pub timeout_secs: Option<u64>,
}

impl Default for McpConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            preview_length: DEFAULT_PREVIEW_LENGTH,
            timeout_secs: None,
        }
    }
}

impl McpConfig {
    pub fn load(config_path: &Path) -> Result<Self> {
        // Load config file if it exists, otherwise use defaults
        if !config_path.exists() {
            tracing::debug!("Configuration file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)
            .context("Failed to read configuration file")?;
        let config: Self =
            toml::from_str(&content).context("Failed to parse configuration file")?;

        Ok(config)
    }

    /// Where tool handlers look up the API key.
    pub fn credentials(&self) -> CredentialSource {
        CredentialSource::Env(self.api_key_env.clone())
    }

    pub fn build_client(&self) -> DumplingResult<DumplingClient> {
        let mut builder = DumplingClient::builder()
            .base_url(self.base_url.as_str())
            .user_agent(format!("dumpling-mcp/{}", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }
}

/// Source of the upstream API key, resolved at the start of every call.
#[derive(Debug, Clone)]
pub enum CredentialSource {
    /// Read from the named environment variable.
    Env(String),
    /// A fixed value, for embedding and tests.
    Fixed(Option<String>),
}

impl CredentialSource {
    pub fn resolve(&self) -> Result<String, ToolError> {
        match self {
            Self::Env(var) => match std::env::var(var) {
                Ok(key) if !key.trim().is_empty() => Ok(key),
                _ => Err(ToolError::Config(format!(
                    "{} environment variable is not set",
                    var
                ))),
            },
            Self::Fixed(Some(key)) if !key.trim().is_empty() => Ok(key.clone()),
            Self::Fixed(_) => Err(ToolError::Config("API key is not configured".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = McpConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, McpConfig::default());
        assert_eq!(config.preview_length, 100);
        assert_eq!(config.api_key_env, "DUMPLING_API_KEY");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"http://localhost:9000\"").unwrap();
        writeln!(file, "timeout_secs = 20").unwrap();

        let config = McpConfig::load(file.path()).unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout_secs, Some(20));
        assert_eq!(config.preview_length, DEFAULT_PREVIEW_LENGTH);
    }

    #[test]
    fn test_load_invalid_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "preview_length = \"long\"").unwrap();

        assert!(McpConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_build_client_rejects_bad_url() {
        let config = McpConfig {
            base_url: "::nope::".to_string(),
            ..Default::default()
        };
        assert!(config.build_client().is_err());
    }

    #[test]
    fn test_env_credential_resolution() {
        let var = "DUMPLING_MCP_TEST_KEY_RESOLVE";
        std::env::remove_var(var);
        let source = CredentialSource::Env(var.to_string());

        match source.resolve() {
            Err(ToolError::Config(msg)) => assert!(msg.contains(var)),
            other => panic!("expected config error, got {:?}", other),
        }

        std::env::set_var(var, "sk-live");
        assert_eq!(source.resolve().unwrap(), "sk-live");

        std::env::set_var(var, "   ");
        assert!(source.resolve().is_err());
        std::env::remove_var(var);
    }

    #[test]
    fn test_fixed_credential_resolution() {
        assert!(CredentialSource::Fixed(None).resolve().is_err());
        assert!(CredentialSource::Fixed(Some(String::new())).resolve().is_err());
        assert_eq!(
            CredentialSource::Fixed(Some("k".into())).resolve().unwrap(),
            "k"
        );
    }
}
