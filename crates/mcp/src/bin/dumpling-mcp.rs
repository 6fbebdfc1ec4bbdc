// Standalone MCP server binary

use anyhow::{Context, Result};
use clap::Parser;
use dumpling_mcp::config::McpConfig;
use dumpling_mcp::server::McpServer;
use dumpling_mcp::tools::{register_all, Forwarder, ToolRegistry};
use std::path::PathBuf;
use std::sync::Arc;

const INSTRUCTIONS: &str = "Tools for the Dumpling AI API: web search and scraping, \
    YouTube transcripts, document and media extraction, image generation, agent \
    completions and sandboxed code execution. The API key is read from the \
    environment on every call.";

#[derive(Parser, Debug)]
#[command(name = "dumpling-mcp")]
#[command(about = "MCP server for the Dumpling AI API (stdio)", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "dumpling-mcp.toml")]
    config: PathBuf,

    /// Upstream API base URL
    #[arg(long, env = "DUMPLING_BASE_URL")]
    base_url: Option<String>,

    /// Characters kept when truncating encoded payloads
    #[arg(long)]
    preview_length: Option<usize>,

    /// Upstream request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();

    if let Err(e) = run(Args::parse()).await {
        tracing::error!("dumpling-mcp failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    tracing::info!("Dumpling MCP Server starting...");

    let mut config = McpConfig::load(&args.config)?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(preview_length) = args.preview_length {
        config.preview_length = preview_length;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.timeout_secs = Some(timeout_secs);
    }

    let client = config
        .build_client()
        .context("Failed to build API client")?;
    tracing::info!(base_url = %client.base_url(), "Using upstream API");

    let credentials = config.credentials();
    if credentials.resolve().is_err() {
        tracing::warn!(
            "{} is not set; tool calls will fail until it is",
            config.api_key_env
        );
    }

    let forwarder = Forwarder::new(client, credentials).with_preview_length(config.preview_length);

    let mut registry = ToolRegistry::new();
    register_all(&mut registry, Arc::new(forwarder));

    tracing::info!("Registered {} tools", registry.len());

    let server = McpServer::new(registry).with_instructions(INSTRUCTIONS);
    server.start().await?;

    Ok(())
}
