//! Basic SDK usage example.
//!
//! Runs a web search and prints the titles of the organic results.
//!
//! Run with: DUMPLING_API_KEY=sk-... cargo run --example basic_usage

use dumpling_sdk::{endpoints, DumplingClient, DumplingError, DumplingResult};
use serde_json::json;

#[tokio::main]
async fn main() -> DumplingResult<()> {
    tracing_subscriber::fmt::init();

    let api_key = std::env::var("DUMPLING_API_KEY")
        .map_err(|_| DumplingError::Config("DUMPLING_API_KEY is not set".to_string()))?;

    let client = DumplingClient::builder().build()?;

    println!("Searching...");
    let results = client
        .post_json(
            endpoints::SEARCH,
            &json!({"query": "model context protocol", "country": "us"}),
            &api_key,
        )
        .await?;

    let organic = results["organic"].as_array().cloned().unwrap_or_default();
    println!("Found {} results", organic.len());
    for item in organic.iter().take(5) {
        println!("  {}  {}", item["title"], item["link"]);
    }

    Ok(())
}
