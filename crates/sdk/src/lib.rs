//! # Dumpling SDK
//!
//! Thin Rust client for the Dumpling AI HTTP API. Every endpoint is a JSON
//! `POST` authenticated with a bearer API key.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dumpling_sdk::{endpoints, DumplingClient, DumplingResult};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> DumplingResult<()> {
//!     let client = DumplingClient::builder().build()?;
//!
//!     let results = client
//!         .post_json(endpoints::SEARCH, &json!({"query": "rust async"}), "sk-your-api-key")
//!         .await?;
//!     println!("{}", results);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod transport;

// Re-export main client
pub use client::{DumplingClient, DumplingClientBuilder};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{DumplingError, DumplingResult};
