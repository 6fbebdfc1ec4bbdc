//! Transport layer for the Dumpling SDK.

pub mod http;

pub use http::HttpTransport;
