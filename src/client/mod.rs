//! Scan service client
//!
//! - `wire` - Response decoding for the three endpoints
//! - `http` - `reqwest` implementation of [`crate::core::ScanBackend`]

pub mod http;
pub mod wire;

pub use http::{ClientConfig, HttpScanClient, DEFAULT_SERVER};
