//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! - `HttpClient` using `reqwest`
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::ReqwestHttpClient;
//! use std::sync::Arc;
//!
//! let http_client = Arc::new(ReqwestHttpClient::new()?);
//! ```

mod http;

pub use http::ReqwestHttpClient;
