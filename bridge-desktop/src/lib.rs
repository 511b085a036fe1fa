//! # Desktop Bridge Implementations
//!
//! Default implementation of the transport bridge for server and desktop
//! hosts.
//!
//! ## Overview
//!
//! - `HttpClient` using `reqwest`, with a single connection pool shared by
//!   every clone of the client
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::ReqwestHttpClient;
//! use bridge_traits::HttpClient;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let http_client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new()?);
//!
//!     // Hand the same client to every provider
//! }
//! ```

mod http;

pub use http::{ClientOptions, ReqwestHttpClient};
