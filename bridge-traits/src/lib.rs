//! # Host Bridge Traits
//!
//! Transport abstraction consumed by every provider.
//!
//! ## Overview
//!
//! Providers never talk to a concrete HTTP library. They receive an
//! `Arc<dyn HttpClient>` at construction time, which lets hosts share one
//! connection pool across all providers and lets tests substitute stubs.
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - Buffered and streaming async HTTP
//!
//! ## Error Handling
//!
//! [`BridgeError`](error::BridgeError) is the raw transport failure: it is
//! only produced when no HTTP response was received at all. Responses with
//! error statuses are handed back as values so the provider layer can
//! classify them.
//!
//! ## Thread Safety
//!
//! `HttpClient` requires `Send + Sync` so a single instance can serve
//! concurrent requests from many tasks.
//!
//! ## Example
//!
//! ```ignore
//! use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse, StreamingResponse};
//! use bridge_traits::error::Result;
//! use async_trait::async_trait;
//!
//! pub struct MyHttpClient {
//!     client: reqwest::Client,
//! }
//!
//! #[async_trait]
//! impl HttpClient for MyHttpClient {
//!     async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
//!         todo!()
//!     }
//!
//!     async fn stream(&self, request: HttpRequest) -> Result<StreamingResponse> {
//!         todo!()
//!     }
//! }
//! ```

pub mod error;
pub mod http;

pub use error::BridgeError;

pub use http::{
    ByteStream, HttpClient, HttpMethod, HttpRequest, HttpResponse, StreamingResponse,
};
