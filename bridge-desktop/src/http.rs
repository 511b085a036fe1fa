//! HTTP Client Implementation using Reqwest

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    http::{ByteStream, HttpClient, HttpMethod, HttpRequest, HttpResponse, StreamingResponse},
};
use futures_util::TryStreamExt;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Connection settings for [`ReqwestHttpClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Timeout applied when a request carries none: the whole exchange for
    /// buffered calls, only the wait for response headers for streamed ones
    pub request_timeout: Duration,
    /// Longest silence tolerated between two reads of a response body
    pub read_timeout: Duration,
    /// TCP/TLS connect timeout
    pub connect_timeout: Duration,
    /// Idle connections kept per host in the shared pool
    pub pool_max_idle_per_host: usize,
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            read_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_max_idle_per_host: 10,
            user_agent: concat!("file-picker-core/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Reqwest-based HTTP client implementation
///
/// Provides HTTP operations with:
/// - Connection pooling via reqwest (cloning shares the pool)
/// - TLS support by default
/// - Async body streaming
///
/// Requests are sent exactly once; there is no retry loop here.
///
/// Streamed bodies have no overall deadline. A transfer of any length
/// succeeds as long as bytes keep arriving within the read timeout.
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    request_timeout: Duration,
}

impl ReqwestHttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_options(ClientOptions::default())
    }

    /// Create a new HTTP client with custom connection settings
    pub fn with_options(options: ClientOptions) -> Result<Self> {
        let client = Client::builder()
            .read_timeout(options.read_timeout)
            .connect_timeout(options.connect_timeout)
            .pool_max_idle_per_host(options.pool_max_idle_per_host)
            .user_agent(options.user_agent)
            .build()
            .map_err(|e| {
                BridgeError::NotAvailable(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            request_timeout: options.request_timeout,
        })
    }

    /// Wrap an already configured reqwest client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            request_timeout: ClientOptions::default().request_timeout,
        }
    }

    /// Convert bridge HttpMethod to reqwest Method
    fn convert_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Head => reqwest::Method::HEAD,
        }
    }

    /// Map a reqwest failure onto the transport error taxonomy
    fn convert_error(error: reqwest::Error) -> BridgeError {
        if error.is_timeout() {
            BridgeError::Timeout(error.to_string())
        } else if error.is_connect() {
            BridgeError::Connection(error.to_string())
        } else {
            BridgeError::OperationFailed(error.to_string())
        }
    }

    fn convert_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|s| (k.to_string(), s.to_string())))
            .collect()
    }

    /// Build reqwest request from bridge request
    fn build_request(&self, request: HttpRequest) -> reqwest::RequestBuilder {
        let method = Self::convert_method(request.method);
        let mut req = self.client.request(method, &request.url);

        for (key, value) in request.headers {
            req = req.header(key, value);
        }

        if let Some(body) = request.body {
            req = req.body(body);
        }

        req
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        request.send().await.map_err(|e| {
            warn!(error = %e, "HTTP request failed before a response was received");
            Self::convert_error(e)
        })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!(method = ?request.method, url = %request.url, "Executing HTTP request");
        let timeout = request.timeout.unwrap_or(self.request_timeout);

        // Covers the whole exchange, body included
        let response = self.send(self.build_request(request).timeout(timeout)).await?;
        let status = response.status().as_u16();
        let headers = Self::convert_headers(response.headers());

        let body = response.bytes().await.map_err(Self::convert_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    async fn stream(&self, request: HttpRequest) -> Result<StreamingResponse> {
        debug!(method = ?request.method, url = %request.url, "Streaming HTTP request");
        let timeout = request.timeout.unwrap_or(self.request_timeout);

        let response = tokio::time::timeout(timeout, self.send(self.build_request(request)))
            .await
            .map_err(|_| {
                warn!(?timeout, "No response headers before the timeout");
                BridgeError::Timeout(format!("no response within {:?}", timeout))
            })??;
        let status = response.status().as_u16();
        let headers = Self::convert_headers(response.headers());

        let body: ByteStream = Box::pin(response.bytes_stream().map_err(Self::convert_error));

        Ok(StreamingResponse::new(status, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_http_client_creation() {
        assert!(ReqwestHttpClient::new().is_ok());
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(
            ReqwestHttpClient::convert_method(HttpMethod::Get),
            reqwest::Method::GET
        );
        assert_eq!(
            ReqwestHttpClient::convert_method(HttpMethod::Head),
            reqwest::Method::HEAD
        );
        assert_eq!(
            ReqwestHttpClient::convert_method(HttpMethod::Delete),
            reqwest::Method::DELETE
        );
    }

    #[test]
    fn test_default_options() {
        let options = ClientOptions::default();
        assert_eq!(options.request_timeout, Duration::from_secs(30));
        assert_eq!(options.read_timeout, Duration::from_secs(30));
        assert!(options.user_agent.starts_with("file-picker-core/"));
    }
}
