//! Request helpers shared by provider implementations
//!
//! Each helper sends one request through the injected [`HttpClient`] and
//! classifies failures immediately, so callers only ever see
//! [`ProviderError`] values.

use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::classifier::{classify, ErrorPolicy};
use crate::error::{ProviderError, Result};
use crate::stream::DownloadStream;

/// Append `segments` to the path of `base` and add query parameters
///
/// Each segment is percent-encoded on its own, so an identifier holding `/`,
/// `?` or `#` cannot change the path or the query. Empty, `.` and `..`
/// segments are rejected.
pub fn endpoint(base: &str, segments: &[&str], params: &[(&str, &str)]) -> Result<String> {
    if let Some(segment) = segments
        .iter()
        .find(|segment| matches!(**segment, "" | "." | ".."))
    {
        return Err(ProviderError::InvalidRequest(format!(
            "invalid path segment '{}'",
            segment
        )));
    }

    let mut url = Url::parse(base)
        .map_err(|e| ProviderError::InvalidRequest(format!("invalid URL '{}': {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| ProviderError::InvalidRequest(format!("URL '{}' cannot take a path", base)))?
        .pop_if_empty()
        .extend(segments);

    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params.iter());
    }

    Ok(url.into())
}

/// Send a request and require a 2xx response
pub async fn execute_checked<P>(
    http: &dyn HttpClient,
    policy: &P,
    request: HttpRequest,
) -> Result<HttpResponse>
where
    P: ErrorPolicy + ?Sized,
{
    let response = match http.execute(request).await {
        Ok(response) => response,
        Err(error) => return Err(classify(policy, Some(error), None)),
    };

    if !response.is_success() {
        debug!(
            provider = policy.provider_name(),
            status = response.status,
            "Remote call returned an error status"
        );
        return Err(classify(policy, None, Some(&response)));
    }

    Ok(response)
}

/// Send a request and deserialize the 2xx JSON body
pub async fn fetch_json<T, P>(http: &dyn HttpClient, policy: &P, request: HttpRequest) -> Result<T>
where
    T: DeserializeOwned,
    P: ErrorPolicy + ?Sized,
{
    let response = execute_checked(http, policy, request).await?;

    serde_json::from_slice(&response.body).map_err(|e| {
        ProviderError::InvalidResponse(format!(
            "failed to parse {} response: {}",
            policy.provider_name(),
            e
        ))
    })
}

/// Open a streaming fetch of binary content
///
/// An error status is read in full (error bodies are small) and classified;
/// a success status is handed back as a [`DownloadStream`] that classifies
/// mid-stream failures with the same policy.
pub async fn open_stream<P>(
    http: &dyn HttpClient,
    policy: P,
    request: HttpRequest,
) -> Result<DownloadStream>
where
    P: ErrorPolicy + 'static,
{
    let response = match http.stream(request).await {
        Ok(response) => response,
        Err(error) => return Err(classify(&policy, Some(error), None)),
    };

    if !response.is_success() {
        let status = response.status;
        let headers = response.headers.clone();
        let error = match response.into_response().await {
            Ok(buffered) => classify(&policy, None, Some(&buffered)),
            Err(_) => {
                // Body unreadable; the status alone still classifies
                let bare = HttpResponse {
                    status,
                    headers,
                    body: Bytes::new(),
                };
                classify(&policy, None, Some(&bare))
            }
        };
        return Err(error);
    }

    Ok(DownloadStream::from_response(response, move |error| {
        classify(&policy, Some(error), None)
    }))
}

/// Metadata-only HEAD for the content length of `request`'s target
///
/// Size is advisory, so every failure degrades to `None`.
pub async fn head_content_length(http: &dyn HttpClient, request: HttpRequest) -> Option<u64> {
    match http.execute(request).await {
        Ok(response) if response.is_success() => {
            let size = response.content_length();
            if size.is_none() {
                debug!("Size request returned no Content-Length");
            }
            size
        }
        Ok(response) => {
            warn!(status = response.status, "Size request rejected, size unknown");
            None
        }
        Err(error) => {
            warn!(error = %error, "Size request failed, size unknown");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use bridge_traits::http::StreamingResponse;
    use futures::stream;
    use mockall::mock;
    use serde_json::Value;
    use std::collections::HashMap;

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
            async fn stream(&self, request: HttpRequest) -> BridgeResult<StreamingResponse>;
        }
    }

    #[derive(Clone)]
    struct TestPolicy;

    impl ErrorPolicy for TestPolicy {
        fn provider_name(&self) -> &str {
            "test"
        }

        fn is_auth_failure(&self, status: u16, _body: &Value) -> bool {
            status == 401
        }
    }

    fn json_response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from(body.to_string()),
        }
    }

    #[test]
    fn test_endpoint_encodes_params() {
        let url = endpoint(
            "https://graph.example.com/v1/",
            &["me", "albums"],
            &[("fields", "name,type"), ("after", "a b&c")],
        )
        .unwrap();

        assert_eq!(
            url,
            "https://graph.example.com/v1/me/albums?fields=name%2Ctype&after=a+b%26c"
        );
    }

    #[test]
    fn test_endpoint_rejects_invalid_base() {
        assert!(matches!(
            endpoint("not a url", &["x"], &[]),
            Err(ProviderError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_endpoint_escapes_segments() {
        let url = endpoint(
            "https://graph.example.com/v1",
            &["../me", "photos?x=1#f"],
            &[],
        )
        .unwrap();

        assert_eq!(url, "https://graph.example.com/v1/..%2Fme/photos%3Fx=1%23f");
    }

    #[test]
    fn test_endpoint_rejects_dot_segments() {
        for segment in ["", ".", ".."] {
            assert!(matches!(
                endpoint("https://graph.example.com/v1", &[segment, "photos"], &[]),
                Err(ProviderError::InvalidRequest(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_fetch_json_success() {
        let mut http = MockHttpClient::new();
        http.expect_execute()
            .times(1)
            .returning(|_| Ok(json_response(200, r#"{"email":"user@example.com"}"#)));

        let value: Value = fetch_json(&http, &TestPolicy, HttpRequest::get("https://x.test/me"))
            .await
            .unwrap();
        assert_eq!(value["email"], "user@example.com");
    }

    #[tokio::test]
    async fn test_fetch_json_classifies_status() {
        let mut http = MockHttpClient::new();
        http.expect_execute()
            .times(1)
            .returning(|_| Ok(json_response(401, "")));

        let result: Result<Value> =
            fetch_json(&http, &TestPolicy, HttpRequest::get("https://x.test/me")).await;
        assert!(result.unwrap_err().is_auth_error());
    }

    #[tokio::test]
    async fn test_fetch_json_invalid_body() {
        let mut http = MockHttpClient::new();
        http.expect_execute()
            .times(1)
            .returning(|_| Ok(json_response(200, "not json")));

        let result: Result<Value> =
            fetch_json(&http, &TestPolicy, HttpRequest::get("https://x.test/me")).await;
        assert!(matches!(result, Err(ProviderError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_open_stream_error_status_is_classified() {
        let mut http = MockHttpClient::new();
        http.expect_stream().times(1).returning(|_| {
            Ok(StreamingResponse::new(
                404,
                HashMap::new(),
                Box::pin(stream::iter(vec![Ok(Bytes::from_static(
                    br#"{"error":{"message":"gone"}}"#,
                ))])),
            ))
        });

        let result = open_stream(&http, TestPolicy, HttpRequest::get("https://x.test/f")).await;
        match result {
            Err(ProviderError::Api {
                message,
                status_code,
            }) => {
                assert_eq!(message, "gone");
                assert_eq!(status_code, 404);
            }
            other => panic!("unexpected: {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_open_stream_unreadable_error_body_still_classified() {
        let mut http = MockHttpClient::new();
        http.expect_stream().times(1).returning(|_| {
            Ok(StreamingResponse::new(
                401,
                HashMap::new(),
                Box::pin(stream::iter(vec![Err(BridgeError::Connection(
                    "reset".to_string(),
                ))])),
            ))
        });

        let result = open_stream(&http, TestPolicy, HttpRequest::get("https://x.test/f")).await;
        assert!(result.unwrap_err().is_auth_error());
    }

    #[tokio::test]
    async fn test_head_content_length_reads_content_length() {
        let mut http = MockHttpClient::new();
        http.expect_execute().times(1).returning(|_| {
            let mut headers = HashMap::new();
            headers.insert("content-length".to_string(), "1234".to_string());
            Ok(HttpResponse {
                status: 200,
                headers,
                body: Bytes::new(),
            })
        });

        assert_eq!(
            head_content_length(&http, HttpRequest::head("https://x.test/f")).await,
            Some(1234)
        );
    }

    #[tokio::test]
    async fn test_head_content_length_degrades_on_failure() {
        let mut http = MockHttpClient::new();
        http.expect_execute()
            .times(1)
            .returning(|_| Err(BridgeError::Timeout("slow".to_string())));

        assert_eq!(
            head_content_length(&http, HttpRequest::head("https://x.test/f")).await,
            None
        );

        let mut http = MockHttpClient::new();
        http.expect_execute()
            .times(1)
            .returning(|_| Ok(json_response(403, "")));

        assert_eq!(
            head_content_length(&http, HttpRequest::head("https://x.test/f")).await,
            None
        );
    }
}
