//! Error classification
//!
//! Turns a raw transport failure and/or an error response into exactly one
//! [`ProviderError`]. Providers run every failed call through [`classify`]
//! before touching the response body, so an error body is never parsed as
//! data.

use bridge_traits::error::BridgeError;
use bridge_traits::http::HttpResponse;
use serde_json::Value;

use crate::error::ProviderError;

/// Provider-specific knowledge the classifier needs
///
/// Services signal expired credentials differently (a body error code, a
/// status code, an OAuth error string), so each provider supplies its own
/// predicate instead of relying on a universal marker.
pub trait ErrorPolicy: Send + Sync {
    /// Name used in generated error messages
    fn provider_name(&self) -> &str;

    /// Whether the response means the credential is invalid or expired.
    ///
    /// `body` is the parsed JSON body, or `Value::Null` when the body is
    /// empty or not JSON.
    fn is_auth_failure(&self, status: u16, body: &Value) -> bool;

    /// Human-readable message carried by the error body, if any
    fn error_message(&self, body: &Value) -> Option<String> {
        body.pointer("/error/message")
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

/// Classify a failed call.
///
/// Priority:
/// 1. the provider's auth-failure marker, regardless of status code
/// 2. a non-success status, with the provider's message or a generated one
/// 3. the transport error, unchanged
///
/// This never panics and is deterministic for a given input.
pub fn classify<P>(
    policy: &P,
    transport: Option<BridgeError>,
    response: Option<&HttpResponse>,
) -> ProviderError
where
    P: ErrorPolicy + ?Sized,
{
    if let Some(response) = response {
        let body: Value = serde_json::from_slice(&response.body).unwrap_or(Value::Null);

        if policy.is_auth_failure(response.status, &body) {
            return ProviderError::auth(policy.provider_name());
        }

        if !response.is_success() {
            let message = policy.error_message(&body).unwrap_or_else(|| {
                format!(
                    "request to {} returned {}",
                    policy.provider_name(),
                    response.status
                )
            });
            return ProviderError::api(message, response.status);
        }
    }

    match transport {
        Some(error) => ProviderError::Transport(error),
        None => ProviderError::Transport(BridgeError::OperationFailed(format!(
            "request to {} failed without a response",
            policy.provider_name()
        ))),
    }
}
