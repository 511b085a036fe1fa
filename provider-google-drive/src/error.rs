//! Error policy for Google APIs

use core_provider::ErrorPolicy;
use serde_json::Value;

/// Google reports a bad token with HTTP 401 on Drive calls and with an
/// OAuth `"error": "invalid_token"` body on the revoke endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriveErrorPolicy;

impl ErrorPolicy for DriveErrorPolicy {
    fn provider_name(&self) -> &str {
        crate::PROVIDER_NAME
    }

    fn is_auth_failure(&self, status: u16, body: &Value) -> bool {
        status == 401 || body.get("error").and_then(Value::as_str) == Some("invalid_token")
    }

    fn error_message(&self, body: &Value) -> Option<String> {
        body.pointer("/error/message")
            .or_else(|| body.get("error_description"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}
