//! Graph API error policy

use core_provider::ErrorPolicy;
use serde::Deserialize;
use serde_json::Value;

/// Graph error code for an invalid, expired or revoked access token
pub const INVALID_TOKEN_CODE: i64 = 190;

/// `{"error": {...}}` envelope returned by every failing Graph call
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphErrorBody {
    pub error: Option<GraphError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphError {
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub code: Option<i64>,
    pub error_subcode: Option<i64>,
    pub error_user_msg: Option<String>,
}

impl GraphErrorBody {
    fn parse(body: &Value) -> Option<GraphError> {
        GraphErrorBody::deserialize(body).ok().and_then(|b| b.error)
    }
}

/// Facebook signals expired credentials with error code 190 in the body,
/// whatever the HTTP status.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphErrorPolicy;

impl ErrorPolicy for GraphErrorPolicy {
    fn provider_name(&self) -> &str {
        crate::PROVIDER_NAME
    }

    fn is_auth_failure(&self, _status: u16, body: &Value) -> bool {
        GraphErrorBody::parse(body).and_then(|e| e.code) == Some(INVALID_TOKEN_CODE)
    }

    fn error_message(&self, body: &Value) -> Option<String> {
        let error = GraphErrorBody::parse(body)?;
        error.error_user_msg.or(error.message)
    }
}
