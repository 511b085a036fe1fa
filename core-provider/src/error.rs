//! Error types for the provider layer

use bridge_traits::error::BridgeError;
use thiserror::Error;

/// Classified provider failure
///
/// Every failure surfaced by a provider operation is one of these variants.
/// Transport and HTTP failures are turned into `Auth`, `Api` or `Transport`
/// by [`classify`](crate::classifier::classify) exactly once, right at the
/// I/O boundary.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The credential is invalid or expired; the user has to sign in again
    #[error("Authentication with {provider} failed: the access token is invalid or expired")]
    Auth { provider: String },

    /// The remote service answered with an error status
    #[error("{message}")]
    Api { message: String, status_code: u16 },

    /// No response was received at all
    #[error(transparent)]
    Transport(#[from] BridgeError),

    /// The provider does not offer this operation
    #[error("call to {operation} is not implemented for {provider}")]
    Unsupported {
        provider: String,
        operation: &'static str,
    },

    /// A successful response could not be interpreted
    #[error("Invalid response from provider: {0}")]
    InvalidResponse(String),

    /// The request cannot be addressed to the remote service
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No provider is registered under this name
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
}

/// Coarse error category the caller maps to a UI state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Prompt the user to re-authenticate
    Unauthorized,
    /// Surface the provider's message
    Api,
    /// Connectivity failure, may be retried by the caller
    Transport,
    /// Hide the affordance for this provider
    Unsupported,
    /// Programming or payload error
    Invalid,
}

impl ProviderError {
    pub fn auth(provider: impl Into<String>) -> Self {
        Self::Auth {
            provider: provider.into(),
        }
    }

    pub fn api(message: impl Into<String>, status_code: u16) -> Self {
        Self::Api {
            message: message.into(),
            status_code,
        }
    }

    pub fn unsupported(provider: impl Into<String>, operation: &'static str) -> Self {
        Self::Unsupported {
            provider: provider.into(),
            operation,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ProviderError::Auth { .. } => ErrorKind::Unauthorized,
            ProviderError::Api { .. } => ErrorKind::Api,
            ProviderError::Transport(_) => ErrorKind::Transport,
            ProviderError::Unsupported { .. } => ErrorKind::Unsupported,
            ProviderError::InvalidResponse(_)
            | ProviderError::InvalidRequest(_)
            | ProviderError::UnknownProvider(_) => ErrorKind::Invalid,
        }
    }

    /// HTTP status reported by the remote service, if one was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ProviderError::Api { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    pub fn is_auth_error(&self) -> bool {
        matches!(self, ProviderError::Auth { .. })
    }
}

/// Result type for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ProviderError::api("Unsupported get request", 400);
        assert_eq!(error.to_string(), "Unsupported get request");

        let error = ProviderError::unsupported("facebook", "thumbnail");
        assert_eq!(
            error.to_string(),
            "call to thumbnail is not implemented for facebook"
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(ProviderError::auth("drive").kind(), ErrorKind::Unauthorized);
        assert_eq!(ProviderError::api("nope", 500).kind(), ErrorKind::Api);
        assert_eq!(
            ProviderError::from(BridgeError::Timeout("30s".to_string())).kind(),
            ErrorKind::Transport
        );
        assert_eq!(
            ProviderError::unsupported("facebook", "thumbnail").kind(),
            ErrorKind::Unsupported
        );
        assert_eq!(
            ProviderError::UnknownProvider("box".to_string()).kind(),
            ErrorKind::Invalid
        );
    }

    #[test]
    fn test_status_code_only_for_api_errors() {
        assert_eq!(ProviderError::api("gone", 404).status_code(), Some(404));
        assert_eq!(ProviderError::auth("facebook").status_code(), None);
        assert!(ProviderError::auth("facebook").is_auth_error());
    }
}
