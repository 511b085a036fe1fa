//! Uniform provider contract
//!
//! Implementations are stateless apart from the injected HTTP client and
//! immutable options, so one instance is shared across all requests.

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::model::{Credential, Cursor, ListResult, LogoutResult};
use crate::stream::DownloadStream;

/// One third-party storage service behind the picker
///
/// # Example
///
/// ```ignore
/// use core_provider::{Credential, Provider};
///
/// async fn first_page(provider: &dyn Provider, token: &Credential) -> core_provider::Result<()> {
///     let page = provider.list(None, token, None).await?;
///     for item in &page.items {
///         println!("{} {}", item.name, item.is_folder);
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Registry key (e.g. `"facebook"`, `"drive"`)
    fn name(&self) -> &str;

    /// OAuth grant this provider's tokens come from
    ///
    /// Usually the same as [`name`](Provider::name); Drive tokens are issued
    /// by the `google` grant.
    fn auth_provider(&self) -> &str {
        self.name()
    }

    /// List one page of `directory` (the root when `None`)
    ///
    /// With a `cursor` from a previous result the provider continues that
    /// listing instead. The display identity is resolved after the listing
    /// succeeds; an identity failure fails the whole call.
    async fn list(
        &self,
        directory: Option<&str>,
        token: &Credential,
        cursor: Option<&Cursor>,
    ) -> Result<ListResult>;

    /// Stream the full-resolution content of item `id`
    async fn download(&self, id: &str, token: &Credential) -> Result<DownloadStream>;

    /// Stream a thumbnail of item `id`
    ///
    /// Providers without thumbnail support keep this default, which fails
    /// immediately without touching the network.
    async fn thumbnail(&self, id: &str, token: &Credential) -> Result<DownloadStream> {
        let _ = (id, token);
        Err(ProviderError::unsupported(self.name(), "thumbnail"))
    }

    /// Content length of item `id`, `None` when the service does not report it
    async fn size(&self, id: &str, token: &Credential) -> Result<Option<u64>>;

    /// Revoke `token` at the remote service
    async fn logout(&self, token: &Credential) -> Result<LogoutResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ListOnly;

    #[async_trait]
    impl Provider for ListOnly {
        fn name(&self) -> &str {
            "listonly"
        }

        async fn list(
            &self,
            _directory: Option<&str>,
            _token: &Credential,
            _cursor: Option<&Cursor>,
        ) -> Result<ListResult> {
            Ok(ListResult {
                username: "someone".to_string(),
                items: vec![],
                next_page_path: None,
            })
        }

        async fn download(&self, id: &str, _token: &Credential) -> Result<DownloadStream> {
            Err(ProviderError::InvalidRequest(id.to_string()))
        }

        async fn size(&self, _id: &str, _token: &Credential) -> Result<Option<u64>> {
            Ok(None)
        }

        async fn logout(&self, _token: &Credential) -> Result<LogoutResult> {
            Ok(LogoutResult { revoked: true })
        }
    }

    #[tokio::test]
    async fn test_default_thumbnail_is_unsupported() {
        let provider = ListOnly;
        let error = provider
            .thumbnail("photo1", &Credential::new("T"))
            .await
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "call to thumbnail is not implemented for listonly"
        );
    }

    #[test]
    fn test_auth_provider_defaults_to_name() {
        assert_eq!(ListOnly.auth_provider(), "listonly");
    }
}
