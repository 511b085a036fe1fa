//! Graph API connector
//!
//! Implements [`Provider`] for Facebook photo albums.

use std::sync::Arc;

use async_trait::async_trait;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest};
use core_provider::transport::{
    endpoint, execute_checked, fetch_json, head_content_length, open_stream,
};
use core_provider::{
    Credential, Cursor, DownloadStream, ItemAdapter, ListResult, LogoutResult, Provider,
    ProviderError, Result, CURSOR_PARAM,
};
use core_runtime::logging::redact_if_sensitive;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{debug, info, instrument};

use crate::adapter::{largest_image_source, FacebookAdapter};
use crate::error::GraphErrorPolicy;
use crate::types::{FacebookPage, Me, PhotoImages, RevokeResponse};
use crate::PROVIDER_NAME;

/// Graph API base URL, pinned to one version
pub const GRAPH_API_BASE: &str = "https://graph.facebook.com/v17.0";

const ALBUM_FIELDS: &str = "name,cover_photo,created_time,type";
const PHOTO_FIELDS: &str = "icon,images,name,width,height,created_time";
const IDENTITY_FIELDS: &str = "email,name";

/// Facebook provider
///
/// The root listing shows the user's albums; listing an album shows its
/// photos. Photos are downloaded at their largest rendition.
///
/// # Example
///
/// ```ignore
/// use provider_facebook::FacebookProvider;
///
/// let provider = FacebookProvider::new(http_client).with_app_secret(secret);
/// let albums = provider.list(None, &token, None).await?;
/// ```
pub struct FacebookProvider {
    http: Arc<dyn HttpClient>,

    /// App secret used to sign calls with `appsecret_proof`
    app_secret: Option<String>,

    base_url: String,
}

impl FacebookProvider {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            app_secret: None,
            base_url: GRAPH_API_BASE.to_string(),
        }
    }

    /// Sign every Graph call with this app secret
    pub fn with_app_secret(mut self, secret: impl Into<String>) -> Self {
        self.app_secret = Some(secret.into()).filter(|s: &String| !s.is_empty());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build a Graph request carrying the token and, if configured, its proof
    fn graph_request(
        &self,
        method: HttpMethod,
        path: &[&str],
        token: &Credential,
        params: &[(&str, &str)],
    ) -> Result<HttpRequest> {
        let proof = self
            .app_secret
            .as_deref()
            .map(|secret| appsecret_proof(token.token(), secret))
            .transpose()?;

        let mut query: Vec<(&str, &str)> = params.to_vec();
        if let Some(proof) = proof.as_deref() {
            query.push(("appsecret_proof", proof));
        }

        let url = endpoint(&self.base_url, path, &query)?;
        Ok(HttpRequest::new(method, url).bearer_token(token.token()))
    }

    async fn username(&self, token: &Credential) -> Result<String> {
        let request =
            self.graph_request(HttpMethod::Get, &["me"], token, &[("fields", IDENTITY_FIELDS)])?;
        let me: Me = fetch_json(self.http.as_ref(), &GraphErrorPolicy, request).await?;
        Ok(me.username())
    }

    /// URL of the largest rendition of photo `id`
    async fn media_url(&self, id: &str, token: &Credential) -> Result<String> {
        let request = self.graph_request(HttpMethod::Get, &[id], token, &[("fields", "images")])?;
        let photo: PhotoImages = fetch_json(self.http.as_ref(), &GraphErrorPolicy, request).await?;

        largest_image_source(photo.images).ok_or_else(|| {
            ProviderError::InvalidResponse(format!("photo {} has no downloadable image", id))
        })
    }
}

#[async_trait]
impl Provider for FacebookProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    #[instrument(skip(self, token, cursor), fields(provider = PROVIDER_NAME))]
    async fn list(
        &self,
        directory: Option<&str>,
        token: &Credential,
        cursor: Option<&Cursor>,
    ) -> Result<ListResult> {
        // A cursor addresses its own directory and page
        let directory = match cursor {
            Some(cursor) => cursor.directory(),
            None => directory.filter(|d| !d.is_empty()).map(str::to_string),
        };
        let directory = directory.as_deref();
        let current_query = cursor.map(Cursor::query).unwrap_or_default();
        let after = cursor.and_then(|c| c.param(CURSOR_PARAM));

        let (path, fields) = match directory {
            Some(album) => ([album, "photos"], PHOTO_FIELDS),
            None => (["me", "albums"], ALBUM_FIELDS),
        };

        let mut params = vec![("fields", fields)];
        if let Some(after) = after.as_deref() {
            params.push(("after", after));
        }

        debug!(path = %path.join("/"), paged = after.is_some(), "Listing Facebook directory");
        let request = self.graph_request(HttpMethod::Get, &path, token, &params)?;
        let page: FacebookPage = fetch_json(self.http.as_ref(), &GraphErrorPolicy, request).await?;

        let username = self.username(token).await?;
        let result = FacebookAdapter::adapt_page(&page, username, &current_query, directory);

        info!(
            username = %redact_if_sensitive("username", &result.username),
            items = result.items.len(),
            has_more = result.next_page_path.is_some(),
            "Listed Facebook directory"
        );
        Ok(result)
    }

    #[instrument(skip(self, token), fields(provider = PROVIDER_NAME))]
    async fn download(&self, id: &str, token: &Credential) -> Result<DownloadStream> {
        let source = self.media_url(id, token).await?;

        debug!("Streaming largest rendition");
        open_stream(self.http.as_ref(), GraphErrorPolicy, HttpRequest::get(source)).await
    }

    #[instrument(skip(self, token), fields(provider = PROVIDER_NAME))]
    async fn size(&self, id: &str, token: &Credential) -> Result<Option<u64>> {
        let source = self.media_url(id, token).await?;
        Ok(head_content_length(self.http.as_ref(), HttpRequest::head(source)).await)
    }

    #[instrument(skip(self, token), fields(provider = PROVIDER_NAME))]
    async fn logout(&self, token: &Credential) -> Result<LogoutResult> {
        let request = self.graph_request(HttpMethod::Delete, &["me", "permissions"], token, &[])?;

        match execute_checked(self.http.as_ref(), &GraphErrorPolicy, request).await {
            Ok(response) => {
                let revoked = response
                    .json::<RevokeResponse>()
                    .map(|r| r.success)
                    .unwrap_or(true);
                info!(revoked, "Revoked Facebook permissions");
                Ok(LogoutResult { revoked })
            }
            Err(error) if error.is_auth_error() => {
                info!("Token already invalid, treating as revoked");
                Ok(LogoutResult { revoked: true })
            }
            Err(error) => Err(error),
        }
    }
}

/// `appsecret_proof`: hex HMAC-SHA256 of the access token keyed by the app secret
pub fn appsecret_proof(token: &str, app_secret: &str) -> Result<String> {
    let mut mac = Hmac::<Sha256>::new_from_slice(app_secret.as_bytes())
        .map_err(|e| ProviderError::InvalidRequest(format!("invalid app secret: {}", e)))?;
    mac.update(token.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appsecret_proof_known_vector() {
        // RFC 4231 test case 2
        let proof = appsecret_proof("what do ya want for nothing?", "Jefe").unwrap();
        assert_eq!(
            proof,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }
}
