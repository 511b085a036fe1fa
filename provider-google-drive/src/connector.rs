//! Google Drive API connector implementation
//!
//! Implements [`Provider`] for Google Drive API v3.

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
use tracing::{debug, info, instrument};
use url::form_urlencoded;

use crate::adapter::DriveAdapter;
use crate::error::DriveErrorPolicy;
use crate::types::{AboutResponse, DriveFile, FilesListResponse};
use crate::{AUTH_PROVIDER, PROVIDER_NAME};

/// Google Drive API base URL
pub const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Google OAuth token revocation endpoint
pub const REVOKE_URL: &str = "https://oauth2.googleapis.com/revoke";

/// Maximum results per page (Google Drive API limit)
const MAX_PAGE_SIZE: &str = "1000";

const FILE_FIELDS: &str = "id,name,mimeType,size,modifiedTime,iconLink,thumbnailLink";

const LIST_FIELDS: &str =
    "nextPageToken,incompleteSearch,files(id,name,mimeType,size,modifiedTime,iconLink,thumbnailLink)";

/// Google Drive provider
///
/// Lists "My Drive" and shared-drive items, streams binary files as-is and
/// exports Google Workspace documents to Office formats (or PDF).
///
/// # Example
///
/// ```ignore
/// use provider_google_drive::GoogleDriveProvider;
///
/// let provider = GoogleDriveProvider::new(http_client);
/// let page = provider.list(Some("folderId"), &token, None).await?;
/// ```
pub struct GoogleDriveProvider {
    http: Arc<dyn HttpClient>,
    base_url: String,
    revoke_url: String,
}

impl GoogleDriveProvider {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            base_url: DRIVE_API_BASE.to_string(),
            revoke_url: REVOKE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_revoke_url(mut self, revoke_url: impl Into<String>) -> Self {
        self.revoke_url = revoke_url.into();
        self
    }

    fn api_request(
        &self,
        method: HttpMethod,
        path: &[&str],
        token: &Credential,
        params: &[(&str, &str)],
    ) -> Result<HttpRequest> {
        let url = endpoint(&self.base_url, path, params)?;
        Ok(HttpRequest::new(method, url).bearer_token(token.token()))
    }

    async fn username(&self, token: &Credential) -> Result<String> {
        let request = self.api_request(HttpMethod::Get, &["about"], token, &[("fields", "user")])?;
        let about: AboutResponse = fetch_json(self.http.as_ref(), &DriveErrorPolicy, request).await?;
        Ok(about.username())
    }

    async fn metadata(&self, id: &str, token: &Credential) -> Result<DriveFile> {
        let request = self.api_request(
            HttpMethod::Get,
            &["files", id],
            token,
            &[("fields", FILE_FIELDS), ("supportsAllDrives", "true")],
        )?;
        fetch_json(self.http.as_ref(), &DriveErrorPolicy, request).await
    }

    /// Request for the binary content of `file`: the raw bytes, or an
    /// export for Workspace documents
    fn content_request(
        &self,
        method: HttpMethod,
        file: &DriveFile,
        token: &Credential,
    ) -> Result<HttpRequest> {
        if file.is_folder() {
            return Err(ProviderError::InvalidRequest(format!(
                "{} is a folder and has no content",
                file.id
            )));
        }

        match file.export_format() {
            Some(format) => self.api_request(
                method,
                &["files", file.id.as_str(), "export"],
                token,
                &[("mimeType", format.mime_type)],
            ),
            None if file.is_workspace() => Err(ProviderError::InvalidRequest(format!(
                "{} is a {} and cannot be downloaded or exported",
                file.id,
                file.mime_type.as_deref().unwrap_or_default()
            ))),
            None => self.api_request(
                method,
                &["files", file.id.as_str()],
                token,
                &[("alt", "media"), ("supportsAllDrives", "true")],
            ),
        }
    }
}

/// Drive query string literal: backslash and quote escaped
fn quote(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

#[async_trait]
impl Provider for GoogleDriveProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn auth_provider(&self) -> &str {
        AUTH_PROVIDER
    }

    #[instrument(skip(self, token, cursor), fields(provider = PROVIDER_NAME))]
    async fn list(
        &self,
        directory: Option<&str>,
        token: &Credential,
        cursor: Option<&Cursor>,
    ) -> Result<ListResult> {
        let directory = match cursor {
            Some(cursor) => cursor.directory(),
            None => directory.filter(|d| !d.is_empty()).map(str::to_string),
        };
        let directory = directory.as_deref();
        let current_query = cursor.map(Cursor::query).unwrap_or_default();
        let page_token = cursor.and_then(|c| c.param(CURSOR_PARAM));

        let q = format!(
            "'{}' in parents and trashed=false",
            quote(directory.unwrap_or("root"))
        );
        let mut params = vec![
            ("q", q.as_str()),
            ("fields", LIST_FIELDS),
            ("pageSize", MAX_PAGE_SIZE),
            ("orderBy", "folder,name"),
            ("supportsAllDrives", "true"),
            ("includeItemsFromAllDrives", "true"),
        ];
        if let Some(page_token) = page_token.as_deref() {
            params.push(("pageToken", page_token));
        }

        debug!(paged = page_token.is_some(), "Listing Drive folder");
        let request = self.api_request(HttpMethod::Get, &["files"], token, &params)?;
        let page: FilesListResponse =
            fetch_json(self.http.as_ref(), &DriveErrorPolicy, request).await?;

        let username = self.username(token).await?;
        let result = DriveAdapter::adapt_page(&page, username, &current_query, directory);

        info!(
            username = %redact_if_sensitive("username", &result.username),
            items = result.items.len(),
            has_more = result.next_page_path.is_some(),
            incomplete = page.incomplete_search,
            "Listed Drive folder"
        );
        Ok(result)
    }

    #[instrument(skip(self, token), fields(provider = PROVIDER_NAME))]
    async fn download(&self, id: &str, token: &Credential) -> Result<DownloadStream> {
        let file = self.metadata(id, token).await?;
        let request = self.content_request(HttpMethod::Get, &file, token)?;

        debug!(export = file.export_format().is_some(), "Streaming Drive content");
        open_stream(self.http.as_ref(), DriveErrorPolicy, request).await
    }

    #[instrument(skip(self, token), fields(provider = PROVIDER_NAME))]
    async fn thumbnail(&self, id: &str, token: &Credential) -> Result<DownloadStream> {
        let file = self.metadata(id, token).await?;
        let link = file
            .thumbnail_link
            .ok_or_else(|| ProviderError::api("no thumbnail available for item", 404))?;

        let request = HttpRequest::get(link).bearer_token(token.token());
        open_stream(self.http.as_ref(), DriveErrorPolicy, request).await
    }

    #[instrument(skip(self, token), fields(provider = PROVIDER_NAME))]
    async fn size(&self, id: &str, token: &Credential) -> Result<Option<u64>> {
        let file = self.metadata(id, token).await?;
        if let Some(size) = file.size_bytes() {
            return Ok(Some(size));
        }
        if file.is_folder() || (file.is_workspace() && file.export_format().is_none()) {
            return Ok(None);
        }

        // Exports have no stored size; ask the export endpoint
        let request = self.content_request(HttpMethod::Head, &file, token)?;
        Ok(head_content_length(self.http.as_ref(), request).await)
    }

    #[instrument(skip(self, token), fields(provider = PROVIDER_NAME))]
    async fn logout(&self, token: &Credential) -> Result<LogoutResult> {
        let form = form_urlencoded::Serializer::new(String::new())
            .append_pair("token", token.token())
            .finish();
        let request = HttpRequest::new(HttpMethod::Post, self.revoke_url.as_str()).form(form);

        match execute_checked(self.http.as_ref(), &DriveErrorPolicy, request).await {
            Ok(_) => {
                info!("Revoked Google token");
                Ok(LogoutResult { revoked: true })
            }
            Err(error) if error.is_auth_error() => {
                info!("Token already invalid, treating as revoked");
                Ok(LogoutResult { revoked: true })
            }
            Err(error) => Err(error),
        }
    }
}
