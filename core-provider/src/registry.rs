//! Provider Registry
//!
//! Maps provider names to shared [`Provider`] instances and dispatches
//! normalized [`ProviderRequest`]s to them. Built once at startup, then only
//! read, so it can be shared behind an `Arc` without locking.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::{ProviderError, Result};
use crate::model::{ListResult, LogoutResult, ProviderRequest};
use crate::provider::Provider;
use crate::stream::DownloadStream;

pub struct ProviderRegistry {
    providers: BTreeMap<String, Arc<dyn Provider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            providers: BTreeMap::new(),
        }
    }

    /// Register a provider under its own name
    ///
    /// Returns the provider previously registered under that name, if any.
    pub fn register(&mut self, provider: Arc<dyn Provider>) -> Option<Arc<dyn Provider>> {
        let name = provider.name().to_string();
        debug!(provider = %name, "Registering provider");
        self.providers.insert(name, provider)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.providers.get(name).cloned()
    }

    /// Like [`get`](Self::get), but a miss is an error
    pub fn require(&self, name: &str) -> Result<Arc<dyn Provider>> {
        self.get(name)
            .ok_or_else(|| ProviderError::UnknownProvider(name.to_string()))
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub async fn list(&self, name: &str, request: &ProviderRequest) -> Result<ListResult> {
        let provider = self.require(name)?;
        provider
            .list(
                request.directory.as_deref(),
                &request.token,
                request.cursor.as_ref(),
            )
            .await
    }

    pub async fn download(&self, name: &str, request: &ProviderRequest) -> Result<DownloadStream> {
        let provider = self.require(name)?;
        let id = required_id(request, "download")?;
        provider.download(id, &request.token).await
    }

    pub async fn thumbnail(&self, name: &str, request: &ProviderRequest) -> Result<DownloadStream> {
        let provider = self.require(name)?;
        let id = required_id(request, "thumbnail")?;
        provider.thumbnail(id, &request.token).await
    }

    pub async fn size(&self, name: &str, request: &ProviderRequest) -> Result<Option<u64>> {
        let provider = self.require(name)?;
        let id = required_id(request, "size")?;
        provider.size(id, &request.token).await
    }

    pub async fn logout(&self, name: &str, request: &ProviderRequest) -> Result<LogoutResult> {
        let provider = self.require(name)?;
        provider.logout(&request.token).await
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn required_id<'a>(request: &'a ProviderRequest, operation: &str) -> Result<&'a str> {
    request
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ProviderError::InvalidRequest(format!("{} requires an item id", operation)))
}
