//! # File Picker Provider Workspace
//!
//! Assembles a [`ProviderRegistry`] from a [`PickerConfig`].
//!
//! Feature flags map to the individual workspace crates:
//!
//! - `facebook` - [`provider_facebook`]
//! - `google-drive` - [`provider_google_drive`]
//! - `desktop-shims` - [`bridge_desktop`], the default reqwest transport
//!
//! Host applications depend on this crate and enable the providers they
//! ship, instead of wiring each crate individually.

use std::sync::Arc;

use bridge_traits::http::HttpClient;
use core_provider::{Provider, ProviderRegistry};
use core_runtime::config::PickerConfig;
use core_runtime::{Error, Result};
use tracing::{debug, info};

pub use bridge_traits;
pub use core_provider;
pub use core_runtime;

#[cfg(feature = "desktop-shims")]
pub use bridge_desktop;
#[cfg(feature = "facebook")]
pub use provider_facebook;
#[cfg(feature = "google-drive")]
pub use provider_google_drive;

/// Build a registry holding every provider enabled in `config`
///
/// All providers share `http`, and with it one connection pool.
///
/// # Errors
///
/// Returns [`Error::Config`] for an invalid configuration and
/// [`Error::CapabilityMissing`] for a provider name this build does not know
/// (unknown, or its feature is disabled).
pub fn build_registry(config: &PickerConfig, http: Arc<dyn HttpClient>) -> Result<ProviderRegistry> {
    config.validate()?;

    let mut registry = ProviderRegistry::new();
    for name in config.enabled_providers() {
        let provider = create_provider(name, config, Arc::clone(&http))?;
        debug!(provider = name, auth = provider.auth_provider(), "Provider enabled");
        registry.register(provider);
    }

    info!(providers = ?registry.names(), "Provider registry ready");
    Ok(registry)
}

#[allow(unused_variables)]
fn create_provider(
    name: &str,
    config: &PickerConfig,
    http: Arc<dyn HttpClient>,
) -> Result<Arc<dyn Provider>> {
    match name {
        #[cfg(feature = "facebook")]
        provider_facebook::PROVIDER_NAME => {
            let mut provider = provider_facebook::FacebookProvider::new(http);
            if let Some(secret) = config.credentials(name).and_then(|c| c.secret.as_deref()) {
                provider = provider.with_app_secret(secret);
            }
            Ok(Arc::new(provider))
        }
        #[cfg(feature = "google-drive")]
        provider_google_drive::PROVIDER_NAME => Ok(Arc::new(
            provider_google_drive::GoogleDriveProvider::new(http),
        )),
        other => Err(Error::CapabilityMissing {
            capability: format!("provider:{}", other),
            message: "unknown provider, or its feature is not enabled in this build".to_string(),
        }),
    }
}

/// Build the reqwest transport described by the configured HTTP settings
#[cfg(feature = "desktop-shims")]
pub fn default_http_client(
    settings: &core_runtime::config::HttpSettings,
) -> Result<Arc<dyn HttpClient>> {
    settings.validate()?;

    let options = bridge_desktop::ClientOptions {
        request_timeout: settings.request_timeout(),
        read_timeout: settings.read_timeout(),
        connect_timeout: settings.connect_timeout(),
        pool_max_idle_per_host: settings.pool_max_idle_per_host,
        user_agent: settings.user_agent.clone(),
    };
    let client = bridge_desktop::ReqwestHttpClient::with_options(options)
        .map_err(|e| Error::Internal(e.to_string()))?;
    Ok(Arc::new(client))
}

/// [`default_http_client`] plus [`build_registry`] in one step
#[cfg(feature = "desktop-shims")]
pub fn bootstrap(config: &PickerConfig) -> Result<ProviderRegistry> {
    let http = default_http_client(&config.http)?;
    build_registry(config, http)
}
