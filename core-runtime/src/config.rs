//! # Core Configuration Module
//!
//! Provides configuration management for the file picker core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! `PickerConfig` that carries the shared transport settings and the set of
//! enabled providers with their application credentials. It enforces
//! fail-fast validation so a misconfigured host stops at startup rather than
//! on the first user request.
//!
//! Loading the values from files or the environment is left to the host;
//! `PickerConfig` derives `Deserialize` so any loader can feed it, and
//! [`PickerConfig::from_json`] covers the common case.
//!
//! ## Usage
//!
//! ```
//! use core_runtime::config::{PickerConfig, ProviderCredentials};
//! use std::time::Duration;
//!
//! let config = PickerConfig::builder()
//!     .provider("facebook", ProviderCredentials::new("app-id").with_secret("app-secret"))
//!     .enable_provider("drive")
//!     .request_timeout(Duration::from_secs(20))
//!     .build()
//!     .expect("valid config");
//!
//! assert!(config.is_enabled("facebook"));
//! ```
//!
//! ## Error Handling
//!
//! The builder returns [`Error::Config`] with an actionable message:
//!
//! ```
//! use core_runtime::config::PickerConfig;
//!
//! // No provider enabled
//! assert!(PickerConfig::builder().build().is_err());
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Upper bound for any configured timeout
const MAX_TIMEOUT_SECS: u64 = 600;

/// Shared transport settings.
///
/// One HTTP client is built from these and shared by every provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Request timeout in seconds: the whole exchange for buffered calls,
    /// the wait for response headers for downloads
    pub request_timeout_secs: u64,

    /// Longest pause between two body reads of a download, in seconds
    pub read_timeout_secs: u64,

    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,

    /// Idle pooled connections kept per remote host
    pub pool_max_idle_per_host: usize,

    /// `User-Agent` sent with every outbound request
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            read_timeout_secs: 30,
            connect_timeout_secs: 10,
            pool_max_idle_per_host: 10,
            user_agent: concat!("file-picker-core/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Validates the transport settings
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(Error::Config(
                "Request timeout must be greater than 0 seconds".to_string(),
            ));
        }

        if self.read_timeout_secs == 0 {
            return Err(Error::Config(
                "Read timeout must be greater than 0 seconds".to_string(),
            ));
        }

        if self.read_timeout_secs > MAX_TIMEOUT_SECS {
            return Err(Error::Config(format!(
                "Read timeout exceeds maximum of {} seconds",
                MAX_TIMEOUT_SECS
            )));
        }

        if self.connect_timeout_secs == 0 {
            return Err(Error::Config(
                "Connect timeout must be greater than 0 seconds".to_string(),
            ));
        }

        if self.request_timeout_secs > MAX_TIMEOUT_SECS {
            return Err(Error::Config(format!(
                "Request timeout exceeds maximum of {} seconds",
                MAX_TIMEOUT_SECS
            )));
        }

        if self.connect_timeout_secs > self.request_timeout_secs {
            return Err(Error::Config(
                "Connect timeout cannot exceed the request timeout".to_string(),
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err(Error::Config("User agent cannot be empty".to_string()));
        }

        Ok(())
    }
}

/// Application credentials registered with a provider.
///
/// These identify the picker deployment itself, not the end user; user
/// tokens are passed per call and never live in configuration.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderCredentials {
    /// OAuth client / app id
    pub key: Option<String>,

    /// OAuth client / app secret (Facebook uses it for `appsecret_proof`)
    pub secret: Option<String>,
}

impl ProviderCredentials {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            secret: None,
        }
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }
}

impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("key", &self.key)
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Core configuration for the file picker.
///
/// Use [`PickerConfigBuilder`] to construct instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Transport settings shared by every provider
    #[serde(default)]
    pub http: HttpSettings,

    /// Enabled providers keyed by registry name
    pub providers: BTreeMap<String, ProviderCredentials>,
}

impl PickerConfig {
    /// Creates a new builder for constructing a `PickerConfig`.
    pub fn builder() -> PickerConfigBuilder {
        PickerConfigBuilder::default()
    }

    /// Parse and validate a JSON document
    ///
    /// ```
    /// use core_runtime::config::PickerConfig;
    ///
    /// let config = PickerConfig::from_json(r#"{
    ///     "http": { "request_timeout_secs": 15 },
    ///     "providers": { "facebook": { "secret": "s3cret" } }
    /// }"#).unwrap();
    ///
    /// assert_eq!(config.http.request_timeout_secs, 15);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PickerConfig = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Invalid configuration document: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - At least one provider is enabled
    /// - Provider names are non-empty lowercase identifiers
    /// - Transport settings are within bounds
    pub fn validate(&self) -> Result<()> {
        if self.providers.is_empty() {
            return Err(Error::Config(
                "No provider enabled. Enable at least one provider (e.g. \"facebook\", \"drive\")."
                    .to_string(),
            ));
        }

        for name in self.providers.keys() {
            validate_provider_name(name)?;
        }

        self.http.validate()
    }

    pub fn is_enabled(&self, provider: &str) -> bool {
        self.providers.contains_key(provider)
    }

    pub fn credentials(&self, provider: &str) -> Option<&ProviderCredentials> {
        self.providers.get(provider)
    }

    /// Names of all enabled providers in a stable order
    pub fn enabled_providers(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }
}

fn validate_provider_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::Config("Provider name cannot be empty".to_string()));
    }

    let valid = name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if !valid {
        return Err(Error::Config(format!(
            "Provider name '{}' must only contain lowercase letters, digits, '-' or '_'",
            name
        )));
    }

    Ok(())
}

/// Builder for constructing [`PickerConfig`] instances.
///
/// Use this builder to incrementally set configuration options and then
/// call [`build()`](PickerConfigBuilder::build) to create the final config.
#[derive(Debug, Default)]
pub struct PickerConfigBuilder {
    http: HttpSettings,
    providers: BTreeMap<String, ProviderCredentials>,
}

impl PickerConfigBuilder {
    /// Enables a provider with application credentials.
    pub fn provider(mut self, name: impl Into<String>, credentials: ProviderCredentials) -> Self {
        self.providers.insert(name.into(), credentials);
        self
    }

    /// Enables a provider that needs no application credentials.
    pub fn enable_provider(self, name: impl Into<String>) -> Self {
        self.provider(name, ProviderCredentials::default())
    }

    /// Sets the request timeout.
    ///
    /// Default: 30 seconds. Sub-second precision is dropped.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.http.request_timeout_secs = timeout.as_secs();
        self
    }

    /// Sets the idle timeout between body reads of a download.
    ///
    /// Default: 30 seconds.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.http.read_timeout_secs = timeout.as_secs();
        self
    }

    /// Sets the connect timeout.
    ///
    /// Default: 10 seconds.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.http.connect_timeout_secs = timeout.as_secs();
        self
    }

    /// Sets how many idle connections the shared pool keeps per host.
    pub fn pool_max_idle_per_host(mut self, max_idle: usize) -> Self {
        self.http.pool_max_idle_per_host = max_idle;
        self
    }

    /// Sets the outbound `User-Agent`.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.http.user_agent = user_agent.into();
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when validation fails.
    pub fn build(self) -> Result<PickerConfig> {
        let config = PickerConfig {
            http: self.http,
            providers: self.providers,
        };
        config.validate()?;
        Ok(config)
    }
}
