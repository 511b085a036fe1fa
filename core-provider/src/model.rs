//! Canonical data model shared by all providers
//!
//! Everything here is transient: built per request, handed to the caller,
//! and dropped. Nothing is cached or persisted by the core.

use chrono::{DateTime, Utc};
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::form_urlencoded;

/// Query parameter carrying the provider's own page token inside a [`Cursor`]
pub const CURSOR_PARAM: &str = "cursor";

/// Normalized file or folder, identical in shape for every provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalItem {
    pub is_folder: bool,

    /// Icon URL, or a symbolic icon name such as `"folder"`
    pub icon: Option<String>,

    pub name: String,

    pub mime_type: Option<String>,

    /// Size in bytes; `None` when the provider does not report it
    pub size: Option<u64>,

    /// Stable remote identifier
    pub id: String,

    /// Directly usable thumbnail URL
    pub thumbnail: Option<String>,

    /// Value to pass back as `directory` (folders) or item id (files)
    pub request_path: String,

    pub modified_date: Option<DateTime<Utc>>,
}

/// One page of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResult {
    /// Display identity of the signed-in account
    pub username: String,

    pub items: Vec<CanonicalItem>,

    /// Cursor for the next page; `None` on the last page
    pub next_page_path: Option<Cursor>,
}

/// Opaque pagination token
///
/// Only the provider that issued a cursor may interpret it, and it must only
/// be handed back to that same provider. The providers in this workspace
/// encode `"<directory>?<query>"`, with the directory percent-encoded and the
/// remote page token stored under [`CURSOR_PARAM`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Encode a directory and query pairs into a cursor
    pub fn from_parts(directory: Option<&str>, query: &[(String, String)]) -> Self {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .finish();
        let directory = utf8_percent_encode(directory.unwrap_or_default(), NON_ALPHANUMERIC);
        Self(format!("{}?{}", directory, encoded))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn split(&self) -> (&str, &str) {
        self.0.split_once('?').unwrap_or((self.0.as_str(), ""))
    }

    /// Directory part, `None` for the root listing
    pub fn directory(&self) -> Option<String> {
        let (directory, _) = self.split();
        (!directory.is_empty())
            .then(|| percent_decode_str(directory).decode_utf8_lossy().into_owned())
    }

    /// Decoded query pairs, in their original order
    pub fn query(&self) -> Vec<(String, String)> {
        let (_, query) = self.split();
        form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    pub fn param(&self, name: &str) -> Option<String> {
        self.query()
            .into_iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Cursor {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Cursor {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Bearer token supplied by the caller for a single operation
///
/// The core never stores it beyond the call. `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
}

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl From<&str> for Credential {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Credential {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

/// Outcome of revoking a credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutResult {
    pub revoked: bool,
}

/// Normalized inbound request handed over by the routing layer
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub token: Credential,
    pub directory: Option<String>,
    pub id: Option<String>,
    pub cursor: Option<Cursor>,
}

impl ProviderRequest {
    pub fn new(token: impl Into<Credential>) -> Self {
        Self {
            token: token.into(),
            directory: None,
            id: None,
            cursor: None,
        }
    }

    pub fn directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = Some(cursor);
        self
    }
}
