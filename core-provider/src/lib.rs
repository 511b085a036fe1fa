//! # Provider Core
//!
//! One contract over many third-party storage services.
//!
//! ## Overview
//!
//! A caller picks a [`Provider`] by name from the [`ProviderRegistry`] and
//! invokes `list`, `download`, `thumbnail`, `size` or `logout`. Each provider
//! builds its service's requests, sends them through the injected
//! `HttpClient`, normalizes the raw payload with its [`ItemAdapter`], and
//! turns every failure into one [`ProviderError`] via [`classify`].
//!
//! ## Modules
//!
//! - [`model`] - Canonical items, listing pages, cursors, credentials
//! - [`adapter`] - Raw payload normalization and image ranking
//! - [`classifier`] - Failure classification per provider policy
//! - [`stream`] - The streaming download protocol
//! - [`transport`] - Request helpers shared by providers
//! - [`provider`] - The provider contract
//! - [`registry`] - Name-based provider lookup and dispatch

pub mod adapter;
pub mod classifier;
pub mod error;
pub mod model;
pub mod provider;
pub mod registry;
pub mod stream;
pub mod transport;

pub use adapter::{sort_images, ImageVariant, ItemAdapter};
pub use classifier::{classify, ErrorPolicy};
pub use error::{ErrorKind, ProviderError, Result};
pub use model::{
    CanonicalItem, Credential, Cursor, ListResult, LogoutResult, ProviderRequest, CURSOR_PARAM,
};
pub use provider::Provider;
pub use registry::ProviderRegistry;
pub use stream::DownloadStream;
