//! # Google Drive Provider
//!
//! Implements [`Provider`](core_provider::Provider) for Google Drive API v3.
//!
//! ## Overview
//!
//! This module provides:
//! - Folder listing over "My Drive" and shared drives, paged by `pageToken`
//! - Streaming downloads of binary files
//! - Export of Google Workspace documents (Docs, Sheets, Slides, Drawings)
//! - Thumbnails from Drive's generated `thumbnailLink`
//! - Token revocation through Google's OAuth endpoint
//!
//! Tokens come from the `google` OAuth grant; the provider is registered as
//! `drive`.

pub mod adapter;
pub mod connector;
pub mod error;
pub mod types;

pub use adapter::DriveAdapter;
pub use connector::{GoogleDriveProvider, DRIVE_API_BASE, REVOKE_URL};
pub use error::DriveErrorPolicy;

/// Registry key
pub const PROVIDER_NAME: &str = "drive";

/// OAuth grant issuing this provider's tokens
pub const AUTH_PROVIDER: &str = "google";
