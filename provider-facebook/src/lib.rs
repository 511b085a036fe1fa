//! # Facebook Provider
//!
//! Implements [`Provider`](core_provider::Provider) for the Facebook Graph
//! API (v17.0).
//!
//! ## Overview
//!
//! - Albums are folders, photos are files
//! - Cursor pagination via the Graph `after` cursor
//! - Downloads stream the largest available rendition
//! - Calls are signed with `appsecret_proof` when an app secret is configured
//! - Thumbnails are not offered
//!
//! An error body with code 190 means the user has to sign in again.

pub mod adapter;
pub mod connector;
pub mod error;
pub mod types;

pub use adapter::FacebookAdapter;
pub use connector::{appsecret_proof, FacebookProvider, GRAPH_API_BASE};
pub use error::GraphErrorPolicy;

/// Registry key and OAuth grant name
pub const PROVIDER_NAME: &str = "facebook";
