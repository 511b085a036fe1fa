//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the file picker core:
//! - Logging and tracing infrastructure
//! - Configuration management
//!
//! ## Overview
//!
//! This crate contains the ambient utilities that the provider crates and
//! the host bootstrap depend on. It establishes the logging conventions
//! (structured `tracing` events, token redaction) and the validated
//! configuration shape used to assemble a provider registry.

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
