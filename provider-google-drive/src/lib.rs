//! # Google Drive Provider
//!
//! Implements `StorageProvider` for Google Drive API v3.
//!
//! ## Overview
//!
//! This crate provides:
//! - Paginated file listing with a caller-supplied query (`files.list`)
//! - Exact-name lookup of non-trashed files, all pages
//! - Identity lookup by file id (`files.get`)
//!
//! Requests are sent once. Failures are classified into
//! [`GoogleDriveError`] and surface to the caller as `BridgeError`.

pub mod connector;
pub mod error;
pub mod types;

pub use connector::GoogleDriveConnector;
pub use error::{GoogleDriveError, Result};
