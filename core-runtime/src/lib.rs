//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the sync job:
//! - Logging and tracing infrastructure
//! - Configuration management
//!
//! ## Overview
//!
//! This crate contains the runtime utilities that the other workspace crates
//! depend on. It establishes the logging conventions and the explicit
//! configuration value handed to every sync component at construction.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{DuplicatePolicy, FailurePolicy, SyncConfig, SyncConfigBuilder};
pub use error::{Error, Result};
