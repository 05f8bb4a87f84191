//! # Sync Configuration Module
//!
//! Provides the explicit configuration value for the sync job.
//!
//! ## Overview
//!
//! Every tunable of the job lives in a single [`SyncConfig`]. It is built once
//! at process start with [`SyncConfigBuilder`] and handed to each component at
//! construction; no component reads files or globals to discover its settings.
//! The builder validates eagerly so that a bad value fails at startup rather
//! than on the first cycle.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::SyncConfig;
//! use std::time::Duration;
//!
//! let config = SyncConfig::builder()
//!     .sink_name("AllFilesSpreadsheet")
//!     .page_size(100)
//!     .poll_interval(Duration::from_secs(60 * 15))
//!     .build()
//!     .expect("Failed to build config");
//! ```
//!
//! ## Error Handling
//!
//! ```should_panic
//! use core_runtime::config::SyncConfig;
//!
//! // Page sizes above the provider maximum are rejected
//! let config = SyncConfig::builder()
//!     .page_size(5000)
//!     .build()
//!     .expect("Should fail - page size out of range");
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Application identifier sent with every provider request
pub const DEFAULT_APPLICATION_ID: &str = "Google Drive Assistant";

/// Title of the spreadsheet receiving the rows
pub const DEFAULT_SINK_NAME: &str = "AllFilesSpreadsheet";

/// Client secrets downloaded from the provider console
pub const DEFAULT_CREDENTIALS_PATH: &str = "credentials.json";

/// Persisted OAuth token
pub const DEFAULT_TOKEN_STORE_PATH: &str = "user-token";

/// Items requested per listing page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page the storage provider accepts
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Pause between the end of one cycle and the start of the next
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// What the scheduler does when a cycle fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Stop the scheduler and return the error to the caller
    #[default]
    Propagate,
    /// Log the error, wait the usual interval and run the next cycle
    LogAndContinue,
}

/// Which match wins when several sinks share the configured name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// First resource in provider response order
    #[default]
    FirstReturned,
    /// Resource with the lexicographically smallest id
    SmallestId,
}

/// Configuration for the sync job.
///
/// Use [`SyncConfigBuilder`] to construct instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Identifier sent as `User-Agent` on provider requests
    pub application_id: String,

    /// Exact name of the target spreadsheet
    pub sink_name: String,

    /// Path to the OAuth client secrets file
    pub credentials_path: PathBuf,

    /// Path to the persisted OAuth token
    pub token_store_path: PathBuf,

    /// Items requested per listing page
    pub page_size: u32,

    /// Sleep between cycles, measured from the end of the previous cycle
    pub poll_interval: Duration,

    /// Scheduler behavior on cycle failure
    pub failure_policy: FailurePolicy,

    /// Tie-break between same-named sinks
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            application_id: DEFAULT_APPLICATION_ID.to_string(),
            sink_name: DEFAULT_SINK_NAME.to_string(),
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            token_store_path: PathBuf::from(DEFAULT_TOKEN_STORE_PATH),
            page_size: DEFAULT_PAGE_SIZE,
            poll_interval: DEFAULT_POLL_INTERVAL,
            failure_policy: FailurePolicy::default(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl SyncConfig {
    /// Creates a new builder seeded with the defaults.
    pub fn builder() -> SyncConfigBuilder {
        SyncConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Application id and sink name are not blank
    /// - Credential and token paths are not empty
    /// - Page size is within `1..=MAX_PAGE_SIZE`
    /// - Poll interval is non-zero
    pub fn validate(&self) -> Result<()> {
        if self.application_id.trim().is_empty() {
            return Err(Error::Config("Application id cannot be empty".to_string()));
        }

        if self.sink_name.trim().is_empty() {
            return Err(Error::Config("Sink name cannot be empty".to_string()));
        }

        if self.credentials_path.as_os_str().is_empty() {
            return Err(Error::Config("Credentials path cannot be empty".to_string()));
        }

        if self.token_store_path.as_os_str().is_empty() {
            return Err(Error::Config("Token store path cannot be empty".to_string()));
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(Error::Config(format!(
                "Page size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }

        if self.poll_interval.is_zero() {
            return Err(Error::Config(
                "Poll interval must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for [`SyncConfig`].
#[derive(Debug, Default)]
pub struct SyncConfigBuilder {
    application_id: Option<String>,
    sink_name: Option<String>,
    credentials_path: Option<PathBuf>,
    token_store_path: Option<PathBuf>,
    page_size: Option<u32>,
    poll_interval: Option<Duration>,
    failure_policy: Option<FailurePolicy>,
    duplicate_policy: Option<DuplicatePolicy>,
}

impl SyncConfigBuilder {
    pub fn application_id(mut self, id: impl Into<String>) -> Self {
        self.application_id = Some(id.into());
        self
    }

    pub fn sink_name(mut self, name: impl Into<String>) -> Self {
        self.sink_name = Some(name.into());
        self
    }

    pub fn credentials_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.credentials_path = Some(path.into());
        self
    }

    pub fn token_store_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.token_store_path = Some(path.into());
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = Some(policy);
        self
    }

    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = Some(policy);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when any value fails [`SyncConfig::validate`].
    pub fn build(self) -> Result<SyncConfig> {
        let defaults = SyncConfig::default();

        let config = SyncConfig {
            application_id: self.application_id.unwrap_or(defaults.application_id),
            sink_name: self.sink_name.unwrap_or(defaults.sink_name),
            credentials_path: self.credentials_path.unwrap_or(defaults.credentials_path),
            token_store_path: self.token_store_path.unwrap_or(defaults.token_store_path),
            page_size: self.page_size.unwrap_or(defaults.page_size),
            poll_interval: self.poll_interval.unwrap_or(defaults.poll_interval),
            failure_policy: self.failure_policy.unwrap_or(defaults.failure_policy),
            duplicate_policy: self.duplicate_policy.unwrap_or(defaults.duplicate_policy),
        };

        config.validate()?;

        Ok(config)
    }
}
