//! # Logging & Tracing Infrastructure
//!
//! Provides structured logging with the `tracing` crate, supporting:
//! - JSON, pretty-print and compact output formats
//! - Module-level filtering (`RUST_LOG`-style directives)
//! - Redaction helpers for tokens and secrets
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
//! use bridge_traits::time::LogLevel;
//!
//! let config = LoggingConfig::default()
//!     .with_format(LogFormat::Compact)
//!     .with_level(LogLevel::Debug);
//!
//! init_logging(config).expect("Failed to initialize logging");
//! tracing::info!("Sync job started");
//! ```

use crate::error::{Error, Result};

use bridge_traits::time::LogLevel;
use std::io;
use tracing_subscriber::{
    filter::EnvFilter, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Crates whose events follow the configured level. Everything else that is
/// chatty (HTTP stack) is pinned to `warn`.
const WORKSPACE_TARGETS: &[&str] = &[
    "drive_sheets_sync",
    "core_runtime",
    "core_auth",
    "core_sync",
    "provider_google_drive",
    "provider_google_sheets",
    "bridge_desktop",
];

const QUIET_TARGETS: &str = "h2=warn,hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format
    Pretty,
    /// Structured JSON format for machine parsing
    Json,
    /// Single-line format for production consoles
    Compact,
}

impl Default for LogFormat {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        return Self::Pretty;

        #[cfg(not(debug_assertions))]
        return Self::Compact;
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Minimum log level for workspace crates
    pub level: LogLevel,
    /// Custom filter string (e.g., "core_sync=trace,provider_google_drive=debug")
    pub filter: Option<String>,
    /// Emit span open/close events
    pub enable_spans: bool,
    /// Display target module in logs
    pub display_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: LogLevel::Info,
            filter: None,
            enable_spans: false,
            display_target: true,
        }
    }
}

impl LoggingConfig {
    /// Set log format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set minimum log level
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set custom filter string, replacing the generated default
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Enable or disable span events
    pub fn with_spans(mut self, enable: bool) -> Self {
        self.enable_spans = enable;
        self
    }

    /// Enable or disable target display
    pub fn with_target(mut self, display: bool) -> Self {
        self.display_target = display;
        self
    }
}

/// Initialize the logging system
///
/// Call once during startup. A second call returns an error because the
/// global subscriber is already set.
///
/// # Errors
///
/// Returns [`Error::Config`] if the filter is invalid or a global subscriber
/// already exists.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = build_filter(&config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let span_events = if config.enable_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let result = match config.format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_target(config.display_target)
                    .with_span_events(span_events)
                    .with_writer(io::stdout),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(config.enable_spans)
                    .with_span_list(config.enable_spans)
                    .with_target(config.display_target)
                    .with_writer(io::stdout),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(config.display_target)
                    .with_span_events(span_events)
                    .with_writer(io::stdout),
            )
            .try_init(),
    };

    result.map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let filter_string = match &config.filter {
        Some(custom_filter) => custom_filter.clone(),
        None => default_filter(config.level),
    };

    EnvFilter::try_new(filter_string)
        .map_err(|e| Error::Config(format!("Invalid log filter: {}", e)))
}

fn default_filter(level: LogLevel) -> String {
    let base_level = level.as_filter_str();
    let mut directives: Vec<String> = vec!["warn".to_string()];
    directives.extend(
        WORKSPACE_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, base_level)),
    );
    directives.push(QUIET_TARGETS.to_string());
    directives.join(",")
}

/// Helper function to redact sensitive field values
///
/// ```ignore
/// use tracing::debug;
/// use core_runtime::logging::redact_if_sensitive;
///
/// debug!(token = %redact_if_sensitive("access_token", &token), "Loaded token");
/// ```
pub fn redact_if_sensitive(field_name: &str, value: &str) -> String {
    const SENSITIVE_FIELDS: &[&str] = &[
        "token",
        "password",
        "secret",
        "api_key",
        "authorization",
        "bearer",
    ];

    let field_lower = field_name.to_lowercase();
    if SENSITIVE_FIELDS.iter().any(|&f| field_lower.contains(f)) {
        "[REDACTED]".to_string()
    } else {
        value.to_string()
    }
}
