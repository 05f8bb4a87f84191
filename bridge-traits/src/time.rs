//! Time Abstractions
//!
//! Provides an injectable time source for deterministic testing, and the log
//! level vocabulary shared by the runtime's logging configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Time source trait
///
/// Abstracts system time so cycle reports can be produced deterministically
/// in tests.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::time::Clock;
///
/// fn log_timestamp(clock: &dyn Clock) {
///     let now = clock.now();
///     println!("Current time: {}", now);
/// }
/// ```
pub trait Clock: Send + Sync {
    /// Get current UTC time
    fn now(&self) -> DateTime<Utc>;
}

/// System clock implementation using actual system time
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
