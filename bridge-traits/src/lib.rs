//! # Host Bridge Traits
//!
//! Collaborator contracts consumed by the sync core.
//!
//! ## Overview
//!
//! The sync core never talks to a network socket, a token file or a provider
//! SDK directly. Everything it needs from the outside world is expressed as a
//! trait in this crate and injected at construction time as an opaque,
//! pre-authenticated client.
//!
//! ## Traits
//!
//! ### Transport
//! - [`HttpClient`](http::HttpClient) - Async HTTP operations
//! - [`AccessTokenProvider`](auth::AccessTokenProvider) - Bearer tokens for provider calls
//!
//! ### Providers
//! - [`StorageProvider`](storage::StorageProvider) - Paginated file listing and
//!   name lookup on the remote storage provider
//! - [`SpreadsheetService`](sheets::SpreadsheetService) - Create, write and format
//!   the tabular sink
//!
//! ### Utilities
//! - [`Clock`](time::Clock) - Time source for deterministic testing
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type. Provider
//! implementations convert their own errors into it so the core can classify
//! authentication and transport failures without knowing the provider.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds so implementations can be
//! shared behind `Arc` across async tasks.

pub mod auth;
pub mod error;
pub mod http;
pub mod sheets;
pub mod storage;
pub mod time;

pub use error::BridgeError;

// Re-export commonly used types
pub use auth::{AccessTokenProvider, StaticTokenProvider};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use sheets::{CellAnchor, Row, SpreadsheetService, ValueInputMode};
pub use storage::{FilePage, RemoteItem, StorageProvider, TargetResource};
pub use time::{Clock, LogLevel, SystemClock};
