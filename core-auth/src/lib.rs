//! # Authentication Module
//!
//! Credential collaborator for the sync job.
//!
//! ## Overview
//!
//! The sync core only ever asks an [`AccessTokenProvider`] for a bearer token.
//! This crate supplies the desktop implementation of that contract:
//!
//! - [`ClientSecrets`] loads the OAuth client from `credentials.json`
//! - [`FileTokenStore`] reads and writes the persisted token
//! - [`OAuthRefresher`] exchanges a refresh token for a new access token
//! - [`CachedTokenProvider`] ties them together and refreshes before expiry
//!
//! The interactive consent flow that produces the first token is not part of
//! this crate; a token store must already exist.
//!
//! [`AccessTokenProvider`]: bridge_traits::auth::AccessTokenProvider

pub mod error;
pub mod oauth;
pub mod provider;
pub mod token_store;
pub mod types;

pub use error::{AuthError, Result};
pub use oauth::OAuthRefresher;
pub use provider::CachedTokenProvider;
pub use token_store::FileTokenStore;
pub use types::{ClientSecrets, StoredToken};
