//! # Google Sheets Provider
//!
//! Implements `SpreadsheetService` for Google Sheets API v4.
//!
//! ## Overview
//!
//! This crate provides:
//! - Spreadsheet creation (`spreadsheets.create`)
//! - Range overwrite in `RAW` or `USER_ENTERED` mode (`spreadsheets.values.update`)
//! - Column auto-fit (`spreadsheets.batchUpdate` with `autoResizeDimensions`)
//!
//! Like the Drive provider, every call is a single request with no retry.

pub mod connector;
pub mod error;
pub mod types;

pub use connector::GoogleSheetsConnector;
pub use error::{GoogleSheetsError, Result};
