//! # Sync Module
//!
//! Mirrors the metadata of every non-trashed remote file into a spreadsheet.
//!
//! ## Overview
//!
//! Each cycle performs three steps, strictly in order:
//! - List all items via `StorageProvider`, following page tokens to the end
//! - Find the sink spreadsheet by name, creating it when absent
//! - Overwrite the sheet from A1 with `[name, creation date]` rows and auto-fit
//!   the first column
//!
//! No state survives between cycles.
//!
//! ## Components
//!
//! - **Remote Lister** (`lister`): Paginated listing of non-trashed items
//! - **Sink Resolver** (`resolver`): Get-or-create of the target spreadsheet
//! - **Sink Writer** (`writer`): Row projection, range overwrite, column auto-fit
//! - **Sync Cycle** (`cycle`): Composes the three steps and reports the outcome
//! - **Scheduler** (`scheduler`): Fixed-delay loop with cancellation and a
//!   configurable failure policy

pub mod cycle;
pub mod error;
pub mod lister;
pub mod resolver;
pub mod scheduler;
pub mod writer;

pub use cycle::{CycleReport, CycleRunner, SyncCycle};
pub use error::{Result, SyncError};
pub use lister::{RemoteLister, NOT_TRASHED_QUERY};
pub use resolver::SinkResolver;
pub use scheduler::SyncScheduler;
pub use writer::{to_row, SinkWriter, DATE_FORMAT};
