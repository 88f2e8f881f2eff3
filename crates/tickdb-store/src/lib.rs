//! SQLite-backed per-instrument tick store for tickdb.
//!
//! - [`StoreConfig`] - Store location and column conventions
//! - [`Database`] - Owns the SQLite handle; every store and catalog
//!   operation is a method on it
//! - [`AppendOutcome`] - Which path an append took
//! - [`StoreError`] - Errors surfaced by store operations
//!
//! A single writer per store is assumed. Readers may observe a table while
//! it is being replaced.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickdb/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod catalog;
mod config;
mod database;
mod error;
mod sql;
mod store;

pub use config::{DEFAULT_DB_NAME, DEFAULT_PRICE_FIELD, StoreConfig};
pub use database::Database;
pub use error::{Result, StoreError};
pub use store::{AppendOutcome, ColumnInfo};
