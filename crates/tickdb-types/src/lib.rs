//! Core types for the tickdb tick store.
//!
//! This crate provides the fundamental data structures used throughout tickdb:
//!
//! - [`Value`] - A tagged scalar cell (null, integer, real, text, timestamp)
//! - [`Record`] - One tick observation as an ordered column-to-value mapping
//! - [`TickTable`] - Rows sharing one column set, optionally indexed by time
//! - [`InstrumentKey`] - Storage-safe key derived from an instrument label
//! - [`Period`] - OHLCV aggregation bucket length

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickdb/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod instrument;
mod period;
mod record;
mod table;
mod value;

pub use error::TableError;
pub use instrument::{InstrumentKey, normalize};
pub use period::{Period, PeriodParseError};
pub use record::Record;
pub use table::{DATE_COLUMN, TickTable};
pub use value::{TIMESTAMP_FORMAT, Value};
