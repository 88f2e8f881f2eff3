//! Tick-to-OHLCV aggregation for tickdb.
//!
//! - [`aggregate`] - Builds bars from a whole tick table
//! - [`TickAggregator`] - Streaming aggregator over [`Trade`]s
//! - [`Ohlcv`] - OHLCV bar data structure
//! - [`BarSet`] - Bars plus their column layout
//! - [`SeriesColumns`] - Which tick columns feed the bars

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickdb/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod bars;
mod error;
mod ohlcv;
mod resample;

pub use aggregator::{TickAggregator, Trade};
pub use bars::{BarSet, OHLC_COLUMNS, SeriesColumns, VOLUME_COLUMN};
pub use error::AggregateError;
pub use ohlcv::Ohlcv;
pub use resample::aggregate;
