//! Durable per-instrument tick storage with on-demand OHLCV bars.
//!
//! This is a facade crate that re-exports functionality from the tickdb
//! workspace crates and adds the chart series entry point.
//!
//! # Quick Start
//!
//! ```no_run
//! use tickdb_lib::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut db = Database::connect(StoreConfig::new("rofex.db"))?;
//!
//!     let tick = Record::new()
//!         .with("date", "2019-03-01 09:00:00")
//!         .with("LA_price", 100.0)
//!         .with("LA_size", 5);
//!     let outcome = db.append_single(tick, "RFX20Mar19")?;
//!     println!("{outcome}");
//!
//!     let period: Period = "1Min".parse()?;
//!     let bars = chart_series(&db, "RFX20Mar19", period, "", &ChartConfig::default());
//!     println!("{} bars", bars.len());
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickdb/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod series;

pub use config::{ChartConfig, ConfigError};
pub use series::chart_series;

// Re-export core types
pub use tickdb_types::*;

// Re-export the store
pub use tickdb_store::{
    AppendOutcome, ColumnInfo, DEFAULT_DB_NAME, DEFAULT_PRICE_FIELD, Database, StoreConfig,
    StoreError,
};

// Re-export aggregation
pub use tickdb_aggregate::{
    AggregateError, BarSet, OHLC_COLUMNS, Ohlcv, SeriesColumns, TickAggregator, Trade,
    VOLUME_COLUMN, aggregate,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use tickdb_format::{
    CsvFormatter, FormatError, FormatOptions, Formatter, JsonFormatter, JsonStyle, OutputFormat,
};

/// Prelude module for convenient imports.
///
/// ```
/// use tickdb_lib::prelude::*;
/// ```
pub mod prelude {
    pub use tickdb_types::{InstrumentKey, Period, Record, TickTable, Value, normalize};

    pub use tickdb_store::{AppendOutcome, Database, StoreConfig, StoreError};

    pub use tickdb_aggregate::{BarSet, Ohlcv, SeriesColumns, TickAggregator, aggregate};

    pub use crate::{ChartConfig, chart_series};

    #[cfg(feature = "format")]
    pub use tickdb_format::{CsvFormatter, FormatOptions, Formatter, JsonFormatter, OutputFormat};
}
