//! Bar sets and the columns they are derived from.

use serde::{Deserialize, Serialize};
use tickdb_types::{DATE_COLUMN, TickTable, Value};

use crate::Ohlcv;

/// Price columns of every bar set, in output order.
pub const OHLC_COLUMNS: [&str; 4] = ["open", "high", "low", "close"];

/// Name of the optional volume column.
pub const VOLUME_COLUMN: &str = "volume";

/// Tick columns read when building bars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesColumns {
    /// Column holding the traded price.
    pub price: String,
    /// Column holding the traded size.
    pub size: String,
    /// Column holding the tick time.
    pub time: String,
}

impl SeriesColumns {
    /// Returns the columns with a different price column.
    #[must_use]
    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = price.into();
        self
    }

    /// Returns the columns with a different size column.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    /// Returns the columns with a different time column.
    #[must_use]
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }
}

impl Default for SeriesColumns {
    fn default() -> Self {
        Self {
            price: "LA_price".to_string(),
            size: "LA_size".to_string(),
            time: DATE_COLUMN.to_string(),
        }
    }
}

/// Bars derived from one tick range, in chronological order.
///
/// Gaps between bars are expected: periods without priced ticks have no bar.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarSet {
    bars: Vec<Ohlcv>,
    volume: bool,
}

impl BarSet {
    /// Creates a bar set.
    #[must_use]
    pub const fn new(bars: Vec<Ohlcv>, volume: bool) -> Self {
        Self { bars, volume }
    }

    /// Creates a bar set with no bars.
    #[must_use]
    pub const fn empty(volume: bool) -> Self {
        Self::new(Vec::new(), volume)
    }

    /// Returns the bars.
    #[must_use]
    pub fn bars(&self) -> &[Ohlcv] {
        &self.bars
    }

    /// Returns true if the set carries a volume column.
    #[must_use]
    pub const fn has_volume(&self) -> bool {
        self.volume
    }

    /// Returns the number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Returns true if there are no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Returns an iterator over the bars.
    pub fn iter(&self) -> std::slice::Iter<'_, Ohlcv> {
        self.bars.iter()
    }

    /// Returns the value columns, excluding the bar time.
    #[must_use]
    pub fn columns(&self) -> Vec<&'static str> {
        let mut columns = OHLC_COLUMNS.to_vec();
        if self.volume {
            columns.push(VOLUME_COLUMN);
        }
        columns
    }

    /// Converts the bars to a table indexed by `date`.
    #[must_use]
    pub fn to_table(&self) -> TickTable {
        let columns = std::iter::once(DATE_COLUMN)
            .chain(self.columns())
            .map(String::from)
            .collect();
        let rows = self
            .bars
            .iter()
            .map(|bar| {
                let mut row = vec![
                    Value::Timestamp(bar.timestamp),
                    Value::Real(bar.open),
                    Value::Real(bar.high),
                    Value::Real(bar.low),
                    Value::Real(bar.close),
                ];
                if self.volume {
                    row.push(Value::Real(bar.volume));
                }
                row
            })
            .collect();

        let mut table = TickTable::from_rows(columns, rows).unwrap_or_default();
        table.set_index(DATE_COLUMN);
        table
    }
}

impl<'a> IntoIterator for &'a BarSet {
    type Item = &'a Ohlcv;
    type IntoIter = std::slice::Iter<'a, Ohlcv>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}
