//! OHLCV (candlestick) data structure.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// OHLCV bar (candlestick) data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ohlcv {
    /// Bar open time (start of the period).
    pub timestamp: NaiveDateTime,
    /// First price in the period.
    pub open: f64,
    /// Highest price during the period.
    pub high: f64,
    /// Lowest price during the period.
    pub low: f64,
    /// Last price in the period.
    pub close: f64,
    /// Sum of tick sizes in the period.
    pub volume: f64,
    /// Number of ticks in the bar.
    pub tick_count: u32,
}

impl Ohlcv {
    /// Creates a new OHLCV bar.
    #[must_use]
    pub const fn new(
        timestamp: NaiveDateTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        tick_count: u32,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            tick_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_new_orders_fields() {
        let timestamp = NaiveDate::from_ymd_opt(2019, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let bar = Ohlcv::new(timestamp, 100.0, 102.5, 99.0, 101.0, 8.0, 3);

        assert_eq!(bar.timestamp, timestamp);
        assert_eq!((bar.open, bar.high, bar.low, bar.close), (100.0, 102.5, 99.0, 101.0));
        assert_eq!(bar.volume, 8.0);
        assert_eq!(bar.tick_count, 3);
    }
}
