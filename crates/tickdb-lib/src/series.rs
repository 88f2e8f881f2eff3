//! Chart series for presentation layers.

use tickdb_aggregate::{BarSet, aggregate};
use tickdb_store::Database;
use tickdb_types::Period;
use tracing::{debug, warn};

use crate::ChartConfig;

/// Returns the bars charting `instrument` after `start_date`.
///
/// Reads the instrument's ticks with [`Database::read_range`], drops columns
/// that hold only nulls, and aggregates them with the instrument's columns
/// from `config`.
///
/// This never fails: a store or aggregation error is logged and yields an
/// empty bar set with a volume column, so a chart shows no data instead of
/// breaking.
#[must_use]
pub fn chart_series(
    db: &Database,
    instrument: &str,
    period: Period,
    start_date: &str,
    config: &ChartConfig,
) -> BarSet {
    let mut ticks = match db.read_range(instrument, start_date) {
        Ok(ticks) => ticks,
        Err(e) => {
            warn!(instrument, start_date, error = %e, "Failed to read ticks for chart");
            return BarSet::empty(true);
        }
    };

    let dropped = ticks.drop_null_columns();
    if !dropped.is_empty() {
        debug!(instrument, ?dropped, "Dropped all-null columns");
    }

    match aggregate(&ticks, config.columns_for(instrument), period) {
        Ok(bars) => bars,
        Err(e) => {
            warn!(instrument, %period, error = %e, "Failed to aggregate ticks for chart");
            BarSet::empty(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{NaiveDate, NaiveDateTime};
    use tickdb_aggregate::SeriesColumns;
    use tickdb_store::StoreConfig;
    use tickdb_types::{Record, Value};

    fn at(day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 3, day)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    fn tick(time: NaiveDateTime, price: f64, size: i64) -> Record {
        Record::new()
            .with("date", time)
            .with("LA_price", price)
            .with("LA_size", size)
    }

    fn store() -> Database {
        let mut db = Database::open_in_memory(StoreConfig::new(":memory:")).unwrap();
        db.write_full(
            vec![
                tick(at(1, 9, 0, 0), 100.0, 5),
                tick(at(1, 9, 0, 30), 102.0, 3),
                tick(at(1, 9, 1, 10), 101.0, 2),
                tick(at(2, 10, 0, 0), 105.0, 1),
                tick(at(2, 10, 0, 15), 104.0, 1),
            ],
            "RFX20Mar19",
        )
        .unwrap();
        db
    }

    #[test]
    fn test_chart_series() {
        let db = store();
        let bars = chart_series(&db, "RFX20Mar19", Period::MINUTE, "", &ChartConfig::default());

        assert_eq!(bars.len(), 3);
        assert!(bars.has_volume());
        assert_relative_eq!(bars.bars()[0].volume, 8.0);
    }

    #[test]
    fn test_chart_series_from_start_date() {
        let db = store();
        let bars = chart_series(
            &db,
            "rfx20mar19",
            Period::MINUTE,
            "2019-03-02",
            &ChartConfig::default(),
        );

        assert_eq!(bars.len(), 1);
        assert_eq!(bars.bars()[0].timestamp, at(2, 10, 0, 0));
        assert_relative_eq!(bars.bars()[0].open, 105.0);
        assert_relative_eq!(bars.bars()[0].close, 104.0);
    }

    #[test]
    fn test_instrument_override() {
        let mut db = Database::open_in_memory(StoreConfig::new(":memory:")).unwrap();
        db.write_full(
            vec![
                Record::new().with("date", at(1, 9, 0, 0)).with("IV", 0.30),
                Record::new().with("date", at(1, 9, 0, 5)).with("IV", 0.32),
            ],
            "I.RFX20",
        )
        .unwrap();

        let config =
            ChartConfig::default().with_instrument("I.RFX20", SeriesColumns::default().with_price("IV"));
        let bars = chart_series(&db, "IRFX20", Period::MINUTE, "", &config);

        assert_eq!(bars.len(), 1);
        assert!(!bars.has_volume());
        assert_relative_eq!(bars.bars()[0].high, 0.32);

        // Without the override the price column is missing.
        let bars = chart_series(&db, "IRFX20", Period::MINUTE, "", &ChartConfig::default());
        assert!(bars.is_empty());
        assert!(bars.has_volume());
    }

    #[test]
    fn test_bid_side_columns() {
        let mut db = Database::open_in_memory(StoreConfig::new(":memory:")).unwrap();
        db.write_full(
            vec![
                Record::new()
                    .with("date", at(1, 9, 0, 0))
                    .with("BI_price", 99.5)
                    .with("BI_size", 4),
                Record::new()
                    .with("date", at(1, 9, 0, 20))
                    .with("BI_price", 99.0)
                    .with("BI_size", 6),
            ],
            "DLRMar19",
        )
        .unwrap();

        let bid = SeriesColumns::default().with_price("BI_price").with_size("BI_size");
        let config = ChartConfig::default().with_instrument("DLRMar19", bid);
        let bars = chart_series(&db, "DLRMar19", Period::MINUTE, "", &config);

        assert_eq!(bars.len(), 1);
        assert!(bars.has_volume());
        assert_relative_eq!(bars.bars()[0].low, 99.0);
        assert_relative_eq!(bars.bars()[0].volume, 10.0);
    }

    #[test]
    fn test_all_null_size_column_dropped() {
        let mut db = Database::open_in_memory(StoreConfig::new(":memory:")).unwrap();
        db.write_full(
            vec![
                Record::new()
                    .with("date", at(1, 9, 0, 0))
                    .with("LA_price", 100.0)
                    .with("LA_size", Value::Null),
                Record::new()
                    .with("date", at(1, 9, 0, 5))
                    .with("LA_price", 101.0)
                    .with("LA_size", Value::Null),
            ],
            "DOMAR19",
        )
        .unwrap();

        let bars = chart_series(&db, "DOMAR19", Period::MINUTE, "", &ChartConfig::default());
        assert_eq!(bars.len(), 1);
        assert!(!bars.has_volume());
    }

    #[test]
    fn test_absent_instrument_is_empty() {
        let db = store();
        let bars = chart_series(&db, "NOPE", Period::MINUTE, "", &ChartConfig::default());
        assert!(bars.is_empty());
    }

    #[test]
    fn test_failures_degrade_to_empty() {
        let mut db = store();
        let bars = chart_series(
            &db,
            "RFX20Mar19",
            Period::MINUTE,
            "03/02/2019",
            &ChartConfig::default(),
        );
        assert!(bars.is_empty());
        assert!(bars.has_volume());

        db.write_full(
            vec![
                Record::new().with("date", "garbage").with("LA_price", 1.0),
                Record::new().with("date", "rubbish").with("LA_price", 2.0),
            ],
            "BAD",
        )
        .unwrap();
        let bars = chart_series(&db, "BAD", Period::MINUTE, "", &ChartConfig::default());
        assert!(bars.is_empty());
    }

    #[test]
    fn test_single_tick_is_empty() {
        let mut db = Database::open_in_memory(StoreConfig::new(":memory:")).unwrap();
        db.write_full(tick(at(1, 9, 0, 0), 100.0, 5), "RFX20").unwrap();

        let bars = chart_series(&db, "RFX20", Period::MINUTE, "", &ChartConfig::default());
        assert!(bars.is_empty());
    }
}
