//! Whole-table aggregation.

use tickdb_types::{Period, TickTable};
use tracing::debug;

use crate::{AggregateError, BarSet, SeriesColumns, TickAggregator, Trade};

/// Aggregates a tick table into bars of `period`.
///
/// The time column is `columns.time` when the table has it, otherwise the
/// table's index. Rows sharing a time value are reduced to the first one;
/// if a single row remains the result is empty. Rows with a null time are
/// ignored. Ticks are ordered by time before bucketing, so the input need
/// not be sorted.
///
/// A missing time or price column is not an error: the result is an empty
/// bar set. The result carries a volume column only when the table has the
/// size column, except that a missing price column always reports one.
///
/// # Errors
///
/// Returns [`AggregateError::UnparseableTimestamp`] if a time value cannot
/// be read as a timestamp.
pub fn aggregate(
    ticks: &TickTable,
    columns: &SeriesColumns,
    period: Period,
) -> Result<BarSet, AggregateError> {
    let with_volume = ticks.has_column(&columns.size);

    let Some(time_column) = time_column(ticks, &columns.time) else {
        debug!(column = %columns.time, "No time column, no bars");
        return Ok(BarSet::empty(with_volume));
    };

    let mut ticks = ticks.clone();
    let dropped = ticks.dedup_by(&time_column);
    if dropped > 0 {
        debug!(dropped, "Dropped ticks with repeated time");
    }
    if ticks.len() == 1 {
        return Ok(BarSet::empty(with_volume));
    }

    let Some(time_pos) = ticks.column_position(&time_column) else {
        return Ok(BarSet::empty(with_volume));
    };
    let price_pos = ticks.column_position(&columns.price);
    let size_pos = ticks.column_position(&columns.size);

    let mut trades = Vec::with_capacity(ticks.len());
    for (row, values) in ticks.rows().iter().enumerate() {
        let raw = &values[time_pos];
        if raw.is_null() {
            continue;
        }
        let timestamp = raw
            .to_timestamp()
            .ok_or_else(|| AggregateError::UnparseableTimestamp {
                row,
                value: raw.to_string(),
            })?;
        trades.push(Trade {
            timestamp,
            price: price_pos.and_then(|pos| values[pos].as_f64()),
            size: size_pos.and_then(|pos| values[pos].as_f64()).unwrap_or(0.0),
        });
    }

    if price_pos.is_none() {
        debug!(column = %columns.price, "No price column, no bars");
        return Ok(BarSet::empty(true));
    }

    trades.sort_by_key(|trade| trade.timestamp);

    let mut aggregator = TickAggregator::new(period);
    let mut bars: Vec<_> = trades
        .into_iter()
        .filter_map(|trade| aggregator.process(trade))
        .collect();
    bars.extend(aggregator.finish());

    Ok(BarSet::new(bars, with_volume))
}

/// Picks the configured time column, falling back to the table index.
fn time_column(ticks: &TickTable, configured: &str) -> Option<String> {
    if ticks.has_column(configured) {
        return Some(configured.to_string());
    }
    ticks.index().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{NaiveDate, NaiveDateTime};
    use tickdb_types::{Record, Value};

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 3, 1)
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

    fn sample() -> TickTable {
        TickTable::from(vec![
            tick(at(9, 0, 0), 100.0, 5),
            tick(at(9, 0, 30), 102.0, 3),
            tick(at(9, 1, 10), 101.0, 2),
        ])
    }

    #[test]
    fn test_one_minute_bars() {
        let bars = aggregate(&sample(), &SeriesColumns::default(), Period::MINUTE).unwrap();

        assert!(bars.has_volume());
        assert_eq!(bars.len(), 2);

        let first = bars.bars()[0];
        assert_eq!(first.timestamp, at(9, 0, 0));
        assert_relative_eq!(first.open, 100.0);
        assert_relative_eq!(first.high, 102.0);
        assert_relative_eq!(first.low, 100.0);
        assert_relative_eq!(first.close, 102.0);
        assert_relative_eq!(first.volume, 8.0);

        let second = bars.bars()[1];
        assert_eq!(second.timestamp, at(9, 1, 0));
        assert_relative_eq!(second.open, 101.0);
        assert_relative_eq!(second.close, 101.0);
        assert_relative_eq!(second.volume, 2.0);
    }

    #[test]
    fn test_bare_clock_times() {
        let ticks = TickTable::from(vec![
            Record::new().with("date", "09:00:00").with("LA_price", 100.0).with("LA_size", 5),
            Record::new().with("date", "09:00:30").with("LA_price", 102.0).with("LA_size", 3),
            Record::new().with("date", "09:01:10").with("LA_price", 101.0).with("LA_size", 2),
        ]);

        let bars = aggregate(&ticks, &SeriesColumns::default(), Period::MINUTE).unwrap();
        assert!(bars.has_volume());
        assert_eq!(bars.len(), 2);

        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let first = bars.bars()[0];
        assert_eq!(first.timestamp, epoch.and_hms_opt(9, 0, 0).unwrap());
        assert_relative_eq!(first.open, 100.0);
        assert_relative_eq!(first.high, 102.0);
        assert_relative_eq!(first.low, 100.0);
        assert_relative_eq!(first.close, 102.0);
        assert_relative_eq!(first.volume, 8.0);

        let second = bars.bars()[1];
        assert_eq!(second.timestamp, epoch.and_hms_opt(9, 1, 0).unwrap());
        assert_relative_eq!(second.open, 101.0);
        assert_relative_eq!(second.high, 101.0);
        assert_relative_eq!(second.low, 101.0);
        assert_relative_eq!(second.close, 101.0);
        assert_relative_eq!(second.volume, 2.0);
    }

    #[test]
    fn test_duplicate_time_keeps_first() {
        let mut ticks = sample();
        ticks.push_record(tick(at(9, 0, 30), 999.0, 100));

        let bars = aggregate(&ticks, &SeriesColumns::default(), Period::MINUTE).unwrap();
        let first = bars.bars()[0];
        assert_relative_eq!(first.high, 102.0);
        assert_relative_eq!(first.volume, 8.0);
    }

    #[test]
    fn test_single_tick_after_dedup_is_empty() {
        let ticks = TickTable::from(vec![
            tick(at(9, 0, 0), 100.0, 5),
            tick(at(9, 0, 0), 101.0, 1),
        ]);

        let bars = aggregate(&ticks, &SeriesColumns::default(), Period::MINUTE).unwrap();
        assert!(bars.is_empty());
        assert!(bars.has_volume());
    }

    #[test]
    fn test_missing_price_is_empty_with_volume() {
        let ticks = TickTable::from(vec![
            Record::new().with("date", at(9, 0, 0)).with("IV", 0.3),
            Record::new().with("date", at(9, 0, 5)).with("IV", 0.31),
        ]);

        let bars = aggregate(&ticks, &SeriesColumns::default(), Period::MINUTE).unwrap();
        assert!(bars.is_empty());
        assert_eq!(bars.columns(), ["open", "high", "low", "close", "volume"]);
    }

    #[test]
    fn test_missing_size_has_no_volume() {
        let ticks = TickTable::from(vec![
            Record::new().with("date", at(9, 0, 0)).with("IV", 0.30),
            Record::new().with("date", at(9, 0, 5)).with("IV", 0.32),
        ]);
        let columns = SeriesColumns::default().with_price("IV");

        let bars = aggregate(&ticks, &columns, Period::MINUTE).unwrap();
        assert_eq!(bars.len(), 1);
        assert!(!bars.has_volume());
        assert_eq!(bars.columns(), ["open", "high", "low", "close"]);
        assert_relative_eq!(bars.bars()[0].close, 0.32);
    }

    #[test]
    fn test_sparse_output() {
        let ticks = TickTable::from(vec![
            tick(at(9, 0, 0), 100.0, 1),
            tick(at(9, 5, 0), 101.0, 1),
        ]);

        let bars = aggregate(&ticks, &SeriesColumns::default(), Period::MINUTE).unwrap();
        let times: Vec<_> = bars.iter().map(|bar| bar.timestamp).collect();
        assert_eq!(times, [at(9, 0, 0), at(9, 5, 0)]);
    }

    #[test]
    fn test_unsorted_input_is_ordered() {
        let ticks = TickTable::from(vec![
            tick(at(9, 0, 30), 102.0, 3),
            tick(at(9, 0, 0), 100.0, 5),
        ]);

        let bars = aggregate(&ticks, &SeriesColumns::default(), Period::MINUTE).unwrap();
        assert_relative_eq!(bars.bars()[0].open, 100.0);
        assert_relative_eq!(bars.bars()[0].close, 102.0);
    }

    #[test]
    fn test_null_prices_skipped() {
        let ticks = TickTable::from(vec![
            tick(at(9, 0, 0), 100.0, 5),
            Record::new()
                .with("date", at(9, 0, 10))
                .with("LA_price", Value::Null)
                .with("LA_size", 1),
            tick(at(9, 0, 20), 99.0, 1),
        ]);

        let bars = aggregate(&ticks, &SeriesColumns::default(), Period::MINUTE).unwrap();
        let bar = bars.bars()[0];
        assert_relative_eq!(bar.low, 99.0);
        assert_relative_eq!(bar.volume, 7.0);
    }

    #[test]
    fn test_text_times_are_parsed() {
        let ticks = TickTable::from(vec![
            Record::new()
                .with("LA_date", "2019-03-01 09:00:00")
                .with("LA_price", 100.0),
            Record::new()
                .with("LA_date", "2019-03-01T09:00:45")
                .with("LA_price", 101.0),
        ]);
        let columns = SeriesColumns::default().with_time("LA_date");

        let bars = aggregate(&ticks, &columns, Period::MINUTE).unwrap();
        assert_eq!(bars.len(), 1);
        assert_relative_eq!(bars.bars()[0].close, 101.0);
    }

    #[test]
    fn test_index_used_when_time_column_absent() {
        let columns = SeriesColumns::default().with_time("LA_date");
        let bars = aggregate(&sample(), &columns, Period::MINUTE).unwrap();
        assert_eq!(bars.len(), 2);
    }

    #[test]
    fn test_no_time_column_is_empty() {
        let ticks = TickTable::from(vec![
            Record::new().with("LA_price", 1.0),
            Record::new().with("LA_price", 2.0),
        ]);
        let bars = aggregate(&ticks, &SeriesColumns::default(), Period::MINUTE).unwrap();
        assert!(bars.is_empty());
    }

    #[test]
    fn test_unparseable_time() {
        let ticks = TickTable::from(vec![
            tick(at(9, 0, 0), 100.0, 5),
            Record::new()
                .with("date", "not a time")
                .with("LA_price", 101.0)
                .with("LA_size", 1),
        ]);

        let err = aggregate(&ticks, &SeriesColumns::default(), Period::MINUTE).unwrap_err();
        assert_eq!(
            err,
            AggregateError::UnparseableTimestamp {
                row: 1,
                value: "not a time".to_string(),
            }
        );
    }

    #[test]
    fn test_aggregation_is_deterministic() {
        let ticks = sample();
        let columns = SeriesColumns::default();
        assert_eq!(
            aggregate(&ticks, &columns, Period::MINUTE).unwrap(),
            aggregate(&ticks, &columns, Period::MINUTE).unwrap()
        );
    }

    #[test]
    fn test_hourly_bucket_alignment() {
        let bars = aggregate(&sample(), &SeriesColumns::default(), Period::HOUR).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars.bars()[0].timestamp, at(9, 0, 0));
        assert_relative_eq!(bars.bars()[0].volume, 10.0);
    }
}
