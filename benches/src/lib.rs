//! Synthetic tick data for tickdb benchmarks.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use tickdb_lib::{Record, TickTable};

/// Milliseconds between consecutive synthetic ticks.
pub const TICK_SPACING_MS: i64 = 250;

/// Returns the time of the first synthetic tick.
pub fn session_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2019, 3, 1)
        .and_then(|date| date.and_hms_opt(10, 0, 0))
        .unwrap_or_default()
}

/// Builds `count` ticks with `date`, `LA_price` and `LA_size` columns.
///
/// Prices wander deterministically around 100 so repeated runs aggregate
/// identical data.
pub fn synthetic_ticks(count: usize) -> Vec<Record> {
    let start = session_start();
    (0..count)
        .map(|i| {
            let step = i64::try_from(i).unwrap_or(i64::MAX);
            let wobble = (step.wrapping_mul(7919) % 200) as f64 * 0.01;
            Record::new()
                .with("date", start + TimeDelta::milliseconds(step * TICK_SPACING_MS))
                .with("LA_price", 99.0 + wobble)
                .with("LA_size", step % 10 + 1)
        })
        .collect()
}

/// Builds a table of `count` synthetic ticks indexed by `date`.
pub fn synthetic_table(count: usize) -> TickTable {
    TickTable::from(synthetic_ticks(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_table() {
        let table = synthetic_table(10);
        assert_eq!(table.len(), 10);
        assert_eq!(table.columns(), ["date", "LA_price", "LA_size"]);
    }

    #[test]
    fn test_ticks_are_deterministic() {
        assert_eq!(synthetic_ticks(100), synthetic_ticks(100));
    }
}
