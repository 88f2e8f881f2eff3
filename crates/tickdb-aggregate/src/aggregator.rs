//! Streaming tick-to-OHLCV aggregation.

use chrono::NaiveDateTime;
use tickdb_types::Period;

use crate::Ohlcv;

/// One trade observation fed to a [`TickAggregator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trade {
    /// Time of the trade.
    pub timestamp: NaiveDateTime,
    /// Traded price; `None` when the tick carries no price.
    pub price: Option<f64>,
    /// Traded size, zero when unknown.
    pub size: f64,
}

impl Trade {
    /// Creates a priced trade.
    #[must_use]
    pub const fn new(timestamp: NaiveDateTime, price: f64, size: f64) -> Self {
        Self {
            timestamp,
            price: Some(price),
            size,
        }
    }
}

/// Streaming tick aggregator.
///
/// Folds chronologically ordered trades into OHLCV bars of one period.
/// Buckets are aligned to the Unix epoch. A bucket whose trades carry no
/// price never produces a bar.
#[derive(Debug)]
pub struct TickAggregator {
    period: Period,
    current_bar: Option<OhlcvBuilder>,
}

impl TickAggregator {
    /// Creates a new aggregator for the given period.
    #[must_use]
    pub const fn new(period: Period) -> Self {
        Self {
            period,
            current_bar: None,
        }
    }

    /// Processes a trade, potentially emitting a completed bar.
    ///
    /// Returns `Some(bar)` when this trade starts a new bucket and the
    /// previous bucket had at least one priced trade.
    pub fn process(&mut self, trade: Trade) -> Option<Ohlcv> {
        let bar_start = self.period.bucket_start(trade.timestamp);

        match self.current_bar.take() {
            Some(mut builder) if builder.timestamp == bar_start => {
                builder.update(&trade);
                self.current_bar = Some(builder);
                None
            }
            Some(builder) => {
                self.current_bar = Some(OhlcvBuilder::new(bar_start, &trade));
                builder.finish()
            }
            None => {
                self.current_bar = Some(OhlcvBuilder::new(bar_start, &trade));
                None
            }
        }
    }

    /// Finishes aggregation, returning any remaining partial bar.
    #[must_use]
    pub fn finish(self) -> Option<Ohlcv> {
        self.current_bar.and_then(OhlcvBuilder::finish)
    }
}

/// Open, high, low and close of the priced trades seen so far.
#[derive(Debug, Clone, Copy)]
struct Prices {
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

/// Builder for OHLCV bars.
#[derive(Debug)]
struct OhlcvBuilder {
    timestamp: NaiveDateTime,
    prices: Option<Prices>,
    volume: f64,
    tick_count: u32,
}

impl OhlcvBuilder {
    /// Creates a new builder from the first trade of a bucket.
    fn new(timestamp: NaiveDateTime, trade: &Trade) -> Self {
        let mut builder = Self {
            timestamp,
            prices: None,
            volume: 0.0,
            tick_count: 0,
        };
        builder.update(trade);
        builder
    }

    /// Updates the builder with a new trade.
    fn update(&mut self, trade: &Trade) {
        if let Some(price) = trade.price {
            self.prices = Some(match self.prices {
                Some(p) => Prices {
                    high: p.high.max(price),
                    low: p.low.min(price),
                    close: price,
                    ..p
                },
                None => Prices {
                    open: price,
                    high: price,
                    low: price,
                    close: price,
                },
            });
        }
        self.volume += trade.size;
        self.tick_count += 1;
    }

    /// Finishes building, or `None` if no trade carried a price.
    fn finish(self) -> Option<Ohlcv> {
        let p = self.prices?;
        Some(Ohlcv::new(
            self.timestamp,
            p.open,
            p.high,
            p.low,
            p.close,
            self.volume,
            self.tick_count,
        ))
    }
}
