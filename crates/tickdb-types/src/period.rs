//! OHLCV aggregation period definitions.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Length of one OHLCV bucket, a positive whole number of seconds.
///
/// Buckets are aligned to the Unix epoch, so a one-minute period always
/// starts bars on the minute and a one-day period at midnight UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    seconds: u32,
}

impl Period {
    /// 1-second bars.
    pub const SECOND: Self = Self { seconds: 1 };
    /// 1-minute bars.
    pub const MINUTE: Self = Self { seconds: 60 };
    /// 5-minute bars.
    pub const MINUTE5: Self = Self { seconds: 300 };
    /// 15-minute bars.
    pub const MINUTE15: Self = Self { seconds: 900 };
    /// 1-hour bars.
    pub const HOUR: Self = Self { seconds: 3600 };
    /// Daily bars.
    pub const DAY: Self = Self { seconds: 86400 };

    /// Creates a period from a number of seconds, or None for zero.
    #[must_use]
    pub const fn from_seconds(seconds: u32) -> Option<Self> {
        if seconds == 0 {
            None
        } else {
            Some(Self { seconds })
        }
    }

    /// Returns the duration in seconds.
    #[must_use]
    pub const fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Returns the duration in milliseconds.
    #[must_use]
    pub const fn milliseconds(&self) -> i64 {
        self.seconds as i64 * 1000
    }

    /// Returns the start of the bucket containing `ts`.
    #[must_use]
    pub fn bucket_start(&self, ts: NaiveDateTime) -> NaiveDateTime {
        let millis = ts.and_utc().timestamp_millis();
        let offset = millis.rem_euclid(self.milliseconds());
        ts - TimeDelta::milliseconds(offset)
    }
}

impl Default for Period {
    fn default() -> Self {
        Self::MINUTE
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self.seconds;
        if s % 86400 == 0 {
            write!(f, "{}d", s / 86400)
        } else if s % 3600 == 0 {
            write!(f, "{}h", s / 3600)
        } else if s % 60 == 0 {
            write!(f, "{}m", s / 60)
        } else {
            write!(f, "{s}s")
        }
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    /// Accepts `<count><unit>` (`1Min`, `5min`, `1T`, `30S`, `4h`, `1D`) or
    /// `<unit><count>` (`m1`, `h4`, `d1`). The count defaults to one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || PeriodParseError(s.to_string());
        let lower = s.trim().to_lowercase();

        let leading = lower.len() - lower.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        let (count, unit) = if leading > 0 {
            lower.split_at(leading)
        } else {
            let trailing =
                lower.len() - lower.trim_end_matches(|c: char| c.is_ascii_digit()).len();
            let (unit, count) = lower.split_at(lower.len() - trailing);
            (count, unit)
        };

        let count: u32 = if count.is_empty() {
            1
        } else {
            count.parse().map_err(|_| err())?
        };
        let unit_seconds = match unit {
            "s" | "sec" | "second" | "seconds" => 1,
            "t" | "m" | "min" | "minute" | "minutes" => 60,
            "h" | "hour" | "hours" => 3600,
            "d" | "day" | "days" | "daily" => 86400,
            _ => return Err(err()),
        };

        count
            .checked_mul(unit_seconds)
            .and_then(Self::from_seconds)
            .ok_or_else(err)
    }
}

impl TryFrom<String> for Period {
    type Error = PeriodParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}

/// Error returned when parsing an invalid period string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodParseError(String);

impl std::fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid period '{}', expected e.g. 30s, 1min, 1T, 5m, 1h, 1d or m1, h4, d1",
            self.0
        )
    }
}

impl std::error::Error for PeriodParseError {}
