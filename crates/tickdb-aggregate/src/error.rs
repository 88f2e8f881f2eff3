//! Error types for aggregation.

use thiserror::Error;

/// Errors that can occur while aggregating ticks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// A time value could not be read as a timestamp.
    #[error("Cannot parse time value '{value}' in row {row}")]
    UnparseableTimestamp {
        /// Row position after deduplication.
        row: usize,
        /// The offending value as text.
        value: String,
    },
}
