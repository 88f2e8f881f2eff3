//! Error types for tickdb tables.

use thiserror::Error;

/// Errors raised while building a [`TickTable`](crate::TickTable).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A row does not have one value per column.
    #[error("Row has {actual} values but the table has {expected} columns")]
    RowWidth {
        /// Number of columns in the table.
        expected: usize,
        /// Number of values in the offending row.
        actual: usize,
    },

    /// The same column name appears twice.
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),
}
