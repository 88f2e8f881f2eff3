//! Error types for store operations.

use std::path::PathBuf;
use thiserror::Error;
use tickdb_types::TableError;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing store could not be opened.
    #[error("Failed to open store '{path}': {source}")]
    ConnectionFailure {
        /// The store location.
        path: PathBuf,
        /// The underlying SQLite error.
        source: rusqlite::Error,
    },

    /// Failed to create the directory holding the store.
    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        /// The path that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The schema script could not be read.
    #[error("Failed to read schema script '{path}': {source}")]
    Schema {
        /// The script location.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Point read against an absent or empty instrument table.
    #[error("No rows stored for instrument {instrument}")]
    NotFound {
        /// The normalized instrument key.
        instrument: String,
    },

    /// A required column is absent or holds no usable value.
    #[error("Instrument {instrument} has no usable '{field}' column")]
    MissingField {
        /// The normalized instrument key.
        instrument: String,
        /// The column that was looked up.
        field: String,
    },

    /// Records carry a column the stored table lacks.
    ///
    /// Only raised internally by appends, which recover by replacing the table.
    #[error("Table {instrument} has no column '{column}'")]
    UnknownColumn {
        /// The normalized instrument key.
        instrument: String,
        /// The first unknown column.
        column: String,
    },

    /// A table was to be written with no columns at all.
    #[error("Cannot store records without columns for instrument {instrument}")]
    NoColumns {
        /// The normalized instrument key.
        instrument: String,
    },

    /// A start date was not in `YYYY-MM-DD` form.
    #[error("Invalid start date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Rows read from the store did not form a valid table.
    #[error(transparent)]
    Table(#[from] TableError),

    /// SQLite error.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
