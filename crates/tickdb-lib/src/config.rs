//! Chart series configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tickdb_aggregate::SeriesColumns;
use tickdb_types::normalize;

/// Errors that can occur while loading a [`ChartConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read chart config '{path}': {source}")]
    Io {
        /// The file location.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration is not valid JSON for a [`ChartConfig`].
    #[error("Invalid chart config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which tick columns feed each instrument's chart.
///
/// ```json
/// {
///   "default": { "price": "LA_price", "size": "LA_size", "time": "date" },
///   "instruments": { "I.RFX20": { "price": "IV" } }
/// }
/// ```
///
/// Override keys are instrument labels and are matched after
/// normalization. Fields missing from an override take the
/// [`SeriesColumns`] defaults, not the values under `default`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Columns used for instruments without an override.
    #[serde(rename = "default")]
    pub columns: SeriesColumns,
    /// Per-instrument overrides.
    pub instruments: BTreeMap<String, SeriesColumns>,
}

impl ChartConfig {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Adds an override for one instrument.
    #[must_use]
    pub fn with_instrument(mut self, instrument: &str, columns: SeriesColumns) -> Self {
        self.instruments.insert(normalize(instrument), columns);
        self
    }

    /// Returns the columns to chart `instrument` with.
    #[must_use]
    pub fn columns_for(&self, instrument: &str) -> &SeriesColumns {
        let key = normalize(instrument);
        self.instruments
            .iter()
            .find(|(label, _)| normalize(label) == key)
            .map_or(&self.columns, |(_, columns)| columns)
    }
}
