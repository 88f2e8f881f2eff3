//! Store configuration.

use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// File name of the store when no location is given.
pub const DEFAULT_DB_NAME: &str = "ticks.db";

/// Column read by [`Database::read_last_price`](crate::Database::read_last_price)
/// unless configured otherwise.
pub const DEFAULT_PRICE_FIELD: &str = "LA_price";

/// Location and conventions of one tick store.
///
/// Passed explicitly to [`Database::connect`](crate::Database::connect);
/// there is no process-wide default handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// SQLite file holding the store.
    path: PathBuf,
    /// Schema script run by `create`; the bundled script when unset.
    schema_path: Option<PathBuf>,
    /// Column holding the last-trade price.
    price_field: String,
}

impl StoreConfig {
    /// Creates a configuration for the store at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            schema_path: None,
            price_field: DEFAULT_PRICE_FIELD.to_string(),
        }
    }

    /// Returns the default store location.
    ///
    /// Uses the `directories` crate to find the platform data directory:
    /// - Linux: `~/.local/share/tickdb/ticks.db`
    /// - macOS: `~/Library/Application Support/tickdb/ticks.db`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\tickdb\ticks.db`
    ///
    /// Falls back to `~/.tickdb/ticks.db`.
    #[must_use]
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("", "", "tickdb")
            .map_or_else(dirs_fallback, |proj_dirs| proj_dirs.data_dir().to_path_buf())
            .join(DEFAULT_DB_NAME)
    }

    /// Sets the schema script used by `create`.
    #[must_use]
    pub fn with_schema(mut self, path: impl Into<PathBuf>) -> Self {
        self.schema_path = Some(path.into());
        self
    }

    /// Sets the column read as the last price.
    #[must_use]
    pub fn with_price_field(mut self, field: impl Into<String>) -> Self {
        self.price_field = field.into();
        self
    }

    /// Returns the store location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the schema script location, if one is configured.
    #[must_use]
    pub fn schema_path(&self) -> Option<&Path> {
        self.schema_path.as_deref()
    }

    /// Returns the price column name.
    #[must_use]
    pub fn price_field(&self) -> &str {
        &self.price_field
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

/// Fallback for determining home directory.
fn dirs_fallback() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".tickdb")
}
