//! Connection management.

use rusqlite::Connection;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::{error, info};

use crate::{Result, StoreConfig, StoreError};

/// Schema script run by [`Database::create`] when none is configured.
const DEFAULT_SCHEMA: &str = include_str!("../schema.sql");

/// Handle to one tick store.
///
/// Owns the SQLite connection for its whole lifetime. Reads borrow it
/// shared, writes borrow it exclusively; nothing is pooled or locked
/// internally, so concurrent use is the caller's responsibility.
#[derive(Debug)]
pub struct Database {
    pub(crate) conn: Connection,
    config: StoreConfig,
}

impl Database {
    /// Opens the store at the configured location, creating an empty file
    /// if none exists.
    ///
    /// When the open fails, [`Database::create`] is attempted as a recovery
    /// step (its own failure is only logged) and the original failure is
    /// returned. A caller that wants to use the recovered store must connect
    /// again.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ConnectionFailure`] if the store cannot be opened.
    pub fn connect(config: StoreConfig) -> Result<Self> {
        match Connection::open(config.path()) {
            Ok(conn) => Ok(Self { conn, config }),
            Err(source) => {
                error!(path = %config.path().display(), error = %source, "Failed to open store");
                if let Err(e) = Self::create(config.clone()) {
                    error!(path = %config.path().display(), error = %e, "Failed to create store");
                }
                Err(StoreError::ConnectionFailure {
                    path: config.path().to_path_buf(),
                    source,
                })
            }
        }
    }

    /// Initializes a store by running the schema script against it.
    ///
    /// Runs the configured script, or the bundled one when none is set, and
    /// creates the parent directory if needed.
    ///
    /// This is destructive and not idempotent: a custom script may drop or
    /// redefine existing tables. Only run it against a fresh store.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory, the script or the store cannot be
    /// accessed, or if the script fails.
    pub fn create(config: StoreConfig) -> Result<Self> {
        let script: Cow<'static, str> = match config.schema_path() {
            Some(path) => fs::read_to_string(path)
                .map_err(|source| StoreError::Schema {
                    path: path.to_path_buf(),
                    source,
                })?
                .into(),
            None => DEFAULT_SCHEMA.into(),
        };

        if let Some(parent) = config.path().parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = open(config.path())?;
        conn.execute_batch(&script)?;
        info!(path = %config.path().display(), "Initialized store");

        Ok(Self { conn, config })
    }

    /// Opens a private in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if SQLite cannot allocate the database.
    pub fn open_in_memory(config: StoreConfig) -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::ConnectionFailure {
            path: ":memory:".into(),
            source,
        })?;
        Ok(Self { conn, config })
    }

    /// Returns the configuration this handle was opened with.
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the store location.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.config.path()
    }
}

fn open(path: &Path) -> Result<Connection> {
    Connection::open(path).map_err(|source| StoreError::ConnectionFailure {
        path: path.to_path_buf(),
        source,
    })
}
