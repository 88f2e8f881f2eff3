//! Init command implementation.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tickdb_lib::{Database, StoreConfig};

/// Initialize the store from a schema script.
pub(crate) fn init(config: StoreConfig, schema: Option<PathBuf>) -> Result<()> {
    let config = match schema {
        Some(schema) => config.with_schema(schema),
        None => config,
    };
    let path = config.path().to_path_buf();

    Database::create(config)
        .with_context(|| format!("Failed to initialize store at {}", path.display()))?;

    println!("Initialized store at {}", path.display());
    Ok(())
}
