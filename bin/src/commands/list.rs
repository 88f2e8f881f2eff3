//! List command implementation.

use anyhow::Result;
use tickdb_lib::{Database, StoreConfig};

/// List every table in the store.
pub(crate) fn list_instruments(config: StoreConfig) -> Result<()> {
    let db = Database::connect(config)?;
    let instruments = db.list_instruments()?;

    if instruments.is_empty() {
        println!("No instruments stored in {}.", db.path().display());
        return Ok(());
    }

    for instrument in &instruments {
        println!("{instrument}");
    }

    println!("\nTotal: {} instruments", instruments.len());
    Ok(())
}
