//! Show command implementation.

use crate::display::{OutputArgs, write_table};
use anyhow::Result;
use tickdb_lib::{Database, StoreConfig};

/// Print the stored ticks of an instrument, optionally after a start date.
pub(crate) fn show(
    config: StoreConfig,
    instrument: &str,
    start: Option<&str>,
    output: &OutputArgs,
) -> Result<()> {
    let db = Database::connect(config)?;
    let table = db.read_range(instrument, start.unwrap_or_default())?;

    write_table(&table, output)
}
