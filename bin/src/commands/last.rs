//! Last command implementation.

use crate::display::print_record;
use anyhow::Result;
use tickdb_lib::{Database, StoreConfig};

/// Print the most recent tick of an instrument, or only its price.
pub(crate) fn last(config: StoreConfig, instrument: &str, price_only: bool) -> Result<()> {
    let db = Database::connect(config)?;

    if price_only {
        println!("{}", db.read_last_price(instrument)?);
    } else {
        print_record(&db.read_last(instrument)?);
    }

    Ok(())
}
