//! Instrument catalog.

use rusqlite::OptionalExtension;
use tickdb_types::InstrumentKey;

use crate::{Database, Result};

impl Database {
    /// Returns the names of all tables in the store, in catalog order.
    ///
    /// Every table is listed, including any created by the schema script
    /// that does not hold ticks.
    ///
    /// # Errors
    ///
    /// Returns an error if SQLite fails.
    pub fn list_instruments(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table'")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }

    /// Returns true if a table exists for the instrument's normalized key.
    ///
    /// # Errors
    ///
    /// Returns an error if SQLite fails.
    pub fn contains_instrument(&self, instrument: &str) -> Result<bool> {
        let key = InstrumentKey::new(instrument);
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [key.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, StoreConfig};
    use tickdb_types::Record;

    fn memory_db() -> Database {
        Database::open_in_memory(StoreConfig::new(":memory:")).unwrap()
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let db = memory_db();
        assert!(db.list_instruments().unwrap().is_empty());
        assert!(!db.contains_instrument("RFX20").unwrap());
    }

    #[test]
    fn test_lists_in_creation_order() {
        let mut db = memory_db();
        for label in ["RFX20Mar19", "DO.MAR19", "I.RFX20"] {
            db.write_full(Record::new().with("LA_price", 1.0), label)
                .unwrap();
        }

        assert_eq!(
            db.list_instruments().unwrap(),
            ["RFX20MAR19", "DOMAR19", "IRFX20"]
        );
    }

    #[test]
    fn test_contains_normalizes_label() {
        let mut db = memory_db();
        db.write_full(Record::new().with("LA_price", 1.0), "DO.MAR19")
            .unwrap();

        assert!(db.contains_instrument("do-mar19").unwrap());
        assert!(db.contains_instrument("DOMAR19").unwrap());
        assert!(!db.contains_instrument("DOAPR19").unwrap());
    }

    #[test]
    fn test_rewrite_keeps_single_entry() {
        let mut db = memory_db();
        db.write_full(Record::new().with("LA_price", 1.0), "RFX20")
            .unwrap();
        db.write_full(Record::new().with("IV", 0.3), "RFX20").unwrap();

        assert_eq!(db.list_instruments().unwrap(), ["RFX20"]);
    }
}
