//! Per-instrument tick tables: writes, appends and point reads.

use chrono::NaiveDate;
use rusqlite::{Connection, Params, params_from_iter};
use tickdb_types::{DATE_COLUMN, InstrumentKey, Record, TickTable, Value};
use tracing::{debug, error};

use crate::sql::{Param, create_table_sql, decode, insert_sql, quote_ident};
use crate::{Database, Result, StoreError};

/// How an append was carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum AppendOutcome {
    /// Rows were added after the existing rows.
    Appended,
    /// No table existed; it was created from the records.
    Created,
    /// The records did not fit the stored table, which was replaced by them.
    /// Every previously stored row for the instrument is gone.
    ReplacedDueToSchemaDrift,
}

impl AppendOutcome {
    /// Returns true if the stored history was discarded.
    #[must_use]
    pub const fn is_replace(&self) -> bool {
        matches!(self, Self::ReplacedDueToSchemaDrift)
    }

    /// Returns the outcome as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Appended => "appended",
            Self::Created => "created",
            Self::ReplacedDueToSchemaDrift => "replaced",
        }
    }
}

impl std::fmt::Display for AppendOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored column and its declared SQL type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column name.
    pub name: String,
    /// Declared type (`INTEGER`, `REAL`, `TEXT`, `TIMESTAMP`, or empty).
    pub declared_type: String,
}

impl Database {
    /// Replaces the instrument's table with `records`.
    ///
    /// A single [`Record`] is promoted to a one-row table. If the records
    /// carry a `date` column it leads the table and is indexed. Any previous
    /// table, including its column set, is discarded. The write is committed
    /// before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the records have no columns or SQLite fails.
    pub fn write_full(&mut self, records: impl Into<TickTable>, instrument: &str) -> Result<()> {
        let key = InstrumentKey::new(instrument);
        let table = records.into();
        if table.columns().is_empty() {
            return Err(StoreError::NoColumns {
                instrument: key.into(),
            });
        }
        if table.index().is_none() {
            debug!(instrument = %key, "No date column to index the new table");
        }

        let tx = self.conn.transaction()?;
        tx.execute(&format!("DROP TABLE IF EXISTS {}", quote_ident(key.as_str())), [])?;
        tx.execute(&create_table_sql(key.as_str(), &table), [])?;
        if let Some(index) = table.index() {
            let sql = format!(
                "CREATE INDEX {} ON {} ({})",
                quote_ident(&format!("ix_{key}_{index}")),
                quote_ident(key.as_str()),
                quote_ident(index)
            );
            tx.execute(&sql, [])?;
        }
        insert_rows(&tx, key.as_str(), table.columns(), table.rows())?;
        tx.commit()?;

        debug!(instrument = %key, rows = table.len(), "Replaced table");
        Ok(())
    }

    /// Appends `records` to the instrument's table.
    ///
    /// Creates the table if it does not exist. If the records carry a column
    /// the stored table lacks, or the insert fails for any other reason, the
    /// stored table is replaced by `records` and all older rows are lost; the
    /// outcome reports which path was taken. Stored columns the records lack
    /// are filled with nulls.
    ///
    /// # Errors
    ///
    /// Returns an error only if the replacement write itself fails.
    pub fn append(
        &mut self,
        records: impl Into<TickTable>,
        instrument: &str,
    ) -> Result<AppendOutcome> {
        let key = InstrumentKey::new(instrument);
        let table = records.into();

        let stored = self.table_columns(key.as_str())?;
        if stored.is_empty() {
            self.write_full(table, key.as_str())?;
            return Ok(AppendOutcome::Created);
        }

        match self.try_append(&key, &table, &stored) {
            Ok(()) => {
                debug!(instrument = %key, rows = table.len(), "Appended rows");
                Ok(AppendOutcome::Appended)
            }
            Err(e) => {
                error!(
                    instrument = %key,
                    error = %e,
                    "Failed to append to the stored table, replacing it with the new records"
                );
                self.write_full(table, key.as_str())?;
                Ok(AppendOutcome::ReplacedDueToSchemaDrift)
            }
        }
    }

    fn try_append(
        &mut self,
        key: &InstrumentKey,
        table: &TickTable,
        stored: &[ColumnInfo],
    ) -> Result<()> {
        let unknown = table
            .columns()
            .iter()
            .find(|column| !stored.iter().any(|info| info.name == **column));
        if let Some(column) = unknown {
            return Err(StoreError::UnknownColumn {
                instrument: key.to_string(),
                column: column.clone(),
            });
        }

        let tx = self.conn.transaction()?;
        insert_rows(&tx, key.as_str(), table.columns(), table.rows())?;
        tx.commit()?;
        Ok(())
    }

    /// Inserts one record with a single parameterized statement.
    ///
    /// If no table named by the instrument key exists, or the insert fails,
    /// the table is replaced by the single record instead. Values are always
    /// bound as parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog lookup or the replacement write fails.
    pub fn append_single(&mut self, record: Record, instrument: &str) -> Result<AppendOutcome> {
        let key = InstrumentKey::new(instrument);

        if !self.contains_instrument(key.as_str())? {
            self.write_full(record, key.as_str())?;
            return Ok(AppendOutcome::Created);
        }

        match self.try_insert_record(&key, &record) {
            Ok(()) => Ok(AppendOutcome::Appended),
            Err(e) => {
                error!(
                    instrument = %key,
                    error = %e,
                    "Failed to insert record, replacing the table with it"
                );
                self.write_full(record, key.as_str())?;
                Ok(AppendOutcome::ReplacedDueToSchemaDrift)
            }
        }
    }

    fn try_insert_record(&mut self, key: &InstrumentKey, record: &Record) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            &insert_sql(key.as_str(), record.keys()),
            params_from_iter(record.values().map(Param)),
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Returns every stored row for the instrument in native row order.
    ///
    /// An absent table reads as an empty table. A `date` column becomes the
    /// index.
    ///
    /// # Errors
    ///
    /// Returns an error if SQLite fails.
    pub fn read(&self, instrument: &str) -> Result<TickTable> {
        let key = InstrumentKey::new(instrument);
        let stored = self.table_columns(key.as_str())?;
        if stored.is_empty() {
            return Ok(TickTable::default());
        }
        let sql = format!("SELECT * FROM {}", quote_ident(key.as_str()));
        self.query_table(&stored, &sql, [])
    }

    /// Returns the rows whose `date` is strictly after `start_date`.
    ///
    /// `start_date` must be `YYYY-MM-DD`; an empty string reads everything.
    /// The comparison is done by SQLite on Julian day numbers, so stored
    /// text must be in a layout SQLite recognizes as a date.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidDate`] for a malformed date, or an error
    /// if SQLite fails. A table without a `date` column reads as empty.
    pub fn read_range(&self, instrument: &str, start_date: &str) -> Result<TickTable> {
        let start_date = start_date.trim();
        if start_date.is_empty() {
            return self.read(instrument);
        }
        NaiveDate::parse_from_str(start_date, "%Y-%m-%d")
            .map_err(|_| StoreError::InvalidDate(start_date.to_string()))?;

        let key = InstrumentKey::new(instrument);
        let stored = self.table_columns(key.as_str())?;
        if !stored.iter().any(|info| info.name == DATE_COLUMN) {
            return Ok(TickTable::default());
        }
        let sql = format!(
            "SELECT * FROM {} WHERE julianday({}) > julianday(?1)",
            quote_ident(key.as_str()),
            quote_ident(DATE_COLUMN)
        );
        self.query_table(&stored, &sql, [start_date])
    }

    /// Returns the most recent row by descending `date`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the table is absent or empty, and
    /// [`StoreError::MissingField`] if it has no `date` column.
    pub fn read_last(&self, instrument: &str) -> Result<Record> {
        let key = InstrumentKey::new(instrument);
        let stored = self.table_columns(key.as_str())?;
        if stored.is_empty() {
            return Err(StoreError::NotFound {
                instrument: key.into(),
            });
        }
        if !stored.iter().any(|info| info.name == DATE_COLUMN) {
            return Err(StoreError::MissingField {
                instrument: key.into(),
                field: DATE_COLUMN.to_string(),
            });
        }

        let sql = format!(
            "SELECT * FROM {} ORDER BY {} DESC LIMIT 1",
            quote_ident(key.as_str()),
            quote_ident(DATE_COLUMN)
        );
        self.query_table(&stored, &sql, [])?
            .record(0)
            .ok_or_else(|| StoreError::NotFound {
                instrument: key.into(),
            })
    }

    /// Returns the configured price field of the most recent row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] as [`Database::read_last`] does, and
    /// [`StoreError::MissingField`] if the price is absent or not numeric.
    pub fn read_last_price(&self, instrument: &str) -> Result<f64> {
        let field = self.config().price_field();
        let record = self.read_last(instrument)?;
        record
            .get(field)
            .and_then(Value::as_f64)
            .ok_or_else(|| StoreError::MissingField {
                instrument: InstrumentKey::new(instrument).into(),
                field: field.to_string(),
            })
    }

    /// Returns the stored columns of the instrument's table, in table order.
    ///
    /// An absent table has no columns.
    ///
    /// # Errors
    ///
    /// Returns an error if SQLite fails.
    pub fn table_columns(&self, instrument: &str) -> Result<Vec<ColumnInfo>> {
        let key = InstrumentKey::new(instrument);
        let mut stmt = self
            .conn
            .prepare("SELECT name, type FROM pragma_table_info(?1)")?;
        let columns = stmt
            .query_map([key.as_str()], |row| {
                Ok(ColumnInfo {
                    name: row.get(0)?,
                    declared_type: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(columns)
    }

    /// Runs a query over one instrument table and collects the rows.
    fn query_table<P: Params>(
        &self,
        stored: &[ColumnInfo],
        sql: &str,
        params: P,
    ) -> Result<TickTable> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let declared: Vec<Option<&str>> = columns
            .iter()
            .map(|name| {
                stored
                    .iter()
                    .find(|info| info.name == *name)
                    .map(|info| info.declared_type.as_str())
            })
            .collect();

        let mut table = TickTable::new(columns)?;
        let mut rows = stmt.query(params)?;
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(declared.len());
            for (i, declared_type) in declared.iter().enumerate() {
                values.push(decode(row.get_ref(i)?, *declared_type));
            }
            table.push_row(values)?;
        }
        table.set_index(DATE_COLUMN);
        Ok(table)
    }
}

/// Inserts rows with one prepared statement.
fn insert_rows(conn: &Connection, key: &str, columns: &[String], rows: &[Vec<Value>]) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    let mut stmt = conn.prepare(&insert_sql(key, columns.iter().map(String::as_str)))?;
    for row in rows {
        stmt.execute(params_from_iter(row.iter().map(Param)))?;
    }
    Ok(())
}
