//! Column-ordered tick tables.

use std::collections::HashSet;

use crate::{Record, TableError, Value};

/// Name of the temporal key column.
pub const DATE_COLUMN: &str = "date";

/// Rows of tick data sharing one column set.
///
/// A table may be indexed by one of its columns (normally `date`). The index
/// column is always kept as the leading column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    index: Option<String>,
}

impl TickTable {
    /// Creates an empty table with the given columns.
    ///
    /// # Errors
    ///
    /// Returns an error if a column name is repeated.
    pub fn new(columns: Vec<String>) -> Result<Self, TableError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(TableError::DuplicateColumn(column.clone()));
            }
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
            index: None,
        })
    }

    /// Creates a table from columns and rows.
    ///
    /// # Errors
    ///
    /// Returns an error if a column name is repeated or a row has the wrong width.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, TableError> {
        let mut table = Self::new(columns)?;
        table.rows.reserve(rows.len());
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Builds a table from records.
    ///
    /// Columns are the union of the records' columns in first-seen order;
    /// cells a record lacks are null. A `date` column becomes the index.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut table = Self::default();
        for record in records {
            table.push_record(record);
        }
        table.set_index(DATE_COLUMN);
        table
    }

    /// Appends a row.
    ///
    /// # Errors
    ///
    /// Returns an error if the row does not have one value per column.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::RowWidth {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Appends a record, widening the table with any new columns.
    pub fn push_record(&mut self, record: Record) {
        let mut row = vec![Value::Null; self.columns.len()];
        for (name, value) in record {
            match self.column_position(&name) {
                Some(pos) => row[pos] = value,
                None => {
                    self.columns.push(name);
                    for existing in &mut self.rows {
                        existing.push(Value::Null);
                    }
                    row.push(value);
                }
            }
        }
        self.rows.push(row);
    }

    /// Returns the column names.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the position of a column.
    #[must_use]
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns true if the table has the given column.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column_position(name).is_some()
    }

    /// Returns the values of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value>> {
        let pos = self.column_position(name)?;
        Some(self.rows.iter().map(move |row| &row[pos]))
    }

    /// Returns the index column name, if the table is indexed.
    #[must_use]
    pub fn index(&self) -> Option<&str> {
        self.index.as_deref()
    }

    /// Makes `name` the index column, moving it to the front.
    ///
    /// Returns false (and leaves the table unchanged) if the column is absent.
    pub fn set_index(&mut self, name: &str) -> bool {
        let Some(pos) = self.column_position(name) else {
            return false;
        };
        if pos != 0 {
            self.columns[..=pos].rotate_right(1);
            for row in &mut self.rows {
                row[..=pos].rotate_right(1);
            }
        }
        self.index = Some(name.to_string());
        true
    }

    /// Returns one row as a record.
    #[must_use]
    pub fn record(&self, row: usize) -> Option<Record> {
        let values = self.rows.get(row)?;
        Some(
            self.columns
                .iter()
                .cloned()
                .zip(values.iter().cloned())
                .collect(),
        )
    }

    /// Returns every row as a record.
    pub fn records(&self) -> impl Iterator<Item = Record> + '_ {
        (0..self.rows.len()).filter_map(|row| self.record(row))
    }

    /// Removes columns whose every value is null, returning their names.
    ///
    /// An empty table keeps all its columns.
    pub fn drop_null_columns(&mut self) -> Vec<String> {
        if self.rows.is_empty() {
            return Vec::new();
        }
        let keep: Vec<bool> = (0..self.columns.len())
            .map(|pos| self.rows.iter().any(|row| !row[pos].is_null()))
            .collect();
        if keep.iter().all(|k| *k) {
            return Vec::new();
        }

        let mut dropped = Vec::new();
        let columns = std::mem::take(&mut self.columns);
        for (column, keep) in columns.into_iter().zip(&keep) {
            if *keep {
                self.columns.push(column);
            } else {
                dropped.push(column);
            }
        }
        for row in &mut self.rows {
            let mut flags = keep.iter();
            row.retain(|_| flags.next().copied().unwrap_or(true));
        }
        if self.index.as_ref().is_some_and(|i| dropped.contains(i)) {
            self.index = None;
        }
        dropped
    }

    /// Removes rows whose value in `column` repeats an earlier row's value,
    /// keeping the first occurrence. Returns the number of rows removed.
    pub fn dedup_by(&mut self, column: &str) -> usize {
        let Some(pos) = self.column_position(column) else {
            return 0;
        };
        let before = self.rows.len();
        let keep: Vec<bool> = {
            let mut seen = HashSet::with_capacity(before);
            self.rows
                .iter()
                .map(|row| seen.insert(DedupKey::from(&row[pos])))
                .collect()
        };
        let mut flags = keep.into_iter();
        self.rows.retain(|_| flags.next().unwrap_or(true));
        before - self.rows.len()
    }
}

impl From<Record> for TickTable {
    fn from(record: Record) -> Self {
        Self::from_records([record])
    }
}

impl From<Vec<Record>> for TickTable {
    fn from(records: Vec<Record>) -> Self {
        Self::from_records(records)
    }
}

/// Hashable identity of a cell, used for deduplication.
#[derive(PartialEq, Eq, Hash)]
enum DedupKey<'a> {
    Null,
    Integer(i64),
    Real(u64),
    Text(&'a str),
    Timestamp(chrono::NaiveDateTime),
}

impl<'a> From<&'a Value> for DedupKey<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Integer(i) => Self::Integer(*i),
            Value::Real(r) => Self::Real(r.to_bits()),
            Value::Text(s) => Self::Text(s),
            Value::Timestamp(ts) => Self::Timestamp(*ts),
        }
    }
}
