//! Mapping between tick values and SQLite.

use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};
use tickdb_types::{TIMESTAMP_FORMAT, TickTable, Value};

/// Declared column type marking text cells that hold timestamps.
pub(crate) const TIMESTAMP_TYPE: &str = "TIMESTAMP";

/// Borrowed [`Value`] bound as a statement parameter.
pub(crate) struct Param<'a>(pub(crate) &'a Value);

impl ToSql for Param<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self.0 {
            Value::Null => ToSqlOutput::Owned(SqlValue::Null),
            Value::Integer(i) => ToSqlOutput::Owned(SqlValue::Integer(*i)),
            Value::Real(r) => ToSqlOutput::Owned(SqlValue::Real(*r)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Value::Timestamp(ts) => {
                ToSqlOutput::Owned(SqlValue::Text(ts.format(TIMESTAMP_FORMAT).to_string()))
            }
        })
    }
}

/// Decodes a stored cell, using the column's declared type to recover timestamps.
pub(crate) fn decode(raw: ValueRef<'_>, declared_type: Option<&str>) -> Value {
    match raw {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(r) => Value::Real(r),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            let text = Value::Text(String::from_utf8_lossy(bytes).into_owned());
            let is_timestamp =
                declared_type.is_some_and(|t| t.eq_ignore_ascii_case(TIMESTAMP_TYPE));
            if is_timestamp {
                text.to_timestamp().map_or(text, Value::Timestamp)
            } else {
                text
            }
        }
    }
}

/// Quotes an identifier for interpolation into statement text.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Returns the SQL type to declare for a column, from its values.
///
/// A column is typed only when every non-null value carries the same tag.
/// Mixed and all-null columns are left untyped so SQLite applies no
/// affinity and each cell reads back with the type it was written with.
/// Timestamps in a mixed column are stored as text and read back as text.
pub(crate) fn column_type<'a>(values: impl Iterator<Item = &'a Value>) -> &'static str {
    let mut declared = "";
    for value in values {
        let this = match value {
            Value::Null => continue,
            Value::Integer(_) => "INTEGER",
            Value::Real(_) => "REAL",
            Value::Text(_) => "TEXT",
            Value::Timestamp(_) => TIMESTAMP_TYPE,
        };
        if declared.is_empty() {
            declared = this;
        } else if declared != this {
            return "";
        }
    }
    declared
}

/// Builds the `CREATE TABLE` statement for a table.
pub(crate) fn create_table_sql(key: &str, table: &TickTable) -> String {
    let columns: Vec<String> = table
        .columns()
        .iter()
        .map(|name| {
            let values = table.column(name).into_iter().flatten();
            let declared = column_type(values);
            if declared.is_empty() {
                quote_ident(name)
            } else {
                format!("{} {declared}", quote_ident(name))
            }
        })
        .collect();
    format!("CREATE TABLE {} ({})", quote_ident(key), columns.join(", "))
}

/// Builds a positional-parameter `INSERT` for the given columns.
pub(crate) fn insert_sql<'a>(key: &str, columns: impl IntoIterator<Item = &'a str>) -> String {
    let (names, slots): (Vec<String>, Vec<String>) = columns
        .into_iter()
        .enumerate()
        .map(|(i, name)| (quote_ident(name), format!("?{}", i + 1)))
        .unzip();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(key),
        names.join(", "),
        slots.join(", ")
    )
}
