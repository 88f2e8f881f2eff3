//! CSV output format.

use std::borrow::Cow;
use std::io::Write;
use tickdb_types::TickTable;

use crate::{FormatError, Formatter};

/// CSV formatter.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }

    /// Quotes a field if it holds the delimiter, a quote or a line break.
    fn escape<'a>(&self, field: &'a str) -> Cow<'a, str> {
        let needs_quotes = field
            .chars()
            .any(|c| c == self.delimiter || matches!(c, '"' | '\n' | '\r'));
        if needs_quotes {
            Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
        } else {
            Cow::Borrowed(field)
        }
    }

    fn write_line<'a>(
        &self,
        writer: &mut dyn Write,
        fields: impl Iterator<Item = Cow<'a, str>>,
    ) -> Result<(), FormatError> {
        let mut delimiter = [0; 4];
        let delimiter = self.delimiter.encode_utf8(&mut delimiter);
        for (i, field) in fields.enumerate() {
            if i > 0 {
                writer.write_all(delimiter.as_bytes())?;
            }
            writer.write_all(self.escape(&field).as_bytes())?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

impl Formatter for CsvFormatter {
    fn write_table(&self, table: &TickTable, writer: &mut dyn Write) -> Result<(), FormatError> {
        if self.include_header {
            self.write_line(writer, table.columns().iter().map(|c| Cow::Borrowed(c.as_str())))?;
        }

        for row in table.rows() {
            self.write_line(writer, row.iter().map(|value| Cow::Owned(value.to_string())))?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        if self.delimiter == '\t' { "tsv" } else { "csv" }
    }
}
