//! Output format abstraction.

use std::io::Write;
use thiserror::Error;
use tickdb_aggregate::BarSet;
use tickdb_types::TickTable;

use crate::{CsvFormatter, JsonFormatter};

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// CSV format.
    #[default]
    Csv,
    /// Tab-separated values.
    Tsv,
    /// JSON array format.
    Json,
    /// Newline-delimited JSON format.
    Ndjson,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
        }
    }

    /// Returns a formatter for this format.
    ///
    /// Options that do not apply to the format are ignored.
    #[must_use]
    pub fn formatter(&self, options: &FormatOptions) -> Box<dyn Formatter> {
        match self {
            Self::Csv | Self::Tsv => {
                let mut csv = if *self == Self::Tsv {
                    CsvFormatter::tsv()
                } else {
                    CsvFormatter::new()
                };
                if let Some(delimiter) = options.delimiter {
                    csv = csv.with_delimiter(delimiter);
                }
                Box::new(csv.with_header(options.header))
            }
            Self::Json => Box::new(JsonFormatter::new().with_pretty(options.pretty)),
            Self::Ndjson => Box::new(JsonFormatter::ndjson()),
        }
    }
}

/// Settings applied when building a formatter from an [`OutputFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Field delimiter overriding the format's own (delimited text only).
    pub delimiter: Option<char>,
    /// Whether to write a header row (delimited text only).
    pub header: bool,
    /// Whether to pretty-print (JSON array only).
    pub pretty: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            header: true,
            pretty: false,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" | "tab" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Trait for output formatters.
///
/// Writers are taken as `&mut dyn Write` so formatters can be chosen at
/// runtime through [`OutputFormat::formatter`].
pub trait Formatter: Send + Sync {
    /// Writes a tick table to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table(&self, table: &TickTable, writer: &mut dyn Write) -> Result<(), FormatError>;

    /// Writes a bar set to the output, with the bar time as the leading
    /// `date` column.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_bars(&self, bars: &BarSet, writer: &mut dyn Write) -> Result<(), FormatError> {
        self.write_table(&bars.to_table(), writer)
    }

    /// Returns the file extension for this format.
    fn extension(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("TSV".parse::<OutputFormat>().unwrap(), OutputFormat::Tsv);
        assert_eq!("jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Ndjson);
        assert!(matches!(
            "parquet".parse::<OutputFormat>(),
            Err(FormatError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_formatter_extension_matches() {
        for format in [
            OutputFormat::Csv,
            OutputFormat::Tsv,
            OutputFormat::Json,
            OutputFormat::Ndjson,
        ] {
            let formatter = format.formatter(&FormatOptions::default());
            assert_eq!(formatter.extension(), format.extension());
        }
    }

    fn render(format: OutputFormat, options: &FormatOptions) -> String {
        let table = TickTable::from(
            tickdb_types::Record::new()
                .with("date", "2019-03-01 09:00:00")
                .with("LA_price", 100.5),
        );
        let mut output = Vec::new();
        format.formatter(options).write_table(&table, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_formatter_options() {
        let options = FormatOptions {
            delimiter: Some(';'),
            header: false,
            pretty: false,
        };
        assert_eq!(render(OutputFormat::Csv, &options), "2019-03-01 09:00:00;100.5\n");
        assert_eq!(
            render(OutputFormat::Tsv, &FormatOptions::default()),
            "date\tLA_price\n2019-03-01 09:00:00\t100.5\n"
        );

        let pretty = FormatOptions {
            pretty: true,
            ..FormatOptions::default()
        };
        assert!(render(OutputFormat::Json, &pretty).contains("\n  "));
        assert_eq!(render(OutputFormat::Ndjson, &pretty).lines().count(), 1);
    }
}
