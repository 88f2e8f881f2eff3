//! Display utilities and output formatting for the tickdb CLI.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tickdb_lib::{BarSet, FormatOptions, Formatter, OutputFormat, Record, TickTable};

/// Output format for tables and bars.
#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Tsv,
    Json,
    Ndjson,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => Self::Csv,
            Format::Tsv => Self::Tsv,
            Format::Json => Self::Json,
            Format::Ndjson => Self::Ndjson,
        }
    }
}

/// Output options shared by the commands that print tables.
#[derive(Args)]
pub(crate) struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: Format,

    /// Output file. Defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Field delimiter for csv and tsv output
    #[arg(long)]
    delimiter: Option<char>,

    /// Omit the header row from csv and tsv output
    #[arg(long)]
    no_header: bool,

    /// Pretty-print json output
    #[arg(long)]
    pretty: bool,
}

impl OutputArgs {
    fn formatter(&self) -> Box<dyn Formatter> {
        let options = FormatOptions {
            delimiter: self.delimiter,
            header: !self.no_header,
            pretty: self.pretty,
        };
        OutputFormat::from(self.format).formatter(&options)
    }
}

/// Opens the output file, or stdout when none is given.
fn open_output(output: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    })
}

/// Writes a tick table with the given output options.
pub(crate) fn write_table(table: &TickTable, args: &OutputArgs) -> Result<()> {
    let mut writer = open_output(args.output.as_deref())?;
    args.formatter().write_table(table, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes a bar set with the given output options.
pub(crate) fn write_bars(bars: &BarSet, args: &OutputArgs) -> Result<()> {
    let mut writer = open_output(args.output.as_deref())?;
    args.formatter().write_bars(bars, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Prints a record as aligned `name: value` lines.
pub(crate) fn print_record(record: &Record) {
    let width = record.keys().map(str::len).max().unwrap_or(0);
    for (name, value) in record.iter() {
        println!("{name:<width$}  {value}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        output: OutputArgs,
    }

    fn render(args: &[&str]) -> String {
        let cli = Cli::try_parse_from(std::iter::once("tickdb").chain(args.iter().copied())).unwrap();
        let table = TickTable::from(
            Record::new()
                .with("date", "2019-03-01 09:00:00")
                .with("LA_price", 100.5),
        );
        let mut output = Vec::new();
        cli.output.formatter().write_table(&table, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_output_args() {
        assert_eq!(render(&[]), "date,LA_price\n2019-03-01 09:00:00,100.5\n");
        assert_eq!(
            render(&["--delimiter", ";", "--no-header"]),
            "2019-03-01 09:00:00;100.5\n"
        );
        assert!(render(&["-f", "json", "--pretty"]).contains("\n  "));
    }
}
