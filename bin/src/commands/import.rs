//! Import command implementation.
//!
//! Reads ticks from a JSON array or newline-delimited JSON file and stores
//! them with one of the store's write paths.

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value as JsonValue};
use std::fs;
use std::path::Path;
use tickdb_lib::{AppendOutcome, Database, Record, StoreConfig, normalize};
use tracing::warn;

/// How imported ticks are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ImportMode {
    /// Append all ticks at once.
    Append,
    /// Replace the stored table.
    Replace,
    /// Insert ticks one at a time.
    Single,
}

/// Store the ticks in `file` under `instrument`.
pub(crate) fn import(
    config: StoreConfig,
    instrument: &str,
    file: &Path,
    mode: ImportMode,
) -> Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let records =
        parse_records(&text).with_context(|| format!("Failed to parse {}", file.display()))?;
    if records.is_empty() {
        bail!("No ticks in {}", file.display());
    }

    let count = records.len();
    let key = normalize(instrument);
    let mut db = Database::connect(config)?;

    match mode {
        ImportMode::Replace => {
            db.write_full(records, instrument)?;
            println!("Wrote {count} ticks to {key}");
        }
        ImportMode::Append => {
            let outcome = db.append(records, instrument)?;
            report(&key, count, outcome);
        }
        ImportMode::Single => {
            let mut replaced = 0;
            for record in records {
                if db.append_single(record, instrument)?.is_replace() {
                    replaced += 1;
                }
            }
            println!("Inserted {count} ticks into {key}");
            if replaced > 0 {
                warn!(instrument = %key, replaced, "Table was replaced during import");
            }
        }
    }

    Ok(())
}

fn report(key: &str, count: usize, outcome: AppendOutcome) {
    match outcome {
        AppendOutcome::Appended => println!("Appended {count} ticks to {key}"),
        AppendOutcome::Created => println!("Created {key} with {count} ticks"),
        AppendOutcome::ReplacedDueToSchemaDrift => {
            println!("Replaced {key} with {count} ticks; earlier ticks were discarded");
        }
    }
}

/// Parses a JSON array of objects, or one object per line.
fn parse_records(text: &str) -> Result<Vec<Record>> {
    let text = text.trim_start();
    if text.starts_with('[') {
        let objects: Vec<Map<String, JsonValue>> = serde_json::from_str(text)?;
        return Ok(objects.into_iter().map(Record::from_json).collect());
    }

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            let object: Map<String, JsonValue> = serde_json::from_str(line)
                .with_context(|| format!("Line {}", i + 1))?;
            Ok(Record::from_json(object))
        })
        .collect()
}
