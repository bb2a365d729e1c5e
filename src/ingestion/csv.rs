//! CSV ingestion implementation.
//!
//! CSV has no schema here; each cell's type is inferred per value:
//!
//! - parses as an integer or a finite float -> number
//! - `true` / `false` (case-insensitive) -> bool
//! - empty or whitespace-only cell -> the field is absent from that record
//! - anything else -> string
//!
//! Absent-on-empty is what makes CSV rows behave like the sparse JSON
//! records the analytics engine is built around: an empty cell contributes
//! nothing to a field's numeric series instead of counting as zero.

use std::path::Path;

use crate::error::AnalyticsResult;
use crate::types::{Dataset, Record};

/// Ingest a CSV file into an in-memory [`Dataset`].
///
/// The CSV must have a header row; headers become field names.
pub fn ingest_csv_from_path(path: impl AsRef<Path>) -> AnalyticsResult<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr)
}

/// Build a CSV reader over an in-memory string payload.
pub fn csv_reader_from_str(input: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes())
}

/// Ingest CSV data from an existing CSV reader.
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> AnalyticsResult<Dataset> {
    let headers = rdr.headers()?.clone();

    let mut records: Vec<Record> = Vec::new();
    for result in rdr.records() {
        let row = result?;

        let mut record = Record::new();
        for (header, raw) in headers.iter().zip(row.iter()) {
            if let Some(value) = infer_cell_value(raw) {
                record.insert(header.to_string(), value);
            }
        }
        records.push(record);
    }

    Ok(Dataset::new(records))
}

fn infer_cell_value(raw: &str) -> Option<serde_json::Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(serde_json::Value::from(n));
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        // Number::from_f64 rejects non-finite values ("inf", "NaN"), which
        // then fall through to the string case below.
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Some(serde_json::Value::Number(n));
        }
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "true" => return Some(serde_json::Value::Bool(true)),
        "false" => return Some(serde_json::Value::Bool(false)),
        _ => {}
    }

    Some(serde_json::Value::String(trimmed.to_owned()))
}
