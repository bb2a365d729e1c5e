//! JSON ingestion implementation.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"a":1}, {"a":2}]`
//! - A single JSON object (a one-record dataset)
//! - Newline-delimited JSON (NDJSON): `{"a":1}\n{"a":2}\n`
//!
//! Records are kept as-is; there is no schema. Heterogeneous and sparse
//! objects are expected (that is the whole point of the analytics engine).

use std::fs;
use std::path::Path;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::types::Dataset;

/// Ingest a JSON file into an in-memory [`Dataset`].
pub fn ingest_json_from_path(path: impl AsRef<Path>) -> AnalyticsResult<Dataset> {
    let text = fs::read_to_string(path)?;
    ingest_json_from_str(&text)
}

/// Ingest JSON from an in-memory string into a [`Dataset`].
///
/// This is the entry point for payloads that arrive in a request body
/// rather than on disk.
pub fn ingest_json_from_str(input: &str) -> AnalyticsResult<Dataset> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AnalyticsError::InvalidDataset {
            message: "json input is empty".to_string(),
        });
    }

    // First try parsing as a single JSON value (array or object).
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(trimmed) {
        match v {
            serde_json::Value::Array(_) => Dataset::from_json(v),
            serde_json::Value::Object(map) => Ok(Dataset::new(vec![map])),
            _ => Err(AnalyticsError::InvalidDataset {
                message: "json must be an object, an array of objects, or ndjson".to_string(),
            }),
        }
    } else {
        // Fall back to NDJSON.
        let mut records = Vec::new();
        for (i, line) in trimmed.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let v = serde_json::from_str::<serde_json::Value>(line).map_err(|e| {
                AnalyticsError::InvalidDataset {
                    message: format!("invalid ndjson at line {}: {}", i + 1, e),
                }
            })?;
            match v {
                serde_json::Value::Object(map) => records.push(map),
                _ => {
                    return Err(AnalyticsError::InvalidDataset {
                        message: format!("ndjson line {} is not a json object", i + 1),
                    });
                }
            }
        }
        Ok(Dataset::new(records))
    }
}
