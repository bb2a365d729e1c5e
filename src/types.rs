//! Core data model types.
//!
//! A [`Dataset`] is an ordered collection of [`Record`]s. Records are plain
//! JSON objects and need not share a common set of fields; the analytics
//! engine discovers fields by walking the whole dataset.

use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// A single uploaded record: a mapping from field name to an arbitrary JSON
/// value.
///
/// With `serde_json`'s `preserve_order` feature (enabled by this crate),
/// iterating a record yields keys in document order, which is what makes
/// field discovery order deterministic.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// An ordered, finite collection of records analyzed together.
///
/// Datasets are heterogeneous by design: records may have disjoint field
/// sets, and a field may hold a number in one record and a string in the
/// next. The engine never mutates a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Records in upload order.
    pub records: Vec<Record>,
}

impl Dataset {
    /// Create a dataset from records.
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Build a dataset from a parsed JSON payload.
    ///
    /// The payload must be an array whose elements are all objects; anything
    /// else (a scalar, a lone object, an array containing non-objects) is
    /// rejected with [`AnalyticsError::InvalidDataset`]. An empty array is a
    /// valid empty dataset.
    pub fn from_json(value: serde_json::Value) -> AnalyticsResult<Self> {
        let items = match value {
            serde_json::Value::Array(items) => items,
            other => {
                return Err(AnalyticsError::InvalidDataset {
                    message: format!("expected an array of records, got {}", json_kind(&other)),
                });
            }
        };

        let mut records = Vec::with_capacity(items.len());
        for (idx0, item) in items.into_iter().enumerate() {
            match item {
                serde_json::Value::Object(map) => records.push(map),
                other => {
                    return Err(AnalyticsError::InvalidDataset {
                        message: format!(
                            "record {} is not a json object (got {})",
                            idx0 + 1,
                            json_kind(&other)
                        ),
                    });
                }
            }
        }

        Ok(Self::new(records))
    }

    /// Number of records in the dataset.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The union of field names across all records, in first-seen order.
    pub fn field_names(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut names = Vec::new();
        for record in &self.records {
            for name in record.keys() {
                if seen.insert(name.as_str()) {
                    names.push(name.as_str());
                }
            }
        }
        names
    }
}

/// Classify a JSON value as numeric, returning it as an `f64`.
///
/// Only JSON numbers qualify; booleans, strings, nulls, arrays, and objects
/// do not, and neither does a number that cannot be represented as a finite
/// double. This is the single numeric-classification rule in the crate; the
/// extractor must not grow a divergent one.
pub fn numeric_value(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a bool",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
