//! Numeric column extraction for [`crate::types::Dataset`].

use crate::types::{numeric_value, Dataset};

/// The ordered numeric values one field holds across a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericColumn {
    /// Field name.
    pub name: String,
    /// Numeric values in record order.
    pub values: Vec<f64>,
}

/// Extract every numeric column from a dataset.
///
/// Field names are the union of record keys, in first-seen order. For each
/// field, records are walked in order and values that classify as numeric
/// (see [`numeric_value`]) are kept; a record where the field is absent or
/// non-numeric is silently skipped for that field, not counted as zero.
/// Fields with zero qualifying values across the whole dataset are omitted
/// from the output, so every returned column is non-empty.
///
/// Pure function of its input; the dataset is never mutated.
pub fn extract_columns(dataset: &Dataset) -> Vec<NumericColumn> {
    let mut columns = Vec::new();
    for name in dataset.field_names() {
        let values = extract_column(dataset, name);
        if !values.is_empty() {
            columns.push(NumericColumn {
                name: name.to_string(),
                values,
            });
        }
    }
    columns
}

/// Extract the numeric series for a single field.
///
/// Returns an empty vec when no record holds a numeric value for `field`
/// (including when the field does not exist at all).
pub fn extract_column(dataset: &Dataset, field: &str) -> Vec<f64> {
    dataset
        .records
        .iter()
        .filter_map(|record| record.get(field).and_then(numeric_value))
        .collect()
}
