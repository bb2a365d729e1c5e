//! Result assembly: turn a whole dataset into summaries.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::AnalyticsResult;
use crate::types::Dataset;

use super::extract::{extract_column, extract_columns};
use super::summarize::{summarize, summarize_extended, FieldSummary, RevenueSummary};

/// Per-field summaries for a dataset, in field discovery order.
///
/// A field appears here iff at least one record holds a numeric value for
/// it; numeric-free fields are omitted entirely rather than carried with
/// null statistics. Serializes as a JSON object whose key order is the
/// discovery order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalyticsReport {
    entries: Vec<(String, FieldSummary)>,
}

impl AnalyticsReport {
    /// Look up the summary for a field.
    pub fn get(&self, field: &str) -> Option<&FieldSummary> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, summary)| summary)
    }

    /// Iterate `(field, summary)` pairs in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSummary)> {
        self.entries.iter().map(|(name, s)| (name.as_str(), s))
    }

    /// Field names in discovery order.
    pub fn field_names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Number of summarized fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no field had any numeric values.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for AnalyticsReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, summary) in &self.entries {
            map.serialize_entry(name, summary)?;
        }
        map.end()
    }
}

/// Which summarization the caller wants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsMode {
    /// Per-field summaries for every numeric column.
    Columns,
    /// Extended summary for one designated field.
    Field(String),
}

/// Output of [`analyze`], shaped by the requested [`AnalyticsMode`].
///
/// Serializes untagged: either the field → summary mapping, or the flat
/// extended object (`null` when the designated field has no numeric values).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalyticsOutput {
    /// Result of a full column scan.
    Columns(AnalyticsReport),
    /// Result of a single-field extended summary.
    Field(Option<RevenueSummary>),
}

/// Compute the per-field report for a dataset.
///
/// Runs the extractor, then the summarizer once per non-empty column, and
/// assembles the mapping in discovery order. Idempotent and pure: calling it
/// twice on the same dataset yields identical results, and the dataset is
/// never mutated. A dataset with no numeric fields (including an empty
/// dataset) yields an empty report, which is a valid outcome, not an error.
pub fn analyze_columns(dataset: &Dataset) -> AnalyticsResult<AnalyticsReport> {
    let mut entries = Vec::new();
    for column in extract_columns(dataset) {
        let summary = summarize(&column.values)?;
        entries.push((column.name, summary));
    }
    Ok(AnalyticsReport { entries })
}

/// Compute the extended summary for one designated field.
///
/// Returns `Ok(None)` when no record holds a numeric value for `field` —
/// the single-field counterpart of omitting numeric-free fields from the
/// column report.
pub fn analyze_field(dataset: &Dataset, field: &str) -> AnalyticsResult<Option<RevenueSummary>> {
    let series = extract_column(dataset, field);
    if series.is_empty() {
        return Ok(None);
    }
    summarize_extended(&series).map(Some)
}

/// Dispatch on the caller's requested mode.
///
/// Both arms run on the same extractor and summarizer core, so the two
/// response shapes cannot diverge in their shared statistics.
pub fn analyze(dataset: &Dataset, mode: &AnalyticsMode) -> AnalyticsResult<AnalyticsOutput> {
    match mode {
        AnalyticsMode::Columns => analyze_columns(dataset).map(AnalyticsOutput::Columns),
        AnalyticsMode::Field(field) => analyze_field(dataset, field).map(AnalyticsOutput::Field),
    }
}
