//! Descriptive statistics over one numeric series.
//!
//! All spread statistics here are **population** statistics: the divisor is
//! the element count, not `count - 1`. That matches the summaries this crate
//! has always produced; do not "fix" it to the sample divisor most stats
//! libraries default to.

use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Summary statistics for one field across a dataset.
///
/// Serializes with the wire keys the dashboard consumes; the standard
/// deviation key is `std`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSummary {
    /// Number of records where the field held a numeric value.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// `max - min`.
    pub range: f64,
    /// Population standard deviation.
    #[serde(rename = "std")]
    pub std_dev: f64,
}

/// Extended single-field summary.
///
/// The key names are fixed (`totalRecords`, `avgRevenue`, ...) even when the
/// summarized field is not named `revenue`; existing dashboard cards read
/// exactly these keys.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummary {
    /// Number of records where the field held a numeric value.
    pub total_records: usize,
    /// Arithmetic mean.
    pub avg_revenue: f64,
    /// Smallest value.
    pub min_revenue: f64,
    /// Largest value.
    pub max_revenue: f64,
    /// `max - min`.
    pub range: f64,
    /// Element at index `n / 2` of the ascending-sorted series.
    pub median: f64,
    /// Most frequent value; see [`summarize_extended`] for the tie-break.
    pub mode: f64,
    /// Population variance.
    pub variance: f64,
    /// Population standard deviation.
    pub standard_deviation: f64,
}

/// Summarize a numeric series.
///
/// The series is expected to contain only finite values (the extractor
/// guarantees this); given finite input every returned statistic is finite.
///
/// # Errors
///
/// [`AnalyticsError::EmptySeries`] if `series` is empty. Callers on the
/// standard path never hit this because numeric-free fields are omitted
/// before summarization.
pub fn summarize(series: &[f64]) -> AnalyticsResult<FieldSummary> {
    if series.is_empty() {
        return Err(AnalyticsError::EmptySeries);
    }

    let count = series.len();
    let mean = series.iter().sum::<f64>() / count as f64;
    let min = series.iter().copied().fold(f64::INFINITY, f64::min);
    let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Ok(FieldSummary {
        count,
        mean,
        min,
        max,
        range: max - min,
        std_dev: population_variance(series, mean).sqrt(),
    })
}

/// Summarize a numeric series in the extended single-field form.
///
/// The six basic statistics are computed by [`summarize`], so the two forms
/// cannot drift apart. On top of those:
///
/// - `variance` is the population variance (the standard deviation squared).
/// - `median` is the element at index `n / 2` of the ascending-sorted
///   series. For even lengths this is the upper of the two middle elements,
///   not their average.
/// - `mode` ranks the distinct values by a stable ascending sort on
///   occurrence count and takes the last one. On a frequency tie the winner
///   is therefore the distinct value whose first occurrence comes latest.
///
/// The median and mode choices are unusual but deliberate, observable
/// policy; tests pin them.
///
/// # Errors
///
/// [`AnalyticsError::EmptySeries`] if `series` is empty.
pub fn summarize_extended(series: &[f64]) -> AnalyticsResult<RevenueSummary> {
    let base = summarize(series)?;
    let median = median_of(series).ok_or(AnalyticsError::EmptySeries)?;
    let mode = mode_of(series).ok_or(AnalyticsError::EmptySeries)?;

    Ok(RevenueSummary {
        total_records: base.count,
        avg_revenue: base.mean,
        min_revenue: base.min,
        max_revenue: base.max,
        range: base.range,
        median,
        mode,
        variance: population_variance(series, base.mean),
        standard_deviation: base.std_dev,
    })
}

fn population_variance(series: &[f64], mean: f64) -> f64 {
    series.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / series.len() as f64
}

fn median_of(series: &[f64]) -> Option<f64> {
    let mut sorted = series.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.get(sorted.len() / 2).copied()
}

fn mode_of(series: &[f64]) -> Option<f64> {
    // Distinct values in first-occurrence order, with occurrence counts.
    let mut counts: Vec<(f64, usize)> = Vec::new();
    for &v in series {
        match counts.iter_mut().find(|(seen, _)| *seen == v) {
            Some((_, n)) => *n += 1,
            None => counts.push((v, 1)),
        }
    }
    // Stable sort: equal counts keep first-occurrence order, so `last`
    // resolves frequency ties to the latest-seen distinct value.
    counts.sort_by_key(|&(_, n)| n);
    counts.last().map(|&(v, _)| v)
}
