//! Unified ingestion entrypoint.
//!
//! Most callers should use [`ingest_from_path`], which ingests a file into an
//! in-memory [`crate::types::Dataset`], or [`ingest_from_str`] for payloads
//! that arrive in a request body.
//!
//! - If [`UploadOptions::format`] is `None`, the format is inferred from the
//!   file extension.
//! - If an [`UploadObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::types::Dataset;

use super::observability::{UploadContext, UploadObserver, UploadSeverity, UploadStats};
use super::{csv, json};

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// JSON array-of-objects, single object, or NDJSON.
    Json,
    /// Comma-separated values with a header row.
    Csv,
}

impl SourceFormat {
    /// Parse a source format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" | "ndjson" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Options controlling unified ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct UploadOptions {
    /// If `None`, auto-detect format from the file extension.
    pub format: Option<SourceFormat>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn UploadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: UploadSeverity,
}

impl fmt::Debug for UploadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadOptions")
            .field("format", &self.format)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            format: None,
            observer: None,
            alert_at_or_above: UploadSeverity::Critical,
        }
    }
}

/// Unified ingestion entry point for path-based sources.
///
/// - If `options.format` is `None`, format is inferred from the file
///   extension (`.json`/`.ndjson` or `.csv`).
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with record/field stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use dataset_analytics::ingestion::{ingest_from_path, UploadOptions};
///
/// # fn main() -> Result<(), dataset_analytics::AnalyticsError> {
/// // Uses the `.json` extension to select JSON ingestion.
/// let ds = ingest_from_path("orders.json", &UploadOptions::default())?;
/// println!("records={}", ds.record_count());
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(path: impl AsRef<Path>, options: &UploadOptions) -> AnalyticsResult<Dataset> {
    let path = path.as_ref();
    let fmt = match options.format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    let ctx = UploadContext {
        source: path.display().to_string(),
        format: fmt,
    };

    let result = match fmt {
        SourceFormat::Json => json::ingest_json_from_path(path),
        SourceFormat::Csv => csv::ingest_csv_from_path(path),
    };

    report_outcome(options, &ctx, &result);
    result
}

/// Ingest an in-memory payload, e.g. the body of an upload request.
///
/// No extension is available here, so the format must be given explicitly.
pub fn ingest_from_str(
    input: &str,
    format: SourceFormat,
    options: &UploadOptions,
) -> AnalyticsResult<Dataset> {
    let ctx = UploadContext {
        source: "<inline>".to_string(),
        format,
    };

    let result = match format {
        SourceFormat::Json => json::ingest_json_from_str(input),
        SourceFormat::Csv => {
            let mut rdr = csv::csv_reader_from_str(input);
            csv::ingest_csv_from_reader(&mut rdr)
        }
    };

    report_outcome(options, &ctx, &result);
    result
}

fn report_outcome(options: &UploadOptions, ctx: &UploadContext, result: &AnalyticsResult<Dataset>) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };

    match result {
        Ok(ds) => obs.on_success(
            ctx,
            UploadStats {
                records: ds.record_count(),
                fields: ds.field_names().len(),
            },
        ),
        Err(e) => {
            let sev = severity_for_error(e);
            obs.on_failure(ctx, sev, e);
            if sev >= options.alert_at_or_above {
                obs.on_alert(ctx, sev, e);
            }
        }
    }
}

fn severity_for_error(e: &AnalyticsError) -> UploadSeverity {
    match e {
        AnalyticsError::Io(_) => UploadSeverity::Critical,
        AnalyticsError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => UploadSeverity::Critical,
            _ => UploadSeverity::Error,
        },
        AnalyticsError::InvalidDataset { .. } => UploadSeverity::Error,
        // Not produced by ingestion; classified for completeness.
        AnalyticsError::EmptySeries | AnalyticsError::DatasetNotFound { .. } => UploadSeverity::Error,
    }
}

fn infer_format_from_path(path: &Path) -> AnalyticsResult<SourceFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| AnalyticsError::InvalidDataset {
            message: format!(
                "cannot infer format: path has no extension ({})",
                path.display()
            ),
        })?;

    SourceFormat::from_extension(ext).ok_or_else(|| AnalyticsError::InvalidDataset {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ),
    })
}

/// Convenience helper for callers that want an owned request object.
///
/// This can be useful if you want to enqueue uploads in a job system.
#[derive(Clone)]
pub struct UploadRequest {
    /// Path to the input file.
    pub path: PathBuf,
    /// Options controlling ingestion.
    pub options: UploadOptions,
}

impl fmt::Debug for UploadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadRequest")
            .field("path", &self.path)
            .field("options", &self.options)
            .finish()
    }
}

impl UploadRequest {
    /// Execute the request by calling [`ingest_from_path`].
    pub fn run(&self) -> AnalyticsResult<Dataset> {
        ingest_from_path(&self.path, &self.options)
    }
}
