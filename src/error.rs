use thiserror::Error;

use crate::store::DatasetId;

/// Convenience result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Error type returned across ingestion, analysis, and storage.
///
/// This is a single error enum shared by all modules. None of the variants is
/// transient: the engine performs no I/O once a [`crate::types::Dataset`]
/// exists, so retrying with the same input reproduces the same failure.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV ingestion error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The supplied payload is not a well-formed sequence of records
    /// (e.g. a scalar, an array containing non-objects, or unparseable text).
    ///
    /// Callers should reject the originating request rather than retry.
    #[error("invalid dataset: {message}")]
    InvalidDataset { message: String },

    /// A summary was requested for a series with zero elements.
    ///
    /// The standard column-report path omits numeric-free fields before
    /// summarizing, so this surfacing to a caller indicates a defect in the
    /// assembly step, not bad user input.
    #[error("cannot summarize an empty series")]
    EmptySeries,

    /// No dataset is stored under the given id.
    #[error("dataset not found: {id}")]
    DatasetNotFound { id: DatasetId },
}
