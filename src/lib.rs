//! `dataset-analytics` is a small library for computing column-wise
//! descriptive statistics over collections of JSON records.
//!
//! Users upload an arbitrary collection of records (a [`types::Dataset`]);
//! for every field that ever holds a numeric value, the engine produces a
//! stable summary: count, mean, min, max, range, and population standard
//! deviation. A single-field extended form additionally reports variance,
//! median, and mode.
//!
//! ## What you can ingest
//!
//! **Formats (auto-detected by extension via [`ingestion::ingest_from_path`]):**
//!
//! - **JSON**: `.json` (array-of-objects or a single object) and `.ndjson`
//!   (newline-delimited objects)
//! - **CSV**: `.csv` (header row names the fields; cell types are inferred)
//!
//! Records are schema-free: they may have disjoint field sets, and a field
//! may hold a number in one record and a string in the next. Only numeric
//! values feed the statistics; everything else is skipped silently.
//!
//! ## Quick example: analyze a dataset
//!
//! ```rust
//! use dataset_analytics::analytics::analyze_columns;
//! use dataset_analytics::types::Dataset;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), dataset_analytics::AnalyticsError> {
//! let ds = Dataset::from_json(json!([
//!     {"price": 10, "city": "Oslo"},
//!     {"price": 20, "qty": 3},
//!     {"price": 30, "qty": 5},
//! ]))?;
//!
//! let report = analyze_columns(&ds)?;
//! assert_eq!(report.field_names(), vec!["price", "qty"]);
//!
//! let price = report.get("price").unwrap();
//! assert_eq!(price.count, 3);
//! assert_eq!(price.mean, 20.0);
//! assert_eq!(price.range, 20.0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Extended single-field summary
//!
//! ```rust
//! use dataset_analytics::analytics::analyze_field;
//! use dataset_analytics::types::Dataset;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), dataset_analytics::AnalyticsError> {
//! let ds = Dataset::from_json(json!([
//!     {"revenue": 10}, {"revenue": 10}, {"revenue": 20},
//! ]))?;
//!
//! let ext = analyze_field(&ds, "revenue")?.unwrap();
//! assert_eq!(ext.total_records, 3);
//! assert_eq!(ext.median, 10.0);
//! assert_eq!(ext.mode, 10.0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`analytics`]: the extractor + summarizer engine and report assembly
//! - [`types`]: record/dataset types and the shared numeric predicate
//! - [`ingestion`]: JSON/NDJSON/CSV ingestion with upload observability
//! - [`store`]: in-memory write-once dataset store with cached reports
//! - [`execution`]: parallel batch analysis with metrics and throttling
//! - [`error`]: error types used across the crate

pub mod analytics;
pub mod error;
pub mod execution;
pub mod ingestion;
pub mod store;
pub mod types;

pub use error::{AnalyticsError, AnalyticsResult};
