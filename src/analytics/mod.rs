//! The column-wise descriptive-statistics engine.
//!
//! The engine is a pure, synchronous computation over an in-memory
//! [`crate::types::Dataset`]: no I/O, no shared state, no mutation of the
//! input. It runs in two steps:
//!
//! 1. [`extract_columns()`]: discover fields and pull out each field's
//!    ordered numeric series (non-numeric and absent values are skipped).
//! 2. [`summarize()`]: compute count/mean/min/max/range/std for one series —
//!    or [`summarize_extended()`] for the single-field form that adds
//!    variance/median/mode.
//!
//! [`analyze_columns()`] composes the two into a per-field
//! [`AnalyticsReport`]; [`analyze()`] additionally dispatches on the caller's
//! [`AnalyticsMode`].
//!
//! ## Example
//!
//! ```rust
//! use dataset_analytics::analytics::analyze_columns;
//! use dataset_analytics::types::Dataset;
//! use serde_json::json;
//!
//! let ds = Dataset::from_json(json!([
//!     {"a": 1, "note": "first"},
//!     {"a": 2, "b": 10},
//!     {"a": 3},
//! ]))
//! .unwrap();
//!
//! let report = analyze_columns(&ds).unwrap();
//!
//! // "note" never holds a number, so only "a" and "b" are summarized.
//! assert_eq!(report.field_names(), vec!["a", "b"]);
//! assert_eq!(report.get("a").unwrap().count, 3);
//! assert_eq!(report.get("a").unwrap().mean, 2.0);
//! assert_eq!(report.get("b").unwrap().count, 1);
//! ```

pub mod extract;
pub mod report;
pub mod summarize;

pub use extract::{extract_column, extract_columns, NumericColumn};
pub use report::{analyze, analyze_columns, analyze_field, AnalyticsMode, AnalyticsOutput, AnalyticsReport};
pub use summarize::{summarize, summarize_extended, FieldSummary, RevenueSummary};
