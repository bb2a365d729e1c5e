//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`ingest_from_path`] (from [`unified`]) which:
//!
//! - auto-detects format by file extension (or you can override via [`UploadOptions`])
//! - performs ingestion into an in-memory [`crate::types::Dataset`]
//! - optionally reports success/failure/alerts to an [`UploadObserver`]
//!
//! In-memory payloads (request bodies) go through [`ingest_from_str`].
//!
//! Format-specific functions are also available under:
//! - [`json`]
//! - [`csv`]

pub mod csv;
pub mod json;
pub mod observability;
pub mod unified;

pub use observability::{
    CompositeObserver, FileObserver, StdErrObserver, UploadContext, UploadObserver, UploadSeverity,
    UploadStats,
};
pub use unified::{ingest_from_path, ingest_from_str, SourceFormat, UploadOptions, UploadRequest};
