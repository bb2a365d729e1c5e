//! In-memory, write-once storage for datasets and their computed analytics.
//!
//! The store plays the persistence-collaborator role: it owns uploaded
//! datasets and caches each dataset's column report after the first request.
//! Datasets are write-once (there is no update or delete API), so a cached
//! report can never go stale and no invalidation protocol exists.
//!
//! The store is safe to share across threads; independent computations need
//! no coordination.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use serde::{Deserialize, Serialize};

use crate::analytics::{analyze_columns, analyze_field, AnalyticsReport, RevenueSummary};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::types::Dataset;

/// Identity of a stored dataset. Ids are sequential and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DatasetId(pub u64);

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Listing entry for a stored dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetInfo {
    /// Dataset id.
    pub id: DatasetId,
    /// Name given at upload time.
    pub name: String,
    /// Number of records.
    pub records: usize,
}

struct StoredDataset {
    name: String,
    dataset: Dataset,
    // Computed on first request; datasets are write-once so it never goes stale.
    report: Mutex<Option<AnalyticsReport>>,
}

/// Thread-safe in-memory dataset store.
pub struct DatasetStore {
    next_id: AtomicU64,
    entries: RwLock<HashMap<DatasetId, Arc<StoredDataset>>>,
}

impl DatasetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Store a dataset under a new id.
    pub fn insert(&self, name: impl Into<String>, dataset: Dataset) -> DatasetId {
        let id = DatasetId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let entry = Arc::new(StoredDataset {
            name: name.into(),
            dataset,
            report: Mutex::new(None),
        });
        self.entries
            .write()
            .expect("store lock poisoned")
            .insert(id, entry);
        id
    }

    /// Number of stored datasets.
    pub fn len(&self) -> usize {
        self.entries.read().expect("store lock poisoned").len()
    }

    /// Returns `true` if nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A copy of the stored dataset.
    pub fn dataset(&self, id: DatasetId) -> AnalyticsResult<Dataset> {
        Ok(self.entry(id)?.dataset.clone())
    }

    /// List all stored datasets, ascending by id.
    pub fn list(&self) -> Vec<DatasetInfo> {
        let entries = self.entries.read().expect("store lock poisoned");
        let mut out: Vec<DatasetInfo> = entries
            .iter()
            .map(|(&id, entry)| DatasetInfo {
                id,
                name: entry.name.clone(),
                records: entry.dataset.record_count(),
            })
            .collect();
        out.sort_by_key(|info| info.id);
        out
    }

    /// The column report for a dataset, computed on first request and cached.
    ///
    /// Every call returns an identical report; the underlying dataset cannot
    /// change after insertion.
    pub fn analytics(&self, id: DatasetId) -> AnalyticsResult<AnalyticsReport> {
        let entry = self.entry(id)?;

        let mut cached = entry.report.lock().expect("store lock poisoned");
        if let Some(report) = cached.as_ref() {
            return Ok(report.clone());
        }

        let report = analyze_columns(&entry.dataset)?;
        *cached = Some(report.clone());
        Ok(report)
    }

    /// Extended summary for one field of a stored dataset.
    ///
    /// Recomputed on demand; `Ok(None)` when the field never holds a numeric
    /// value.
    pub fn field_analytics(
        &self,
        id: DatasetId,
        field: &str,
    ) -> AnalyticsResult<Option<RevenueSummary>> {
        let entry = self.entry(id)?;
        analyze_field(&entry.dataset, field)
    }

    fn entry(&self, id: DatasetId) -> AnalyticsResult<Arc<StoredDataset>> {
        self.entries
            .read()
            .expect("store lock poisoned")
            .get(&id)
            .cloned()
            .ok_or(AnalyticsError::DatasetNotFound { id })
    }
}

impl Default for DatasetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DatasetStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetStore")
            .field("datasets", &self.len())
            .finish()
    }
}
