//! Batch execution of analytics with configurable parallelism.
//!
//! A single dataset's analysis is pure, synchronous, and bounded by the
//! dataset size, so there is nothing to schedule within it. What callers do
//! need is to analyze *many* datasets at once; this module provides:
//!
//! - A rayon-backed engine that analyzes each dataset on a worker, with no
//!   coordination between datasets
//! - An in-flight bound (throttling) on top of the thread count
//! - Real-time metrics + observer hooks for monitoring

mod observer;
mod throttle;

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use rayon::ThreadPool;
use rayon::ThreadPoolBuilder;

use crate::analytics::{analyze_columns, AnalyticsReport};
use crate::error::AnalyticsResult;
use crate::types::Dataset;

pub use observer::{
    ExecutionEvent, ExecutionMetrics, ExecutionMetricsSnapshot, ExecutionObserver,
    StdErrExecutionObserver,
};

use throttle::Gate;

/// Configuration for the [`ExecutionEngine`].
#[derive(Debug, Clone)]
pub struct ExecutionOptions {
    /// Number of worker threads used by the engine.
    ///
    /// If `None`, uses the platform's available parallelism.
    pub num_threads: Option<usize>,
    /// Upper bound on datasets analyzed concurrently.
    ///
    /// This is an additional throttle on top of `num_threads`.
    pub max_in_flight: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        let n = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        Self {
            num_threads: Some(n),
            max_in_flight: n.max(1),
        }
    }
}

/// A configurable engine for analyzing batches of datasets in parallel.
pub struct ExecutionEngine {
    pool: ThreadPool,
    opts: ExecutionOptions,
    observer: Option<Arc<dyn ExecutionObserver>>,
    metrics: Arc<ExecutionMetrics>,
}

impl ExecutionEngine {
    /// Create a new engine with the given options.
    ///
    /// # Panics
    ///
    /// Panics if `max_in_flight == 0` or `num_threads == Some(0)`.
    pub fn new(opts: ExecutionOptions) -> Self {
        assert!(opts.max_in_flight > 0, "max_in_flight must be > 0");
        if let Some(n) = opts.num_threads {
            assert!(n > 0, "num_threads must be > 0 when set");
        }

        let n_threads = opts
            .num_threads
            .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
            .max(1);

        let pool = ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .build()
            .expect("failed to build rayon thread pool");

        Self {
            pool,
            opts: opts.clone(),
            observer: None,
            metrics: Arc::new(ExecutionMetrics::new()),
        }
    }

    /// Attach an observer for execution events (metrics/logging).
    pub fn with_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Get a handle to real-time execution metrics.
    pub fn metrics(&self) -> Arc<ExecutionMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Analyze every dataset in the batch, in parallel.
    ///
    /// Results come back in input order. Datasets are independent: a failure
    /// in one (which cannot happen for well-formed [`Dataset`] values, but is
    /// propagated faithfully) does not abort the others.
    pub fn analyze_batch(&self, datasets: &[Dataset]) -> Vec<AnalyticsResult<AnalyticsReport>> {
        self.pool.install(|| self.analyze_batch_impl(datasets))
    }

    fn analyze_batch_impl(&self, datasets: &[Dataset]) -> Vec<AnalyticsResult<AnalyticsReport>> {
        let start = Instant::now();
        self.metrics.begin_run();
        self.emit(ExecutionEvent::RunStarted);

        let gate = Gate::new(self.opts.max_in_flight);

        let out: Vec<AnalyticsResult<AnalyticsReport>> = datasets
            .par_iter()
            .enumerate()
            .map(|(index, dataset)| {
                let (pass, waited) = gate.pass();
                if !waited.is_zero() {
                    self.metrics.on_throttle_wait(waited);
                    self.emit(ExecutionEvent::ThrottleWaited { duration: waited });
                }

                self.metrics.on_dataset_start();
                self.emit(ExecutionEvent::DatasetStarted {
                    index,
                    records: dataset.record_count(),
                });

                let result = analyze_columns(dataset);

                let fields = result.as_ref().map(AnalyticsReport::len).unwrap_or(0);
                if result.is_ok() {
                    self.metrics.on_records_scanned(dataset.record_count());
                    self.metrics.on_fields_summarized(fields);
                }

                self.emit(ExecutionEvent::DatasetFinished { index, fields });
                self.metrics.on_dataset_end();
                drop(pass);

                result
            })
            .collect();

        self.metrics.end_run(start.elapsed());
        self.emit(ExecutionEvent::RunFinished {
            elapsed: start.elapsed(),
            metrics: self.metrics.snapshot(),
        });

        out
    }

    fn emit(&self, event: ExecutionEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;

    use super::{ExecutionEngine, ExecutionEvent, ExecutionObserver, ExecutionOptions};
    use crate::types::{Dataset, Record};

    fn dataset_of_n(n: usize) -> Dataset {
        let mut records = Vec::with_capacity(n);
        for i in 0..n {
            let mut record = Record::new();
            record.insert("value".to_string(), json!(i));
            records.push(record);
        }
        Dataset::new(records)
    }

    #[test]
    fn batch_results_come_back_in_input_order() {
        let batch: Vec<Dataset> = (1..=20).map(dataset_of_n).collect();
        let engine = ExecutionEngine::new(ExecutionOptions {
            num_threads: Some(4),
            max_in_flight: 4,
        });

        let out = engine.analyze_batch(&batch);

        assert_eq!(out.len(), batch.len());
        for (i, result) in out.iter().enumerate() {
            let report = result.as_ref().unwrap();
            assert_eq!(report.get("value").unwrap().count, i + 1);
        }
    }

    struct ConcurrencyObserver {
        active: AtomicUsize,
        max_active: AtomicUsize,
    }

    impl ConcurrencyObserver {
        fn new() -> Self {
            Self {
                active: AtomicUsize::new(0),
                max_active: AtomicUsize::new(0),
            }
        }
        fn max(&self) -> usize {
            self.max_active.load(Ordering::SeqCst)
        }
        fn bump_max(&self, now: usize) {
            loop {
                let cur = self.max_active.load(Ordering::SeqCst);
                if now <= cur {
                    break;
                }
                if self
                    .max_active
                    .compare_exchange(cur, now, Ordering::SeqCst, Ordering::SeqCst)
                    .is_ok()
                {
                    break;
                }
            }
        }
    }

    impl ExecutionObserver for ConcurrencyObserver {
        fn on_event(&self, event: &ExecutionEvent) {
            match event {
                ExecutionEvent::DatasetStarted { .. } => {
                    let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
                    self.bump_max(now);
                    // Keep the slot busy long enough for overlap to show.
                    std::thread::sleep(Duration::from_millis(2));
                }
                ExecutionEvent::DatasetFinished { .. } => {
                    let _ = self.active.fetch_sub(1, Ordering::SeqCst);
                }
                _ => {}
            }
        }
    }

    #[test]
    fn max_in_flight_throttles_dataset_concurrency() {
        let batch: Vec<Dataset> = (0..50).map(|_| dataset_of_n(10)).collect();
        let observer = Arc::new(ConcurrencyObserver::new());
        let obs_trait: Arc<dyn ExecutionObserver> = observer.clone();
        let engine = ExecutionEngine::new(ExecutionOptions {
            num_threads: Some(4),
            max_in_flight: 1,
        })
        .with_observer(obs_trait);

        let out = engine.analyze_batch(&batch);

        assert_eq!(out.len(), batch.len());
        assert_eq!(observer.max(), 1);
    }

    #[test]
    fn metrics_are_available_after_run() {
        let batch: Vec<Dataset> = (0..8).map(|_| dataset_of_n(5)).collect();
        let engine = ExecutionEngine::new(ExecutionOptions {
            num_threads: Some(2),
            max_in_flight: 2,
        });
        let metrics = engine.metrics();

        let out = engine.analyze_batch(&batch);
        assert!(out.iter().all(|r| r.is_ok()));

        let snap = metrics.snapshot();
        assert_eq!(snap.datasets_started, 8);
        assert_eq!(snap.datasets_finished, 8);
        assert_eq!(snap.records_scanned, 40);
        assert_eq!(snap.fields_summarized, 8);
        assert!(snap.elapsed.is_some());
    }
}
