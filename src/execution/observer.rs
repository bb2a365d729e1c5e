use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Execution events emitted by the engine.
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    RunStarted,
    ThrottleWaited { duration: Duration },
    DatasetStarted { index: usize, records: usize },
    DatasetFinished { index: usize, fields: usize },
    RunFinished {
        elapsed: Duration,
        metrics: ExecutionMetricsSnapshot,
    },
}

/// Observer hook for execution events.
pub trait ExecutionObserver: Send + Sync {
    fn on_event(&self, event: &ExecutionEvent);
}

/// A simple stderr logger for execution events.
#[derive(Default)]
pub struct StdErrExecutionObserver;

impl ExecutionObserver for StdErrExecutionObserver {
    fn on_event(&self, event: &ExecutionEvent) {
        eprintln!("{event:?}");
    }
}

/// Real-time metrics for an execution run.
///
/// The engine updates these counters during execution; callers can snapshot
/// them at any time.
pub struct ExecutionMetrics {
    run_id: AtomicU64,
    started_at: Mutex<Option<Instant>>,
    elapsed_ns: AtomicU64,

    records_scanned: AtomicU64,
    fields_summarized: AtomicU64,
    datasets_started: AtomicU64,
    datasets_finished: AtomicU64,
    throttle_wait_ns: AtomicU64,

    active_datasets: AtomicUsize,
    max_active_datasets: AtomicUsize,
}

impl ExecutionMetrics {
    pub fn new() -> Self {
        Self {
            run_id: AtomicU64::new(0),
            started_at: Mutex::new(None),
            elapsed_ns: AtomicU64::new(0),
            records_scanned: AtomicU64::new(0),
            fields_summarized: AtomicU64::new(0),
            datasets_started: AtomicU64::new(0),
            datasets_finished: AtomicU64::new(0),
            throttle_wait_ns: AtomicU64::new(0),
            active_datasets: AtomicUsize::new(0),
            max_active_datasets: AtomicUsize::new(0),
        }
    }

    pub fn begin_run(&self) {
        let _ = self.run_id.fetch_add(1, Ordering::SeqCst) + 1;
        *self.started_at.lock().expect("metrics mutex poisoned") = Some(Instant::now());

        self.elapsed_ns.store(0, Ordering::SeqCst);
        self.records_scanned.store(0, Ordering::SeqCst);
        self.fields_summarized.store(0, Ordering::SeqCst);
        self.datasets_started.store(0, Ordering::SeqCst);
        self.datasets_finished.store(0, Ordering::SeqCst);
        self.throttle_wait_ns.store(0, Ordering::SeqCst);
        self.active_datasets.store(0, Ordering::SeqCst);
        self.max_active_datasets.store(0, Ordering::SeqCst);
    }

    pub fn end_run(&self, elapsed: Duration) {
        self.elapsed_ns
            .store(elapsed.as_nanos().min(u64::MAX as u128) as u64, Ordering::SeqCst);
    }

    pub fn on_records_scanned(&self, n: usize) {
        let _ = self.records_scanned.fetch_add(n as u64, Ordering::SeqCst);
    }

    pub fn on_fields_summarized(&self, n: usize) {
        let _ = self.fields_summarized.fetch_add(n as u64, Ordering::SeqCst);
    }

    pub fn on_dataset_start(&self) {
        let _ = self.datasets_started.fetch_add(1, Ordering::SeqCst);
        let now = self.active_datasets.fetch_add(1, Ordering::SeqCst) + 1;
        update_max_usize(&self.max_active_datasets, now);
    }

    pub fn on_dataset_end(&self) {
        let _ = self.datasets_finished.fetch_add(1, Ordering::SeqCst);
        let _ = self.active_datasets.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn on_throttle_wait(&self, d: Duration) {
        let add = d.as_nanos().min(u64::MAX as u128) as u64;
        let _ = self.throttle_wait_ns.fetch_add(add, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> ExecutionMetricsSnapshot {
        let run_id = self.run_id.load(Ordering::SeqCst);
        let elapsed_ns = self.elapsed_ns.load(Ordering::SeqCst);
        let elapsed = if elapsed_ns > 0 {
            Some(Duration::from_nanos(elapsed_ns))
        } else {
            None
        };

        ExecutionMetricsSnapshot {
            run_id,
            elapsed,
            records_scanned: self.records_scanned.load(Ordering::SeqCst),
            fields_summarized: self.fields_summarized.load(Ordering::SeqCst),
            datasets_started: self.datasets_started.load(Ordering::SeqCst),
            datasets_finished: self.datasets_finished.load(Ordering::SeqCst),
            throttle_wait: Duration::from_nanos(self.throttle_wait_ns.load(Ordering::SeqCst)),
            max_active_datasets: self.max_active_datasets.load(Ordering::SeqCst),
        }
    }
}

impl Default for ExecutionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn update_max_usize(dst: &AtomicUsize, now: usize) {
    loop {
        let cur = dst.load(Ordering::SeqCst);
        if now <= cur {
            break;
        }
        if dst.compare_exchange(cur, now, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            break;
        }
    }
}

/// Immutable snapshot of [`ExecutionMetrics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionMetricsSnapshot {
    pub run_id: u64,
    pub elapsed: Option<Duration>,
    pub records_scanned: u64,
    pub fields_summarized: u64,
    pub datasets_started: u64,
    pub datasets_finished: u64,
    pub throttle_wait: Duration,
    pub max_active_datasets: usize,
}

impl fmt::Display for ExecutionMetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run_id={}, records_scanned={}, fields_summarized={}, datasets={}/{}, max_active_datasets={}, throttle_wait={:?}, elapsed={:?}",
            self.run_id,
            self.records_scanned,
            self.fields_summarized,
            self.datasets_finished,
            self.datasets_started,
            self.max_active_datasets,
            self.throttle_wait,
            self.elapsed
        )
    }
}
