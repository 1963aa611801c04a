//! Run statistics: monotonic counters fed by every pipeline stage.
//!
//! Counters are incremented atomically from the splitter, workers, and the
//! writer, and read only after the pipeline has fully drained. The
//! accumulator is scoped to one run and passed explicitly, so concurrent
//! runs (for example in tests) never interfere.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;

/// Thread-safe statistics accumulator for one pipeline run.
#[derive(Debug)]
pub struct RunStats {
    bytes_read: AtomicU64,
    records_read: AtomicU64,
    records_written: AtomicU64,
    malformed_records: AtomicU64,
    started: Instant,
}

impl RunStats {
    /// Create a fresh accumulator; the run clock starts now.
    pub fn new() -> Self {
        Self {
            bytes_read: AtomicU64::new(0),
            records_read: AtomicU64::new(0),
            records_written: AtomicU64::new(0),
            malformed_records: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    pub fn add_bytes_read(&self, bytes: u64) {
        self.bytes_read.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn add_records_read(&self, count: u64) {
        self.records_read.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_records_written(&self, count: u64) {
        self.records_written.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_malformed_records(&self, count: u64) {
        self.malformed_records.fetch_add(count, Ordering::Relaxed);
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read.load(Ordering::Relaxed)
    }

    pub fn records_read(&self) -> u64 {
        self.records_read.load(Ordering::Relaxed)
    }

    pub fn records_written(&self) -> u64 {
        self.records_written.load(Ordering::Relaxed)
    }

    pub fn malformed_records(&self) -> u64 {
        self.malformed_records.load(Ordering::Relaxed)
    }

    /// Wall-clock time since the accumulator was created.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Take a point-in-time snapshot of all counters.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            bytes_read: self.bytes_read(),
            records_read: self.records_read(),
            records_written: self.records_written(),
            malformed_records: self.malformed_records(),
            elapsed: self.elapsed(),
        }
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Final statistics for a completed (or aborted) run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub bytes_read: u64,
    pub records_read: u64,
    pub records_written: u64,
    pub malformed_records: u64,
    pub elapsed: Duration,
}

impl RunSummary {
    /// Processing rate in records per second.
    pub fn records_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.records_read as f64 / secs
        } else {
            0.0
        }
    }

    /// Processing rate in bytes per second.
    pub fn bytes_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.bytes_read as f64 / secs
        } else {
            0.0
        }
    }
}
