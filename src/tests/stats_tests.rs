//! Tests for the statistics collector.

use std::sync::Arc;
use std::thread;

use crate::stats::RunStats;

#[test]
fn counters_start_at_zero() {
    let stats = RunStats::new();
    let summary = stats.summary();
    assert_eq!(summary.bytes_read, 0);
    assert_eq!(summary.records_read, 0);
    assert_eq!(summary.records_written, 0);
    assert_eq!(summary.malformed_records, 0);
}

#[test]
fn counters_accumulate() {
    let stats = RunStats::new();
    stats.add_bytes_read(100);
    stats.add_bytes_read(28);
    stats.add_records_read(5);
    stats.add_records_written(4);
    stats.add_malformed_records(1);

    let summary = stats.summary();
    assert_eq!(summary.bytes_read, 128);
    assert_eq!(summary.records_read, 5);
    assert_eq!(summary.records_written, 4);
    assert_eq!(summary.malformed_records, 1);
}

#[test]
fn concurrent_increments_are_not_lost() {
    let stats = Arc::new(RunStats::new());
    let mut handles = Vec::new();
    for _ in 0..4 {
        let stats = stats.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..1000 {
                stats.add_records_read(1);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(stats.records_read(), 4000);
}

#[test]
fn rates_are_finite_and_nonnegative() {
    let stats = RunStats::new();
    stats.add_records_read(10);
    stats.add_bytes_read(1000);
    let summary = stats.summary();
    assert!(summary.records_per_second() >= 0.0);
    assert!(summary.bytes_per_second() >= 0.0);
    assert!(summary.records_per_second().is_finite());
}

#[test]
fn separate_runs_do_not_interfere() {
    let a = RunStats::new();
    let b = RunStats::new();
    a.add_records_read(7);
    assert_eq!(b.records_read(), 0);
}
