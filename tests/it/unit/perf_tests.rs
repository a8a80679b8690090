//! Unit tests for the perf module.

use crate::helpers::dogs_session;
use civicboard::perf::{OperationStats, PipelineMonitor, ScopedTimer, measure};

#[test]
fn test_pipeline_monitor_records_stages() {
    let mut monitor = PipelineMonitor::new();
    monitor.begin_pass();
    let value = monitor.stage("filter", || 21 * 2);
    monitor.record_stage("draw", 3.0);
    let elapsed = monitor.end_pass();

    assert_eq!(value, 42);
    assert!(elapsed.unwrap() >= 0.0);
    assert_eq!(monitor.total_passes(), 1);
    assert_eq!(monitor.last_pass_stages().len(), 2);
    assert_eq!(monitor.stage_stats("draw").unwrap().count(), 1);
}

#[test]
fn test_slow_pass_percentage() {
    let mut monitor = PipelineMonitor::with_budget(10.0);
    monitor.record_pass(5.0);
    monitor.record_pass(25.0);
    monitor.record_pass(8.0);
    monitor.record_pass(30.0);
    assert_eq!(monitor.total_passes(), 4);
    assert_eq!(monitor.slow_pass_percentage(), 50.0);
    assert_eq!(monitor.max_pass_time(), 30.0);

    monitor.reset();
    assert_eq!(monitor.total_passes(), 0);
    assert_eq!(monitor.average_pass_time(), 0.0);
}

#[test]
fn test_operation_stats() {
    let mut stats = OperationStats::default();
    for ms in [1.0, 2.0, 3.0, 4.0] {
        stats.record(ms);
    }
    assert_eq!(stats.count(), 4);
    assert_eq!(stats.average(), 2.5);
    assert_eq!(stats.min_ms(), 1.0);
    assert_eq!(stats.max_ms(), 4.0);
}

#[test]
fn test_scoped_timer_and_measure() {
    let timer = ScopedTimer::new("test_op", 1000.0);
    assert_eq!(timer.name(), "test_op");
    assert!(timer.elapsed_ms() >= 0.0);

    let (value, ms) = measure(|| "done");
    assert_eq!(value, "done");
    assert!(ms >= 0.0);
}

#[test]
fn test_session_passes_are_timed() {
    let session = dogs_session();
    session.run_pass(&[]);
    session.run_pass(&[]);
    session.with_monitor(|monitor| {
        assert_eq!(monitor.total_passes(), 2);
        assert_eq!(monitor.stage_stats("filter").unwrap().count(), 2);
        assert!(monitor.stage_stats("highlights").is_some());
    });
}
