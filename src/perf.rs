//! Pipeline timing.
//!
//! Every filter change runs one synchronous pass (filter → kpis → draw →
//! highlights). [`PipelineMonitor`] times passes and their stages so slow
//! datasets show up in the logs; [`ScopedTimer`] guards one-off work such as
//! loading.
//!
//! Build with `--features profiling` to get `trace!` lines from
//! [`profile_scope!`](crate::profile_scope) around hot functions.

use crate::constants::PASS_WARN_MS;
use std::collections::{HashMap, VecDeque};
use std::time::Instant;
use tracing::{debug, warn};

/// Passes kept for the rolling pass average
const PASS_WINDOW: usize = 60;

/// Samples kept per stage
const STAGE_WINDOW: usize = 100;

/// A pass counts as slow past this multiple of the budget
const SLOW_FACTOR: f64 = 2.0;

/// Threshold used by `profile_scope!` when none is given
pub const PROFILE_THRESHOLD_MS: f64 = 1.0;

/// Time the rest of the enclosing scope. Expands to nothing unless the
/// `profiling` feature is on.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::traced($name, $crate::perf::PROFILE_THRESHOLD_MS);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::traced($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

/// Fixed-capacity sample window with a running sum.
#[derive(Debug, Clone)]
struct Window {
    samples: VecDeque<f64>,
    capacity: usize,
    sum: f64,
}

impl Window {
    fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            sum: 0.0,
        }
    }

    fn push(&mut self, ms: f64) {
        if self.samples.len() == self.capacity {
            if let Some(old) = self.samples.pop_front() {
                self.sum -= old;
            }
        }
        self.samples.push_back(ms);
        self.sum += ms;
    }

    fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.sum / self.samples.len() as f64
        }
    }

    fn percentile(&self, p: f64) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let mut sorted: Vec<f64> = self.samples.iter().copied().collect();
        sorted.sort_by(f64::total_cmp);
        let idx = ((sorted.len() as f64) * p).floor() as usize;
        sorted[idx.min(sorted.len() - 1)]
    }

    fn max(&self) -> f64 {
        self.samples.iter().copied().fold(0.0, f64::max)
    }

    fn clear(&mut self) {
        self.samples.clear();
        self.sum = 0.0;
    }
}

/// Rolling statistics for one pipeline stage.
#[derive(Debug, Clone)]
pub struct OperationStats {
    window: Window,
    count: u64,
    min_ms: f64,
    max_ms: f64,
}

impl Default for OperationStats {
    fn default() -> Self {
        Self {
            window: Window::new(STAGE_WINDOW),
            count: 0,
            min_ms: f64::INFINITY,
            max_ms: 0.0,
        }
    }
}

impl OperationStats {
    pub fn record(&mut self, ms: f64) {
        self.window.push(ms);
        self.count += 1;
        self.min_ms = self.min_ms.min(ms);
        self.max_ms = self.max_ms.max(ms);
    }

    /// Mean over the recent window.
    pub fn average(&self) -> f64 {
        self.window.mean()
    }

    /// 95th percentile over the recent window.
    pub fn p95(&self) -> f64 {
        self.window.percentile(0.95)
    }

    /// Samples recorded since creation, including ones that left the window.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn min_ms(&self) -> f64 {
        if self.count == 0 { 0.0 } else { self.min_ms }
    }

    pub fn max_ms(&self) -> f64 {
        self.max_ms
    }
}

/// One stage timing inside the current pass.
#[derive(Debug, Clone)]
pub struct StageTiming {
    pub name: &'static str,
    pub elapsed_ms: f64,
}

/// Pass durations and per-stage statistics across pipeline passes.
#[derive(Debug)]
pub struct PipelineMonitor {
    budget_ms: f64,
    passes: Window,
    pass_start: Option<Instant>,
    total_passes: u64,
    slow_passes: u64,
    stages: HashMap<&'static str, OperationStats>,
    current: Vec<StageTiming>,
}

impl Default for PipelineMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineMonitor {
    pub fn new() -> Self {
        Self::with_budget(PASS_WARN_MS)
    }

    /// Monitor with a custom per-pass budget in milliseconds.
    pub fn with_budget(budget_ms: f64) -> Self {
        Self {
            budget_ms,
            passes: Window::new(PASS_WINDOW),
            pass_start: None,
            total_passes: 0,
            slow_passes: 0,
            stages: HashMap::new(),
            current: Vec::new(),
        }
    }

    pub fn begin_pass(&mut self) {
        self.pass_start = Some(Instant::now());
        self.current.clear();
    }

    /// Finish the current pass and return its duration. `None` when no pass
    /// was started.
    pub fn end_pass(&mut self) -> Option<f64> {
        let start = self.pass_start.take()?;
        let ms = start.elapsed().as_secs_f64() * 1000.0;
        self.record_pass(ms);
        Some(ms)
    }

    /// Record a pass duration measured elsewhere.
    pub fn record_pass(&mut self, ms: f64) {
        self.passes.push(ms);
        self.total_passes += 1;

        if ms > self.budget_ms * SLOW_FACTOR {
            self.slow_passes += 1;
            warn!(
                pass_ms = format!("{:.2}", ms),
                budget_ms = format!("{:.2}", self.budget_ms),
                "Slow pipeline pass"
            );
            for stage in &self.current {
                debug!(stage = stage.name, elapsed_ms = format!("{:.2}", stage.elapsed_ms), "Pass stage");
            }
        }
    }

    pub fn record_stage(&mut self, name: &'static str, elapsed_ms: f64) {
        self.stages.entry(name).or_default().record(elapsed_ms);
        self.current.push(StageTiming { name, elapsed_ms });
    }

    /// Run `f` as a named stage of the current pass.
    pub fn stage<T, F: FnOnce() -> T>(&mut self, name: &'static str, f: F) -> T {
        let (result, elapsed_ms) = measure(f);
        self.record_stage(name, elapsed_ms);
        result
    }

    pub fn average_pass_time(&self) -> f64 {
        self.passes.mean()
    }

    pub fn max_pass_time(&self) -> f64 {
        self.passes.max()
    }

    pub fn total_passes(&self) -> u64 {
        self.total_passes
    }

    /// Share of passes over the slow threshold, in percent.
    pub fn slow_pass_percentage(&self) -> f64 {
        if self.total_passes == 0 {
            return 0.0;
        }
        self.slow_passes as f64 / self.total_passes as f64 * 100.0
    }

    pub fn stage_stats(&self, name: &str) -> Option<&OperationStats> {
        self.stages.get(name)
    }

    /// Stages of the most recent pass, in execution order.
    pub fn last_pass_stages(&self) -> &[StageTiming] {
        &self.current
    }

    pub fn reset(&mut self) {
        self.passes.clear();
        self.pass_start = None;
        self.total_passes = 0;
        self.slow_passes = 0;
        self.stages.clear();
        self.current.clear();
    }
}

/// Warns on drop when the guarded scope ran past its threshold.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
    traced: bool,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
            traced: false,
        }
    }

    /// Timer that reports at `trace` level instead of `warn`.
    pub fn traced(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            traced: true,
            ..Self::new(name, threshold_ms)
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        if elapsed_ms <= self.threshold_ms {
            return;
        }
        if self.traced {
            tracing::trace!(operation = self.name, elapsed_ms = format!("{:.2}", elapsed_ms), "Scope");
        } else {
            warn!(
                operation = self.name,
                elapsed_ms = format!("{:.2}", elapsed_ms),
                threshold_ms = format!("{:.2}", self.threshold_ms),
                "Slow operation"
            );
        }
    }
}

/// Run `f` and return its result with the elapsed milliseconds.
#[inline]
pub fn measure<T, F: FnOnce() -> T>(f: F) -> (T, f64) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed().as_secs_f64() * 1000.0)
}
