//! Running accounting of backend calls.

// Author: kelexine (https://github.com/kelexine)

use parking_lot::Mutex;
use serde::Serialize;

/// Counters over every backend attempt.
///
/// `total_calls == successful_calls + failed_calls` always holds, and
/// `average_response_time` is the incremental mean over successful calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub total_calls: u64,
    pub successful_calls: u64,
    pub failed_calls: u64,
    /// Milliseconds.
    pub average_response_time: f64,
}

impl PerformanceMetrics {
    pub fn success_rate(&self) -> f64 {
        if self.total_calls == 0 {
            0.0
        } else {
            self.successful_calls as f64 / self.total_calls as f64 * 100.0
        }
    }
}

#[derive(Debug, Default)]
pub struct MetricsRecorder {
    metrics: Mutex<PerformanceMetrics>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one backend attempt.
    pub fn record(&self, success: bool, duration_ms: f64) {
        let mut metrics = self.metrics.lock();
        metrics.total_calls += 1;
        if success {
            metrics.successful_calls += 1;
            let n = metrics.successful_calls as f64;
            metrics.average_response_time += (duration_ms - metrics.average_response_time) / n;
        } else {
            metrics.failed_calls += 1;
        }
    }

    pub fn snapshot(&self) -> PerformanceMetrics {
        self.metrics.lock().clone()
    }

    pub fn reset(&self) {
        *self.metrics.lock() = PerformanceMetrics::default();
    }
}
