// Metrics module: in-process call accounting plus Prometheus export
// Author: kelexine (https://github.com/kelexine)

mod recorder;
mod registry;

pub use recorder::{MetricsRecorder, PerformanceMetrics};
pub use registry::{
    gather_metrics,
    BACKEND_CALLS,
    BACKEND_CALL_DURATION,
    CACHE_OPERATIONS,
    CACHE_ENTRIES,
    RETRY_EVENTS,
    CONVERSATION_SESSIONS,
};

/// Helper to record a backend attempt
pub fn record_backend_call(model: &str, success: bool, duration_secs: f64) {
    let outcome = if success { "success" } else { "failure" };
    BACKEND_CALLS.with_label_values(&[model, outcome]).inc();

    if success {
        BACKEND_CALL_DURATION
            .with_label_values(&[model])
            .observe(duration_secs);
    }
}

/// Helper to record cache operations
pub fn record_cache_hit() {
    CACHE_OPERATIONS.with_label_values(&["hit"]).inc();
}

pub fn record_cache_miss() {
    CACHE_OPERATIONS.with_label_values(&["miss"]).inc();
}

pub fn update_cache_entries(count: usize) {
    CACHE_ENTRIES.set(count as f64);
}

/// Helper to record retry decisions (`fallback`, `backoff`, `exhausted`)
pub fn record_retry_event(kind: &str) {
    RETRY_EVENTS.with_label_values(&[kind]).inc();
}

pub fn update_conversation_sessions(count: usize) {
    CONVERSATION_SESSIONS.set(count as f64);
}
