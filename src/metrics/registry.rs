// Prometheus metrics registry and collectors
// Author: kelexine (https://github.com/kelexine)

use lazy_static::lazy_static;
use prometheus::{
    CounterVec, Gauge, HistogramVec, Opts, Registry, TextEncoder, Encoder,
    register_counter_vec_with_registry, register_gauge_with_registry,
    register_histogram_vec_with_registry,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // BACKEND METRICS
    // ============================================================================

    /// Backend attempts by model and outcome
    pub static ref BACKEND_CALLS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("backend_calls_total", "Total inference backend attempts"),
        &["model", "outcome"], // outcome: success, failure
        REGISTRY
    ).unwrap();

    /// Latency of successful backend attempts
    pub static ref BACKEND_CALL_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("backend_call_duration_seconds", "Successful backend call duration")
            .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["model"],
        REGISTRY
    ).unwrap();

    /// Retry loop decisions
    pub static ref RETRY_EVENTS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("retry_events_total", "Retry, fallback and exhaustion events"),
        &["kind"], // kind: fallback, backoff, exhausted
        REGISTRY
    ).unwrap();

    // ============================================================================
    // CACHE METRICS
    // ============================================================================

    /// Cache operations
    pub static ref CACHE_OPERATIONS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("cache_operations_total", "Total cache operations"),
        &["operation"], // operation: hit, miss
        REGISTRY
    ).unwrap();

    /// Current cache entries
    pub static ref CACHE_ENTRIES: Gauge = register_gauge_with_registry!(
        Opts::new("cache_entries_current", "Current number of cache entries"),
        REGISTRY
    ).unwrap();

    // ============================================================================
    // CONVERSATION METRICS
    // ============================================================================

    pub static ref CONVERSATION_SESSIONS: Gauge = register_gauge_with_registry!(
        Opts::new("conversation_sessions_current", "Conversation sessions held in memory"),
        REGISTRY
    ).unwrap();
}

/// Gather all metrics and return as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
