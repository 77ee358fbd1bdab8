//! Metrics and observability utilities
//!
//! Prometheus metrics with standardized naming conventions.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all Socratic metrics
pub const METRICS_PREFIX: &str = "socratic";

/// Histogram buckets for outbound provider latency (in seconds)
pub const UPSTREAM_BUCKETS: &[f64] = &[
    0.050,  // 50ms
    0.100,  // 100ms
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
    2.000,  // 2s
    5.000,  // 5s
    10.00,  // 10s
    30.00,  // 30s
];

/// Register all metric descriptions
pub fn register_metrics() {
    // Request metrics
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    // Search metrics
    describe_counter!(
        format!("{}_source_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total outbound search provider requests"
    );

    describe_histogram!(
        format!("{}_source_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Search provider latency in seconds"
    );

    describe_histogram!(
        format!("{}_source_results", METRICS_PREFIX),
        Unit::Count,
        "Results returned per search provider call"
    );

    describe_counter!(
        format!("{}_aggregations_total", METRICS_PREFIX),
        Unit::Count,
        "Aggregated resource searches by outcome"
    );

    // Tutor metrics
    describe_counter!(
        format!("{}_tutor_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total chat-completion requests"
    );

    describe_histogram!(
        format!("{}_tutor_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Chat-completion latency in seconds"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Helper to record a single search provider call
pub fn record_source(source: &str, duration_secs: f64, result_count: usize, success: bool) {
    let status = if success { "success" } else { "error" };

    counter!(
        format!("{}_source_requests_total", METRICS_PREFIX),
        "source" => source.to_string(),
        "status" => status
    )
    .increment(1);

    histogram!(
        format!("{}_source_duration_seconds", METRICS_PREFIX),
        "source" => source.to_string()
    )
    .record(duration_secs);

    if success {
        histogram!(
            format!("{}_source_results", METRICS_PREFIX),
            "source" => source.to_string()
        )
        .record(result_count as f64);
    }
}

/// Helper to record the outcome of an aggregated search
pub fn record_aggregation(found_any: bool) {
    let outcome = if found_any { "results" } else { "empty" };

    counter!(
        format!("{}_aggregations_total", METRICS_PREFIX),
        "outcome" => outcome
    )
    .increment(1);
}

/// Helper to record chat-completion metrics
pub fn record_tutor(duration_secs: f64, model: &str, success: bool) {
    let status = if success { "success" } else { "error" };

    counter!(
        format!("{}_tutor_requests_total", METRICS_PREFIX),
        "model" => model.to_string(),
        "status" => status
    )
    .increment(1);

    if success {
        histogram!(
            format!("{}_tutor_duration_seconds", METRICS_PREFIX),
            "model" => model.to_string()
        )
        .record(duration_secs);
    }
}
