//! Prometheus metrics, trimmed to the interpreter's own surface: request
//! volume, per-step opcode counts, and execution latency.

use crate::error::{InterpError, Result};
use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramOpts,
    HistogramVec, TextEncoder,
};

/// `POST /script` and `POST /script/stream` requests, by status.
static SCRIPT_REQUESTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "script_requests_total",
        "Total number of script execution requests received",
        &["status"]
    )
    .unwrap()
});

/// Individual step opcodes executed, by action and status.
static SCRIPT_STEP_EXECUTIONS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "script_step_executions_total",
        "Total number of step executions",
        &["action", "status"]
    )
    .unwrap()
});

/// Wall-clock duration of a full script run.
static SCRIPT_EXECUTION_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        HistogramOpts::new(
            "script_execution_duration_seconds",
            "Duration of a full script execution in seconds"
        ),
        &["status"]
    )
    .unwrap()
});

/// Register the metric families and log the configured service name.
pub fn init(service_name: &str) {
    Lazy::force(&SCRIPT_REQUESTS_TOTAL);
    Lazy::force(&SCRIPT_STEP_EXECUTIONS_TOTAL);
    Lazy::force(&SCRIPT_EXECUTION_DURATION);
    tracing::info!(service = service_name, "telemetry initialized");
}

pub fn record_script_request(status: &str) {
    SCRIPT_REQUESTS_TOTAL.with_label_values(&[status]).inc();
}

pub fn record_step_execution(action: &str, status: &str) {
    SCRIPT_STEP_EXECUTIONS_TOTAL.with_label_values(&[action, status]).inc();
}

pub fn record_script_duration(status: &str, duration_secs: f64) {
    SCRIPT_EXECUTION_DURATION.with_label_values(&[status]).observe(duration_secs);
}

/// Render all registered metrics for `GET /metrics`.
pub fn metrics_text() -> Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| InterpError::unknown(format!("failed to encode metrics: {e}")))?;

    String::from_utf8(buffer)
        .map_err(|e| InterpError::unknown(format!("failed to convert metrics to UTF-8: {e}")))
}
