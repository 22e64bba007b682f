//! Prometheus metrics export and job-level counters.

use axum::response::IntoResponse;
use metrics::counter;
use std::sync::OnceLock;

static PROMETHEUS_HANDLE: OnceLock<metrics_exporter_prometheus::PrometheusHandle> = OnceLock::new();

/// Initialize the Prometheus metrics recorder.
///
/// Must be called once during application startup before any metrics are
/// recorded.
pub fn init_metrics() {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder");

    if PROMETHEUS_HANDLE.set(handle).is_err() {
        panic!("Prometheus handle already initialized");
    }
}

/// Prometheus exposition endpoint handler.
pub async fn metrics_handler() -> impl IntoResponse {
    if let Some(handle) = PROMETHEUS_HANDLE.get() {
        let output = handle.render();
        (
            axum::http::StatusCode::OK,
            [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            output,
        )
    } else {
        (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            [(axum::http::header::CONTENT_TYPE, "text/plain")],
            "Metrics not initialized".to_string(),
        )
    }
}

/// Count payment rows created by the generator.
pub fn record_payments_generated(count: u64) {
    counter!("payments_generated_total").increment(count);
}

/// Count reminder sends per channel and outcome.
pub fn record_reminder_send(channel: &str, success: bool) {
    counter!(
        "reminders_sent_total",
        "channel" => channel.to_string(),
        "outcome" => if success { "sent" } else { "failed" }
    )
    .increment(1);
}

/// Count payments swept to LATE.
pub fn record_payments_marked_late(count: u64) {
    counter!("payments_marked_late_total").increment(count);
}

/// Count leases swept to ended.
pub fn record_leases_ended(count: u64) {
    counter!("leases_ended_total").increment(count);
}
