//! Metrics collection and exposition.
//!
//! # Metrics
//! - `intake_submissions_total` (counter): submissions by outcome
//! - `intake_rate_limited_total` (counter): throttled submissions
//! - `intake_tracked_clients` (gauge): live rate-limit entries
//! - `intake_notifications_total` (counter): sends by channel and result
//! - `intake_request_duration_seconds` (histogram): handler latency
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_submission(outcome: &'static str, start: Instant) {
    metrics::counter!("intake_submissions_total", "outcome" => outcome).increment(1);
    metrics::histogram!("intake_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_rate_limited() {
    metrics::counter!("intake_rate_limited_total").increment(1);
}

pub fn record_tracked_clients(count: usize) {
    metrics::gauge!("intake_tracked_clients").set(count as f64);
}

pub fn record_notification(channel: &'static str, delivered: bool) {
    let result = if delivered { "delivered" } else { "failed" };
    metrics::counter!("intake_notifications_total", "channel" => channel, "result" => result)
        .increment(1);
}
