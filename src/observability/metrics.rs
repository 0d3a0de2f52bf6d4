//! Metrics collection and exposition.
//!
//! # Metrics
//! - `shell_navigations_total` (counter): requests by route and outcome
//! - `shell_request_duration_seconds` (histogram): handler latency by outcome
//! - `shell_config_reloads_total` (counter): reloads by result
//!
//! # Design Decisions
//! - Without an installed recorder every call is a no-op
//! - Route labels are the static route names, so cardinality stays bounded

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Outcome label: the shell page was served.
pub const OUTCOME_SHELL: &str = "shell";
/// Outcome label: redirected to another location.
pub const OUTCOME_REDIRECT: &str = "redirect";
/// Outcome label: method other than GET/HEAD.
pub const OUTCOME_REJECTED: &str = "rejected";

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one navigation request.
pub fn record_navigation(route: &'static str, outcome: &'static str, start: Instant) {
    counter!("shell_navigations_total", "route" => route, "outcome" => outcome).increment(1);
    histogram!("shell_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Record a configuration reload attempt.
pub fn record_config_reload(success: bool) {
    let result = if success { "success" } else { "failure" };
    counter!("shell_config_reloads_total", "result" => result).increment(1);
}
