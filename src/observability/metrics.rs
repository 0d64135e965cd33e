//! Metrics collection and exposition.
//!
//! # Metrics
//! - `site_requests_total` (counter): requests by route, status
//! - `site_request_duration_seconds` (histogram): latency by route
//! - `site_content_reloads_total` (counter): snapshots published after a change
//! - `site_content_documents` (gauge): documents in the live snapshot
//!
//! # Design Decisions
//! - Route labels come from `RouteKind`, never from raw paths
//! - Recording without an installed exporter is a no-op

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::routing::RouteKind;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled page request.
pub fn record_request(route: RouteKind, status: u16, start_time: Instant) {
    let route = route.as_str();
    metrics::counter!("site_requests_total", "route" => route, "status" => status.to_string())
        .increment(1);
    metrics::histogram!("site_request_duration_seconds", "route" => route)
        .record(start_time.elapsed().as_secs_f64());
}

/// Record a published content snapshot.
pub fn record_content_reload(documents: usize) {
    metrics::counter!("site_content_reloads_total").increment(1);
    metrics::gauge!("site_content_documents").set(documents as f64);
}
