// src/metrics.rs
//! Prometheus wiring for the service.

use axum::{routing::get, Router};
use metrics::gauge;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the global Prometheus recorder and publish the configured refresh
/// period as a static gauge. Call once at startup, before any counters fire.
pub fn install(refresh_secs: u64) -> PrometheusHandle {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("prometheus: install recorder");
    gauge!("dashboard_refresh_period_secs").set(refresh_secs as f64);
    handle
}

/// Router exposing `/metrics` in the Prometheus exposition format.
pub fn router(handle: PrometheusHandle) -> Router {
    Router::new().route(
        "/metrics",
        get(move || {
            let h = handle.clone();
            async move { h.render() }
        }),
    )
}
