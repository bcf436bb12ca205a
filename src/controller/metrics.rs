//! Metrics controller and service counters.

use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

use crate::http::Controller;

pub const PROMETHEUS_METRICS_PATH: &str = "/metrics";

const REQUESTS_TOTAL: &str = "badges_requests_total";
const ERRORS_TOTAL: &str = "badges_errors_total";

/// Global Prometheus handle for rendering metrics.
static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Installs the global Prometheus recorder.
///
/// Call once from `main()` before the tokio runtime starts.
pub fn init_prometheus_exporter() -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("failed to install Prometheus recorder: {}", e))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("Prometheus handle already initialized"))?;

    Ok(())
}

/// Counts a handled request by route.
pub fn inc_request(route: &'static str) {
    ::metrics::counter!(REQUESTS_TOTAL, "route" => route).increment(1);
}

/// Counts a failed request by error kind.
pub fn inc_error(kind: &'static str) {
    ::metrics::counter!(ERRORS_TOTAL, "kind" => kind).increment(1);
}

/// PrometheusMetricsController exposes the metrics in text format.
pub struct PrometheusMetricsController;

impl PrometheusMetricsController {
    pub fn new() -> Self {
        Self
    }

    async fn get_metrics() -> impl IntoResponse {
        let body = match PROMETHEUS_HANDLE.get() {
            Some(handle) => handle.render(),
            None => "# metrics recorder is not installed\n".to_string(),
        };

        (
            StatusCode::OK,
            [("content-type", "text/plain; charset=utf-8")],
            body,
        )
    }
}

impl Default for PrometheusMetricsController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for PrometheusMetricsController {
    fn add_route(&self, router: Router) -> Router {
        router.route(PROMETHEUS_METRICS_PATH, get(Self::get_metrics))
    }
}
