//! Observability utilities for the todo service.
//!
//! - Prometheus recorder installation and `/metrics` rendering
//! - Axum middleware for request metrics
//! - [`TodoMetrics`] for per-operation service metrics
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler};
//!
//! init_metrics();
//! let app = Router::new().route("/metrics", get(metrics_handler));
//! ```

pub mod middleware;
pub mod todos;

pub use middleware::metrics_middleware;
pub use todos::TodoMetrics;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::{info, warn};

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder once for the process.
///
/// Returns `None` if another recorder was installed first, in which case
/// metrics are still recorded through that recorder but not rendered here.
pub fn init_metrics() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE
        .get_or_try_init(|| {
            let handle = PrometheusBuilder::new().install_recorder()?;
            info!("Prometheus metrics recorder initialized");
            register_metric_descriptions();
            Ok::<_, metrics_exporter_prometheus::BuildError>(handle)
        })
        .inspect_err(|e| warn!(error = %e, "Failed to install Prometheus recorder"))
        .ok()
}

pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for the `/metrics` endpoint
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

fn register_metric_descriptions() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "Total number of HTTP requests answered with 4xx or 5xx"
    );

    describe_counter!(
        "todo_operations_total",
        "Todo service operations by method and outcome"
    );
    describe_histogram!(
        "todo_operation_duration_seconds",
        "Todo service operation duration in seconds"
    );
}
