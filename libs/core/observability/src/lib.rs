//! Observability utilities for the outfit service.
//!
//! - Prometheus metrics recording and export
//! - Recommendation-flow metrics
//! - Axum middleware for automatic request metrics
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler, RecommendationMetrics};
//!
//! init_metrics();
//! RecommendationMetrics::record_outcome("category_rule", "success");
//!
//! let app = Router::new().route("/metrics", get(metrics_handler));
//! ```

pub mod middleware;
pub mod recommendations;

pub use middleware::metrics_middleware;
pub use recommendations::RecommendationMetrics;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::{info, warn};

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Initialize the Prometheus metrics recorder.
///
/// Call once at startup; later calls return the same handle. If another
/// global recorder is already installed, a warning is logged and the returned
/// handle renders only what this recorder sees (nothing).
pub fn init_metrics() -> &'static PrometheusHandle {
    METRICS_HANDLE.get_or_init(|| {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        match metrics::set_global_recorder(recorder) {
            Ok(()) => info!("Prometheus metrics recorder initialized"),
            Err(e) => warn!("Metrics recorder already installed: {}", e),
        }

        register_metric_descriptions();

        handle
    })
}

/// Get the metrics handle (must call init_metrics first)
pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for /metrics endpoint
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

fn register_metric_descriptions() {
    use metrics::{describe_counter, describe_histogram};

    // HTTP metrics
    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "Total number of HTTP request errors"
    );

    // Recommendation metrics
    describe_counter!(
        "outfit_recommendations_total",
        "Recommendation requests by strategy and outcome"
    );
    describe_histogram!(
        "outfit_collaborator_duration_seconds",
        "Latency of calls to external collaborators"
    );
    describe_counter!(
        "outfit_collaborator_errors_total",
        "Failed calls to external collaborators"
    );
    describe_histogram!(
        "outfit_labels_detected",
        "Number of labels returned per image"
    );
    describe_counter!(
        "outfit_missing_neighbor_items_total",
        "Similarity neighbors with no matching store record"
    );
}
