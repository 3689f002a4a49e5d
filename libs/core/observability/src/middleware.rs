//! Axum middleware for automatic HTTP request metrics.

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{Request, Response},
    middleware::Next,
};
use metrics::{counter, histogram};
use std::time::Instant;

/// Requests to these paths are not recorded (scrapes and health checks would drown real traffic).
const UNRECORDED_PATHS: [&str; 3] = ["/metrics", "/health", "/ready"];

/// `path` label shared by every request that matched no route.
const UNMATCHED_PATH: &str = "unmatched";

/// Classify a status code into its `Nxx` bucket.
fn status_class(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

/// Middleware recording per-route HTTP metrics.
///
/// - `http_requests_total{method, path, status_class}`
/// - `http_request_duration_seconds{method, path}`
/// - `http_requests_errors_total{method, path, status}` for 4xx/5xx
///
/// `path` is the matched route template, so path parameters don't explode cardinality.
/// Requests that match no route are all recorded under `path="unmatched"`.
///
/// ```rust,ignore
/// let app = Router::new()
///     .nest("/api", api)
///     .layer(axum::middleware::from_fn(observability::metrics_middleware));
/// ```
pub async fn metrics_middleware(
    matched_path: Option<MatchedPath>,
    request: Request<Body>,
    next: Next,
) -> Response<Body> {
    if UNRECORDED_PATHS.contains(&request.uri().path()) {
        return next.run(request).await;
    }

    let path = matched_path
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_PATH.to_string());

    let method = request.method().to_string();
    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed = start.elapsed();

    let status = response.status();
    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status_class" => status_class(status.as_u16())
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method.clone(),
        "path" => path.clone()
    )
    .record(elapsed.as_secs_f64());

    if status.is_client_error() || status.is_server_error() {
        counter!(
            "http_requests_errors_total",
            "method" => method,
            "path" => path,
            "status" => status.as_u16().to_string()
        )
        .increment(1);
    }

    response
}
