use axum::Router;
use axum::routing::get;

pub mod health;
pub mod recommendations;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
pub fn routes(state: &crate::state::AppState) -> eyre::Result<Router> {
    Ok(Router::new().nest("/recommendations", recommendations::router(state)?))
}

/// Creates a router with the /ready endpoint that performs actual dependency checks.
///
/// This router has state applied and can be merged with the stateless app router
/// from `create_router`.
pub fn ready_router(state: crate::state::AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

/// Prometheus scrape endpoint.
pub fn metrics_router() -> Router {
    Router::new().route("/metrics", get(observability::metrics_handler))
}
