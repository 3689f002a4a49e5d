//! Readiness check against the Google token source.

use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

/// Readiness check endpoint.
///
/// Every collaborator call needs a bearer token, so being able to mint one
/// is what "ready" means here.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "google_auth",
        Box::pin(async {
            state
                .auth
                .access_token()
                .await
                .map(|_| ())
                .map_err(|e| format!("Token acquisition failed: {}", e))
        }),
    )];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}
