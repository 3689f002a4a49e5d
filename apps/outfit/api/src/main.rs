use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);
    observability::init_metrics();

    info!(
        project = %config.google.project_id,
        bucket = %config.outfit.storage_bucket,
        strategy = %config.outfit.strategy,
        "Configuration loaded"
    );

    let state = AppState::new(config)?;

    // Build router with API routes
    let api_routes = api::routes(&state)?;

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    // - /health: liveness check with app name/version
    // - /ready: readiness check that mints a Google access token
    // - /metrics: Prometheus exposition
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()))
        .merge(api::metrics_router())
        .layer(axum::middleware::from_fn(observability::metrics_middleware));

    info!("Starting outfit API with production-ready shutdown (30s timeout)");

    let server_config = state.config.server.clone();
    create_production_app(
        app,
        &server_config,
        Duration::from_secs(30), // 30s graceful shutdown timeout
        async move {
            // HTTP clients hold no server-side sessions; dropping them is enough
            drop(state);
            info!("Google clients released");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Outfit API shutdown complete");
    Ok(())
}
