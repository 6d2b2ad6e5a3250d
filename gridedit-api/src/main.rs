//! GRIDEDIT API Server Entry Point
//!
//! Bootstraps configuration, seeds the demo repository and starts the
//! Axum HTTP server.

use axum::Router;
use gridedit_api::demo::demo_repository;
use gridedit_api::telemetry::{init_tracing, TelemetryConfig};
use gridedit_api::{build_state, create_api_router, ApiConfig, ApiError, ApiResult};

#[tokio::main]
async fn main() -> ApiResult<()> {
    let telemetry_config = TelemetryConfig::default();
    init_tracing(&telemetry_config)?;

    let api_config = ApiConfig::from_env();
    let repository = demo_repository()?;
    let state = build_state(&api_config, repository)?;

    let app: Router = create_api_router(state, &api_config);

    let addr = api_config.bind_addr()?;
    tracing::info!(%addr, "Starting GRIDEDIT API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
