//! REST API Route Handlers
//!
//! Assembles the editable grid routes, health checks and the OpenAPI
//! document into one router.

pub mod editable;
pub mod health;

use axum::{
    http::{header, Method, HeaderValue},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::config::ApiConfig;
use crate::error::{ApiError, ErrorCode};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Handler for /openapi.json endpoint.
async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Fallback for unmatched paths.
async fn not_found() -> ApiError {
    ApiError::from_code(ErrorCode::RouteNotFound)
}

/// Create the complete API router.
///
/// The editable grid routes are mounted at the grid's link; a grid with
/// an empty link is served from the root.
pub fn create_api_router(state: AppState, config: &ApiConfig) -> Router {
    let link = state.grid.link().to_string();
    let editable = editable::create_router(state.clone());

    let router = Router::new()
        .nest("/health", health::create_router(state))
        .route("/openapi.json", get(openapi_json));

    let router = if link.is_empty() {
        router.merge(editable)
    } else {
        router.nest(&link, editable)
    };

    tracing::info!(link = %link, "Editable grid routes mounted");

    router
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(config))
}

fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if config.cors_origins.is_empty() {
        // Development mode: allow all origins
        tracing::info!("CORS: Development mode - allowing all origins");
        cors.allow_origin(Any).allow_headers(Any)
    } else {
        tracing::info!(
            "CORS: Production mode - allowing origins: {:?}",
            config.cors_origins
        );
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        if config.cors_allow_credentials {
            cors.allow_origin(origins).allow_credentials(true)
        } else {
            cors.allow_origin(origins)
        }
    }
}
