//! GRIDEDIT API - HTTP Surface for Editable Grids
//!
//! Serves one configured grid over Axum:
//! - the rendered grid and its batch save at the grid's link
//! - per-record row forms at `{link}/editable/form/:id`
//! - health checks under `/health` and the OpenAPI document

pub mod config;
pub mod demo;
pub mod error;
pub mod extractors;
pub mod macros;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod telemetry;

use std::sync::Arc;

use gridedit_columns::EditableGrid;
use gridedit_storage::RecordRepository;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use extractors::NestedForm;
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use state::AppState;

/// Build the application state for `config`, serving the configured grid
/// over `repository`.
pub fn build_state(
    config: &ApiConfig,
    repository: Arc<dyn RecordRepository>,
) -> ApiResult<AppState> {
    let grid_config = config.load_grid_config(demo::demo_grid_config()?)?;
    let grid = EditableGrid::from_config(&grid_config, repository)?;

    tracing::info!(
        grid = %grid.name(),
        link = %grid.link(),
        columns = grid.column_names().count(),
        "Grid configured"
    );
    Ok(AppState::new(grid))
}
