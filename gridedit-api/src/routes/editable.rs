//! Editable Grid REST API Routes
//!
//! Mounted under the grid's link:
//! - `GET  {link}` renders the grid as an HTML form
//! - `POST {link}` saves a posted edit set and reports the outcome
//! - `GET|POST {link}/editable/form/:id` serves one record's row form
//!
//! The OpenAPI paths below document the default `/grid` link.

use axum::{
    extract::{Path, State},
    response::Html,
    routing::get,
    Json, Router,
};
use gridedit_columns::{EditableGrid, SaveReport};
use serde_json::Value as JsonValue;
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::extractors::NestedForm;
use crate::state::AppState;

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// Render the grid with one input per editable cell.
#[utoipa::path(
    get,
    path = "/grid",
    tag = "Grid",
    responses(
        (status = 200, description = "Rendered grid form", body = String, content_type = "text/html"),
        (status = 500, description = "Grid misconfigured or storage unavailable", body = ApiError),
    ),
)]
pub async fn render_grid(State(grid): State<Arc<EditableGrid>>) -> ApiResult<Html<String>> {
    Ok(Html(grid.render_table()?))
}

/// Save the cell edits posted with the grid form.
///
/// Inputs are named `{grid}[{namespace}][{id}][{field}]`. Only the value
/// submitted under the grid's own name is considered; anything else in
/// the body is ignored.
#[utoipa::path(
    post,
    path = "/grid",
    tag = "Grid",
    request_body(
        content = String,
        content_type = "application/x-www-form-urlencoded",
        description = "Bracket-notation inputs, e.g. Articles[EditableColumns][5][Title]=Hi",
    ),
    responses(
        (status = 200, description = "Edit set processed", body = SaveReport),
        (status = 400, description = "Body is not a urlencoded form", body = ApiError),
        (status = 500, description = "A record failed to save", body = ApiError),
    ),
)]
pub async fn save_grid(
    State(grid): State<Arc<EditableGrid>>,
    NestedForm(tree): NestedForm,
) -> ApiResult<Json<SaveReport>> {
    let submitted = tree.get(grid.name()).cloned().unwrap_or(JsonValue::Null);
    let report = grid.save(&submitted)?;
    Ok(Json(report))
}

/// Serve the standalone edit form for one record.
#[utoipa::path(
    get,
    path = "/grid/editable/form/{id}",
    tag = "Grid",
    params(
        ("id" = String, Path, description = "Record id, decimal digits")
    ),
    responses(
        (status = 200, description = "Row form fragment", body = String, content_type = "text/html"),
        (status = 400, description = "Id is not decimal digits", body = ApiError),
        (status = 404, description = "No record with that id", body = ApiError),
    ),
)]
pub async fn row_form(
    State(grid): State<Arc<EditableGrid>>,
    Path(id): Path<String>,
) -> ApiResult<Html<String>> {
    let row = grid.handle_row_form(&id)?;
    Ok(Html(row.render()))
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the editable grid router, relative to the grid's link.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(render_grid).post(save_grid))
        .route("/editable/form/:id", get(row_form).post(row_form))
        .with_state(state)
}
