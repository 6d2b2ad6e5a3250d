//! OpenAPI Specification for the GRIDEDIT API
//!
//! Generated with utoipa from route annotations and schema derives.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::{editable, health};
use crate::routes::health::{ComponentHealth, HealthDetails, HealthResponse, HealthStatus};
use gridedit_columns::{SaveReport, SkipReason, SkippedEntry};

/// OpenAPI document for the GRIDEDIT API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "GRIDEDIT API",
        version = "0.1.0",
        description = "Inline-editable record grids: rendering, row forms and batch saves",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local Development")
    ),
    tags(
        (name = "Grid", description = "Editable grid rendering, row forms and batch saves"),
        (name = "Health", description = "Liveness and readiness checks")
    ),
    paths(
        editable::render_grid,
        editable::save_grid,
        editable::row_form,
        health::ping,
        health::liveness,
        health::readiness,
    ),
    components(schemas(
        ApiError,
        ErrorCode,
        SaveReport,
        SkippedEntry,
        SkipReason,
        HealthResponse,
        HealthStatus,
        HealthDetails,
        ComponentHealth,
    ))
)]
pub struct ApiDoc;
