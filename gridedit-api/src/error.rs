//! Error Types for GRIDEDIT API
//!
//! This module defines error handling for the HTTP layer, including:
//! - ApiError struct for structured error responses
//! - ErrorCode enum for categorizing errors
//! - IntoResponse implementation for Axum HTTP responses
//! - Conversion from the workspace-wide `GridEditError`
//!
//! All errors are serialized as JSON with appropriate HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gridedit_core::{GridEditError, GridError, StorageError};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
///
/// Each error code maps to a specific HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================================================
    // Validation Errors (400)
    // ========================================================================
    /// Request contains invalid input data
    InvalidInput,

    // ========================================================================
    // Not Found Errors (404)
    // ========================================================================
    /// Requested record does not exist
    RecordNotFound,

    /// No route matches the request
    RouteNotFound,

    // ========================================================================
    // Server Errors (500)
    // ========================================================================
    /// Grid columns are misconfigured
    ConfigurationError,

    /// Record storage failed
    StorageError,

    /// Internal server error
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,

            ErrorCode::RecordNotFound | ErrorCode::RouteNotFound => StatusCode::NOT_FOUND,

            ErrorCode::ConfigurationError
            | ErrorCode::StorageError
            | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a default message for this error code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "Invalid input data",
            ErrorCode::RecordNotFound => "Record not found",
            ErrorCode::RouteNotFound => "Not found",
            ErrorCode::ConfigurationError => "Grid configuration error",
            ErrorCode::StorageError => "Record storage failed",
            ErrorCode::InternalError => "Internal server error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Structured error response for API operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiError {
    /// Error code categorizing the error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create a new API error with the given code, using the default message.
    pub fn from_code(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.default_message().to_string(),
            details: None,
        }
    }

    /// Add additional details to the error.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    // ========================================================================
    // Convenience constructors for common errors
    // ========================================================================

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Create a RecordNotFound error.
    pub fn record_not_found(id: impl fmt::Display) -> Self {
        Self::new(ErrorCode::RecordNotFound, format!("Record {} not found", id))
    }

    /// Create a ConfigurationError.
    pub fn configuration_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigurationError, message)
    }

    /// Create a StorageError.
    pub fn storage_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Create an InternalError.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// ============================================================================
// AXUM INTEGRATION
// ============================================================================

/// Implement IntoResponse for ApiError to enable automatic error handling in Axum.
///
/// ```ignore
/// async fn handler() -> Result<Html<String>, ApiError> {
///     Err(ApiError::record_not_found(42))
/// }
/// ```
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self);
        (status, body).into_response()
    }
}

// ============================================================================
// CONVERSIONS FROM WORKSPACE ERRORS
// ============================================================================

/// Convert from GridEditError to ApiError.
///
/// Request-shape errors become 400, unknown records 404. Configuration
/// and storage failures are logged and surface as 500 with a generic
/// storage message so internals do not leak.
impl From<GridEditError> for ApiError {
    fn from(err: GridEditError) -> Self {
        match err {
            GridEditError::Grid(GridError::BadRequest { reason }) => {
                ApiError::invalid_input(reason)
            }
            GridEditError::Grid(GridError::RecordNotFound { id }) => {
                ApiError::record_not_found(id)
            }
            GridEditError::Storage(StorageError::NotFound { id }) => {
                ApiError::record_not_found(id)
            }
            GridEditError::Grid(ref grid_err @ (GridError::InvalidField { .. }
            | GridError::ColumnNotFound { .. })) => {
                tracing::error!(error = %err, "Grid column configuration error");
                ApiError::configuration_error(grid_err.to_string())
            }
            GridEditError::Config(ref config_err) => {
                tracing::error!(error = %err, "Grid configuration error");
                ApiError::configuration_error(config_err.to_string())
            }
            GridEditError::Storage(ref storage_err) => {
                tracing::error!(error = ?storage_err, "Storage error");
                ApiError::storage_error("Record storage failed")
            }
        }
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use gridedit_core::{ConfigError, RecordId};

    #[test]
    fn test_error_code_status_mapping() {
        assert_eq!(ErrorCode::InvalidInput.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::RecordNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::ConfigurationError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::StorageError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_grid_errors_map_to_http_statuses() {
        let bad = ApiError::from(GridEditError::from(GridError::BadRequest {
            reason: "record id \"42a\" must be decimal digits".to_string(),
        }));
        assert_eq!(bad.status_code(), StatusCode::BAD_REQUEST);
        assert!(bad.message.contains("42a"));

        let missing = ApiError::from(GridEditError::from(GridError::RecordNotFound {
            id: "9999999".to_string(),
        }));
        assert_eq!(missing.code, ErrorCode::RecordNotFound);
        assert_eq!(missing.message, "Record 9999999 not found");

        let config = ApiError::from(GridEditError::from(GridError::ColumnNotFound {
            column: "Body".to_string(),
        }));
        assert_eq!(config.code, ErrorCode::ConfigurationError);
        assert_eq!(config.message, "Could not find the field 'Body'");

        let unknown_kind = ApiError::from(GridEditError::from(ConfigError::UnknownFieldKind {
            column: "Rating".to_string(),
            kind: "slider".to_string(),
        }));
        assert_eq!(unknown_kind.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_storage_errors_do_not_leak_details() {
        let err = ApiError::from(GridEditError::from(StorageError::WriteFailed {
            id: RecordId(3),
            reason: "disk /dev/sda1 full".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::StorageError);
        assert!(!err.message.contains("sda1"));

        let not_found = ApiError::from(GridEditError::from(StorageError::NotFound {
            id: RecordId(8),
        }));
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_api_error_with_details() {
        let details = serde_json::json!({"key": "abc"});
        let err = ApiError::invalid_input("Bad key").with_details(details.clone());
        assert_eq!(err.details, Some(details));
    }

    #[test]
    fn test_error_serialization() -> Result<(), serde_json::Error> {
        let err = ApiError::record_not_found(12);
        let json = serde_json::to_string(&err)?;
        assert!(json.contains("RECORD_NOT_FOUND"));
        assert!(!json.contains("details"));

        let deserialized: ApiError = serde_json::from_str(&json)?;
        assert_eq!(deserialized, err);
        Ok(())
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::from_code(ErrorCode::InternalError);
        let display = format!("{}", err);
        assert!(display.contains("InternalError"));
        assert!(display.contains("Internal server error"));
    }
}
