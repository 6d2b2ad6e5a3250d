//! Error types for GRIDEDIT operations

use crate::RecordId;
use thiserror::Error;

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Record not found: {id}")]
    NotFound { id: RecordId },

    #[error("Write failed for record {id}: {reason}")]
    WriteFailed { id: RecordId, reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown field kind \"{kind}\" for column \"{column}\"")]
    UnknownFieldKind { column: String, kind: String },

    #[error("Failed to parse grid configuration: {reason}")]
    Parse { reason: String },
}

/// Errors raised while resolving, rendering or serving grid fields.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("The field for column \"{column}\" is not a valid form field")]
    InvalidField { column: String },

    #[error("Could not find the field '{column}'")]
    ColumnNotFound { column: String },

    #[error("Bad request: {reason}")]
    BadRequest { reason: String },

    #[error("Record {id} not found")]
    RecordNotFound { id: String },
}

/// Master error type for all GRIDEDIT errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GridEditError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Grid error: {0}")]
    Grid(#[from] GridError),
}

/// Result type alias for GRIDEDIT operations.
pub type GridResult<T> = Result<T, GridEditError>;

// =============================================================================
// TESTS
// =============================================================================
