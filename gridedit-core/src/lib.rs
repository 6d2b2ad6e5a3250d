//! GRIDEDIT Core - Record and Field Types
//!
//! Pure data structures shared by every other crate: record identity,
//! field values, schema column types and the field kinds a column can
//! scaffold to. Behavior lives in gridedit-columns.

pub mod cast;
pub mod config;
pub mod error;
pub mod format;
pub mod naming;

pub use cast::CastRule;
pub use config::{ColumnConfig, GridConfig};
pub use error::{ConfigError, GridEditError, GridError, GridResult, StorageError};
pub use format::render_template;
pub use naming::{
    parse_form_tree, DecodedFieldName, FieldNameCodec, DEFAULT_NAMESPACE, MAX_FORM_NESTING,
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Numeric record identifier.
///
/// Record ids travel through form field names and URL paths as plain
/// decimal strings, so parsing only accepts ASCII digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct RecordId(pub u64);

/// Why a string could not be read as a [`RecordId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordIdError {
    /// Empty, or contains something other than ASCII digits.
    NotDigits,
    /// All digits, but larger than any record id can be.
    OutOfRange,
}

impl RecordId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Parse a decimal digit string. Signs, whitespace and decimals are rejected.
    pub fn parse_digits(s: &str) -> Result<Self, RecordIdError> {
        if !is_digit_string(s) {
            return Err(RecordIdError::NotDigits);
        }
        s.parse::<u64>()
            .map(RecordId)
            .map_err(|_| RecordIdError::OutOfRange)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = RecordIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_digits(s)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// True when `s` is non-empty and made only of ASCII decimal digits.
pub fn is_digit_string(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

// ============================================================================
// FIELD VALUES
// ============================================================================

/// A single cell value as stored on a record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Null and the empty string both count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Loose truthiness used by checkboxes and the `boolean_nice` cast.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Null => false,
            FieldValue::Bool(b) => *b,
            FieldValue::Int(i) => *i != 0,
            FieldValue::Float(f) => *f != 0.0,
            FieldValue::Text(s) => !s.is_empty() && s != "0" && !s.eq_ignore_ascii_case("false"),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            FieldValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Convert a scalar JSON value. Arrays and objects have no cell form.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => Some(FieldValue::Null),
            serde_json::Value::Bool(b) => Some(FieldValue::Bool(*b)),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(FieldValue::Int)
                .or_else(|| n.as_f64().map(FieldValue::Float)),
            serde_json::Value::String(s) => Some(FieldValue::Text(s.clone())),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(true) => write!(f, "1"),
            FieldValue::Bool(false) => write!(f, "0"),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<f64> for FieldValue {
    fn from(x: f64) -> Self {
        FieldValue::Float(x)
    }
}

// ============================================================================
// RECORDS
// ============================================================================

static NULL_VALUE: FieldValue = FieldValue::Null;

/// One grid row. Column order follows insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Record {
    pub id: RecordId,
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub values: IndexMap<String, FieldValue>,
}

impl Record {
    pub fn new(id: u64) -> Self {
        Self::with_id(RecordId(id))
    }

    pub fn with_id(id: RecordId) -> Self {
        Self {
            id,
            values: IndexMap::new(),
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.values.insert(column.into(), value.into());
        self
    }

    /// Value for `column`, or `Null` when the record has no such column.
    pub fn get(&self, column: &str) -> &FieldValue {
        self.values.get(column).unwrap_or(&NULL_VALUE)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    pub fn set(&mut self, column: impl Into<String>, value: FieldValue) {
        self.values.insert(column.into(), value);
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

/// Field kinds a column can be edited with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    TextArea,
    Numeric,
    Checkbox,
    Date,
    Dropdown { options: Vec<String> },
    Hidden,
    Readonly,
}

impl FieldKind {
    /// Registry tag for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::TextArea => "textarea",
            FieldKind::Numeric => "numeric",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Date => "date",
            FieldKind::Dropdown { .. } => "dropdown",
            FieldKind::Hidden => "hidden",
            FieldKind::Readonly => "readonly",
        }
    }

    pub fn is_readonly(&self) -> bool {
        matches!(self, FieldKind::Readonly)
    }
}

/// Storage type of a schema column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Varchar,
    Text,
    Int,
    Decimal,
    Boolean,
    Date,
    Enum(Vec<String>),
}

impl ColumnType {
    /// The field a column of this type scaffolds to when no descriptor is set.
    pub fn default_field_kind(&self) -> FieldKind {
        match self {
            ColumnType::Varchar => FieldKind::Text,
            ColumnType::Text => FieldKind::TextArea,
            ColumnType::Int | ColumnType::Decimal => FieldKind::Numeric,
            ColumnType::Boolean => FieldKind::Checkbox,
            ColumnType::Date => FieldKind::Date,
            ColumnType::Enum(options) => FieldKind::Dropdown {
                options: options.clone(),
            },
        }
    }
}

/// Column layout of the records a repository serves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    columns: IndexMap<String, ColumnType>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(mut self, name: impl Into<String>, column_type: ColumnType) -> Self {
        self.columns.insert(name.into(), column_type);
        self
    }

    pub fn column_type(&self, name: &str) -> Option<&ColumnType> {
        self.columns.get(name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn default_field_for(&self, name: &str) -> Option<FieldKind> {
        self.columns.get(name).map(ColumnType::default_field_kind)
    }
}

// =============================================================================
// TESTS
// =============================================================================
