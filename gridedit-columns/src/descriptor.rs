//! Column descriptors and formatting rules.

use crate::field::FormField;
use crate::grid::EditableGrid;
use gridedit_core::{render_template, FieldValue, Record};
use std::fmt;
use std::sync::Arc;

/// Produces the field for one cell. `None` means the column is misconfigured.
pub type FieldFactory =
    Arc<dyn Fn(&Record, &str, &EditableGrid) -> Option<Box<dyn FormField>> + Send + Sync>;

/// Custom display formatter `(record, column, value) -> text`.
pub type FormatFn = Arc<dyn Fn(&Record, &str, &FieldValue) -> String + Send + Sync>;

/// How the editable field for a column is obtained.
#[derive(Clone)]
pub enum ColumnDescriptor {
    /// Plain column; the field is scaffolded from the repository schema.
    Title(String),
    /// Field-construction function.
    Factory(FieldFactory),
    /// Titled entry whose callback builds the field.
    Callback { title: String, callback: FieldFactory },
    /// Titled entry naming a registered field kind.
    Field { title: String, kind: String },
}

impl ColumnDescriptor {
    pub fn title(title: impl Into<String>) -> Self {
        ColumnDescriptor::Title(title.into())
    }

    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn(&Record, &str, &EditableGrid) -> Option<Box<dyn FormField>> + Send + Sync + 'static,
    {
        ColumnDescriptor::Factory(Arc::new(factory))
    }

    pub fn callback<F>(title: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&Record, &str, &EditableGrid) -> Option<Box<dyn FormField>> + Send + Sync + 'static,
    {
        ColumnDescriptor::Callback {
            title: title.into(),
            callback: Arc::new(callback),
        }
    }

    pub fn field(title: impl Into<String>, kind: impl Into<String>) -> Self {
        ColumnDescriptor::Field {
            title: title.into(),
            kind: kind.into(),
        }
    }

    /// Header title, when the descriptor carries one.
    pub fn display_title(&self) -> Option<&str> {
        match self {
            ColumnDescriptor::Title(title)
            | ColumnDescriptor::Callback { title, .. }
            | ColumnDescriptor::Field { title, .. } => Some(title.as_str()),
            ColumnDescriptor::Factory(_) => None,
        }
    }
}

impl fmt::Debug for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnDescriptor::Title(title) => f.debug_tuple("Title").field(title).finish(),
            ColumnDescriptor::Factory(_) => f.write_str("Factory(..)"),
            ColumnDescriptor::Callback { title, .. } => f
                .debug_struct("Callback")
                .field("title", title)
                .finish_non_exhaustive(),
            ColumnDescriptor::Field { title, kind } => f
                .debug_struct("Field")
                .field("title", title)
                .field("kind", kind)
                .finish(),
        }
    }
}

/// Display formatting applied after casting.
#[derive(Clone)]
pub enum FormatRule {
    /// Template with `$value` and `$Column` placeholders.
    Template(String),
    Function(FormatFn),
}

impl FormatRule {
    pub fn template(template: impl Into<String>) -> Self {
        FormatRule::Template(template.into())
    }

    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&Record, &str, &FieldValue) -> String + Send + Sync + 'static,
    {
        FormatRule::Function(Arc::new(f))
    }

    pub fn apply(&self, record: &Record, column: &str, value: &FieldValue) -> String {
        match self {
            FormatRule::Template(template) => render_template(template, record, value),
            FormatRule::Function(f) => f(record, column, value),
        }
    }
}

impl fmt::Debug for FormatRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatRule::Template(template) => f.debug_tuple("Template").field(template).finish(),
            FormatRule::Function(_) => f.write_str("Function(..)"),
        }
    }
}
