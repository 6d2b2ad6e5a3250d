//! Field resolution: which form field a column renders as.

use crate::descriptor::ColumnDescriptor;
use crate::field::{FormField, ReadonlyField};
use crate::form::FieldList;
use crate::grid::EditableGrid;
use gridedit_core::{GridError, GridResult, Record};

/// Outcome of resolving one column.
#[derive(Debug)]
pub enum FieldResolution {
    Resolved(Box<dyn FormField>),
    /// The column is not part of the grid's column specification.
    ColumnNotConfigured,
    /// The descriptor did not yield a form field.
    InvalidFieldProduced,
}

impl FieldResolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, FieldResolution::Resolved(_))
    }

    pub fn into_field(self) -> Option<Box<dyn FormField>> {
        match self {
            FieldResolution::Resolved(field) => Some(field),
            _ => None,
        }
    }
}

impl EditableGrid {
    /// Resolve the form field for `column` of `record`.
    ///
    /// Factories and callbacks are invoked with the record, column and grid;
    /// `Field` descriptors construct the registered kind named after the
    /// column; plain columns scaffold from the repository schema and fall
    /// back to a read-only field when the schema has no such column.
    pub fn resolve_field(&self, column: &str, record: &Record) -> FieldResolution {
        let Some(descriptor) = self.columns().get(column) else {
            return FieldResolution::ColumnNotConfigured;
        };

        let produced = match descriptor {
            ColumnDescriptor::Factory(factory) => factory(record, column, self),
            ColumnDescriptor::Callback { title, callback } => {
                callback(record, column, self).map(|field| titled(field, title))
            }
            ColumnDescriptor::Field { title, kind } => self
                .registry()
                .construct(kind, column)
                .map(|field| titled(field, title)),
            ColumnDescriptor::Title(title) => {
                let field: Box<dyn FormField> = match self.repository().default_field_for(column) {
                    Some(kind) => self.registry().scaffold(&kind, column),
                    None => Box::new(ReadonlyField::new(column)),
                };
                Some(titled(field, title))
            }
        };

        match produced {
            Some(field) => FieldResolution::Resolved(field),
            None => FieldResolution::InvalidFieldProduced,
        }
    }

    /// Resolve every configured column, in display order.
    pub fn build_fields(&self, record: &Record) -> GridResult<FieldList> {
        let mut fields = FieldList::new();
        for column in self.column_names() {
            match self.resolve_field(column, record) {
                FieldResolution::Resolved(field) => fields.push(field),
                FieldResolution::ColumnNotConfigured | FieldResolution::InvalidFieldProduced => {
                    tracing::error!(
                        grid = %self.name(),
                        column = %column,
                        "Column did not resolve to a form field"
                    );
                    return Err(GridError::InvalidField {
                        column: column.to_string(),
                    }
                    .into());
                }
            }
        }
        Ok(fields)
    }
}

fn titled(mut field: Box<dyn FormField>, title: &str) -> Box<dyn FormField> {
    field.set_title(title.to_string());
    field
}

// =============================================================================
// TESTS
// =============================================================================
