//! Standalone per-row form fragments.

use crate::form::Form;
use crate::grid::EditableGrid;
use gridedit_core::{GridError, GridResult, RecordId, RecordIdError};

/// One record's editable fields as a standalone form.
#[derive(Debug, Clone)]
pub struct RowForm {
    record_id: RecordId,
    form: Form,
}

impl RowForm {
    pub fn record_id(&self) -> RecordId {
        self.record_id
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Namespaced input names, in column order.
    pub fn field_names(&self) -> Vec<&str> {
        self.form.fields().names()
    }

    pub fn render(&self) -> String {
        self.form.render()
    }
}

impl EditableGrid {
    /// Action URL of a record's row form: `{link}/editable/form/{id}`.
    pub fn row_form_action(&self, record_id: RecordId) -> String {
        format!("{}/editable/form/{}", self.link(), record_id)
    }

    /// Build the row form for the record whose id is the path segment `id`.
    ///
    /// `id` must be non-empty decimal digits, otherwise the request is
    /// rejected as bad. Digit strings naming no stored record (including
    /// ones too large to be an id) are not found.
    pub fn handle_row_form(&self, id: &str) -> GridResult<RowForm> {
        let record_id = match RecordId::parse_digits(id) {
            Ok(record_id) => record_id,
            Err(RecordIdError::NotDigits) => {
                return Err(GridError::BadRequest {
                    reason: format!("record id \"{}\" must be decimal digits", id),
                }
                .into());
            }
            Err(RecordIdError::OutOfRange) => {
                return Err(GridError::RecordNotFound { id: id.to_string() }.into());
            }
        };

        let record = self
            .repository()
            .get(record_id)?
            .ok_or_else(|| GridError::RecordNotFound { id: id.to_string() })?;

        let mut form = Form::new(self.build_fields(&record)?, self.row_form_action(record_id));
        form.load_record(&record);
        for field in form.fields_mut().iter_mut() {
            let name = self.field_name(record_id, field.name());
            field.set_name(name);
        }

        tracing::debug!(grid = %self.name(), record_id = %record_id, "Row form built");
        Ok(RowForm { record_id, form })
    }
}

// =============================================================================
// TESTS
// =============================================================================
