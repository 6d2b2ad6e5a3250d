//! Field lists and forms: loading record values, merging submissions and
//! writing values back.

use crate::field::FormField;
use crate::html::{attr, escape};
use gridedit_core::Record;
use serde_json::{Map, Value as JsonValue};

// ============================================================================
// FIELD LIST
// ============================================================================

/// Ordered collection of form fields.
#[derive(Debug, Clone, Default)]
pub struct FieldList {
    fields: Vec<Box<dyn FormField>>,
}

impl FieldList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: Box<dyn FormField>) {
        self.fields.push(field);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn FormField> {
        self.fields.iter().map(|field| field.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn FormField>> {
        self.fields.iter_mut()
    }

    /// First field whose name is `name`.
    pub fn field_by_name(&self, name: &str) -> Option<&dyn FormField> {
        self.iter().find(|field| field.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|field| field.name()).collect()
    }
}

impl FromIterator<Box<dyn FormField>> for FieldList {
    fn from_iter<I: IntoIterator<Item = Box<dyn FormField>>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// FORM
// ============================================================================

/// How submitted data is merged into a form's current values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Fields absent from the submission keep their current value.
    Merge,
    /// Fields absent from the submission are reset to their empty value.
    ClearMissing,
}

/// A field list with a submit target.
#[derive(Debug, Clone)]
pub struct Form {
    fields: FieldList,
    action: String,
}

impl Form {
    pub fn new(fields: FieldList, action: impl Into<String>) -> Self {
        Self {
            fields,
            action: action.into(),
        }
    }

    pub fn fields(&self) -> &FieldList {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FieldList {
        &mut self.fields
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    /// Set each field to the record's value for the column of the same name.
    /// Fields with no matching column are left untouched.
    pub fn load_record(&mut self, record: &Record) {
        for field in self.fields.iter_mut() {
            if record.contains(field.name()) {
                let value = record.get(field.name()).clone();
                field.set_value(value);
            }
        }
    }

    /// Bind submitted raw values, keyed by field name.
    pub fn load_data(&mut self, data: &Map<String, JsonValue>, mode: MergeMode) {
        for field in self.fields.iter_mut() {
            match data.get(field.name()) {
                Some(raw) => {
                    let value = field.parse_submitted(raw);
                    field.set_value(value);
                }
                None if mode == MergeMode::ClearMissing => {
                    let value = field.empty_value();
                    field.set_value(value);
                }
                None => {}
            }
        }
    }

    /// Write every saveable field into `record`.
    pub fn save_into(&self, record: &mut Record) {
        for field in self.fields.iter() {
            field.save_into(record);
        }
    }

    /// Render the whole form with a labelled row per field.
    pub fn render(&self) -> String {
        let mut out = format!(
            "<form{} method=\"post\" class=\"editable-row-form\">",
            attr("action", &self.action)
        );
        for field in self.fields.iter() {
            out.push_str(&format!(
                "<div class=\"field {}\"><label{}>{}</label>{}</div>",
                field.kind(),
                attr("for", field.name()),
                escape(field.title()),
                field.render()
            ));
        }
        out.push_str("</form>");
        out
    }
}

// =============================================================================
// TESTS
// =============================================================================
