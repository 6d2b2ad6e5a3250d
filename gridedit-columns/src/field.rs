//! Form field types rendered inside editable cells.
//!
//! Every editable control implements [`FormField`]. A field carries its
//! input name, a display title and the current value, renders itself to
//! escaped HTML and knows how to read its own submitted raw value back.

use crate::html::{attr, escape};
use gridedit_core::{FieldKind, FieldValue, Record};
use serde_json::Value as JsonValue;
use std::fmt;

// ============================================================================
// FIELD TRAIT
// ============================================================================

/// An editable (or display-only) form control.
pub trait FormField: fmt::Debug + Send + Sync {
    /// Registry tag of the field kind, e.g. `"text"`.
    fn kind(&self) -> &'static str;

    fn name(&self) -> &str;

    fn set_name(&mut self, name: String);

    fn title(&self) -> &str;

    fn set_title(&mut self, title: String);

    fn value(&self) -> &FieldValue;

    fn set_value(&mut self, value: FieldValue);

    /// Render the control as an HTML fragment.
    fn render(&self) -> String;

    fn clone_box(&self) -> Box<dyn FormField>;

    /// Read-only fields display a value but never write it back.
    fn is_readonly(&self) -> bool {
        false
    }

    /// Value assigned when a clear-missing merge finds no submitted input.
    fn empty_value(&self) -> FieldValue {
        FieldValue::Null
    }

    /// Convert a raw submitted value into this field's value.
    fn parse_submitted(&self, raw: &JsonValue) -> FieldValue {
        FieldValue::from_json(raw).unwrap_or(FieldValue::Null)
    }

    /// Copy the current value into `record` under this field's name.
    fn save_into(&self, record: &mut Record) {
        if !self.is_readonly() {
            record.set(self.name(), self.value().clone());
        }
    }
}

impl Clone for Box<dyn FormField> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// State shared by every built-in field.
#[derive(Debug, Clone, Default, PartialEq)]
struct FieldBase {
    name: String,
    title: String,
    value: FieldValue,
}

impl FieldBase {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            title: name.to_string(),
            value: FieldValue::Null,
        }
    }
}

macro_rules! field_common {
    ($kind:expr) => {
        fn kind(&self) -> &'static str {
            $kind
        }

        fn name(&self) -> &str {
            &self.base.name
        }

        fn set_name(&mut self, name: String) {
            self.base.name = name;
        }

        fn title(&self) -> &str {
            &self.base.title
        }

        fn set_title(&mut self, title: String) {
            self.base.title = title;
        }

        fn value(&self) -> &FieldValue {
            &self.base.value
        }

        fn set_value(&mut self, value: FieldValue) {
            self.base.value = value;
        }

        fn clone_box(&self) -> Box<dyn FormField> {
            Box::new(self.clone())
        }
    };
}

fn input(input_type: &str, base: &FieldBase, extra: &str) -> String {
    format!(
        "<input type=\"{}\"{}{}{}>",
        input_type,
        attr("name", &base.name),
        attr("value", &base.value.to_string()),
        extra
    )
}

/// Submitted strings stay text; numbers and booleans keep their JSON type.
fn submitted_text(raw: &JsonValue) -> FieldValue {
    match raw {
        JsonValue::String(s) => FieldValue::Text(s.clone()),
        other => FieldValue::from_json(other).unwrap_or(FieldValue::Null),
    }
}

// ============================================================================
// BUILT-IN FIELDS
// ============================================================================

/// Single-line text input.
#[derive(Debug, Clone, PartialEq)]
pub struct TextField {
    base: FieldBase,
}

impl TextField {
    pub fn new(name: &str) -> Self {
        Self {
            base: FieldBase::new(name),
        }
    }
}

impl FormField for TextField {
    field_common!("text");

    fn render(&self) -> String {
        input("text", &self.base, &attr("class", "text"))
    }

    fn parse_submitted(&self, raw: &JsonValue) -> FieldValue {
        submitted_text(raw)
    }
}

/// Multi-line text area.
#[derive(Debug, Clone, PartialEq)]
pub struct TextareaField {
    base: FieldBase,
    rows: u32,
}

impl TextareaField {
    pub fn new(name: &str) -> Self {
        Self {
            base: FieldBase::new(name),
            rows: 3,
        }
    }

    pub fn with_rows(mut self, rows: u32) -> Self {
        self.rows = rows;
        self
    }
}

impl FormField for TextareaField {
    field_common!("textarea");

    fn render(&self) -> String {
        format!(
            "<textarea{} rows=\"{}\">{}</textarea>",
            attr("name", &self.base.name),
            self.rows,
            escape(&self.base.value.to_string())
        )
    }

    fn parse_submitted(&self, raw: &JsonValue) -> FieldValue {
        submitted_text(raw)
    }
}

/// Number input. Unparseable submissions become `Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericField {
    base: FieldBase,
}

impl NumericField {
    pub fn new(name: &str) -> Self {
        Self {
            base: FieldBase::new(name),
        }
    }
}

impl FormField for NumericField {
    field_common!("numeric");

    fn render(&self) -> String {
        input("number", &self.base, " step=\"any\"")
    }

    fn parse_submitted(&self, raw: &JsonValue) -> FieldValue {
        match raw {
            JsonValue::Number(_) => FieldValue::from_json(raw).unwrap_or(FieldValue::Null),
            JsonValue::String(s) => {
                let s = s.trim();
                if let Ok(i) = s.parse::<i64>() {
                    FieldValue::Int(i)
                } else if let Ok(x) = s.parse::<f64>() {
                    if x.is_finite() {
                        FieldValue::Float(x)
                    } else {
                        FieldValue::Null
                    }
                } else {
                    FieldValue::Null
                }
            }
            _ => FieldValue::Null,
        }
    }
}

/// Checkbox. An unchecked box is absent from the submission, so its empty
/// value is `false` rather than `Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckboxField {
    base: FieldBase,
}

impl CheckboxField {
    pub fn new(name: &str) -> Self {
        Self {
            base: FieldBase::new(name),
        }
    }
}

impl FormField for CheckboxField {
    field_common!("checkbox");

    fn render(&self) -> String {
        let checked = if self.base.value.is_truthy() {
            " checked"
        } else {
            ""
        };
        format!(
            "<input type=\"checkbox\"{} value=\"1\"{}>",
            attr("name", &self.base.name),
            checked
        )
    }

    fn empty_value(&self) -> FieldValue {
        FieldValue::Bool(false)
    }

    fn parse_submitted(&self, raw: &JsonValue) -> FieldValue {
        let value = FieldValue::from_json(raw).unwrap_or(FieldValue::Null);
        FieldValue::Bool(value.is_truthy())
    }
}

/// Date input holding `YYYY-MM-DD` text.
#[derive(Debug, Clone, PartialEq)]
pub struct DateField {
    base: FieldBase,
}

impl DateField {
    pub fn new(name: &str) -> Self {
        Self {
            base: FieldBase::new(name),
        }
    }
}

impl FormField for DateField {
    field_common!("date");

    fn render(&self) -> String {
        input("date", &self.base, &attr("class", "date"))
    }

    fn parse_submitted(&self, raw: &JsonValue) -> FieldValue {
        match submitted_text(raw) {
            FieldValue::Text(s) if s.trim().is_empty() => FieldValue::Null,
            FieldValue::Text(s) => FieldValue::Text(s.trim().to_string()),
            other => other,
        }
    }
}

/// Select box over a fixed option list.
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownField {
    base: FieldBase,
    options: Vec<String>,
}

impl DropdownField {
    pub fn new(name: &str, options: Vec<String>) -> Self {
        Self {
            base: FieldBase::new(name),
            options,
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }
}

impl FormField for DropdownField {
    field_common!("dropdown");

    fn render(&self) -> String {
        let current = self.base.value.to_string();
        let mut out = format!("<select{}>", attr("name", &self.base.name));
        out.push_str("<option value=\"\"></option>");
        for option in &self.options {
            let selected = if *option == current { " selected" } else { "" };
            out.push_str(&format!(
                "<option{}{}>{}</option>",
                attr("value", option),
                selected,
                escape(option)
            ));
        }
        out.push_str("</select>");
        out
    }

    fn parse_submitted(&self, raw: &JsonValue) -> FieldValue {
        match submitted_text(raw) {
            FieldValue::Text(s) if s.is_empty() => FieldValue::Null,
            other => other,
        }
    }
}

/// Hidden input.
#[derive(Debug, Clone, PartialEq)]
pub struct HiddenField {
    base: FieldBase,
}

impl HiddenField {
    pub fn new(name: &str) -> Self {
        Self {
            base: FieldBase::new(name),
        }
    }
}

impl FormField for HiddenField {
    field_common!("hidden");

    fn render(&self) -> String {
        input("hidden", &self.base, "")
    }

    fn parse_submitted(&self, raw: &JsonValue) -> FieldValue {
        submitted_text(raw)
    }
}

/// Display-only value. Never written back to a record.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadonlyField {
    base: FieldBase,
}

impl ReadonlyField {
    pub fn new(name: &str) -> Self {
        Self {
            base: FieldBase::new(name),
        }
    }
}

impl FormField for ReadonlyField {
    field_common!("readonly");

    fn render(&self) -> String {
        if self.base.value.is_empty() {
            return "<span class=\"readonly\"><i>(none)</i></span>".to_string();
        }
        format!(
            "<span class=\"readonly\">{}</span>",
            escape(&self.base.value.to_string())
        )
    }

    fn is_readonly(&self) -> bool {
        true
    }
}

/// Build the built-in field for `kind`, named `name`.
pub fn scaffold_field(kind: &FieldKind, name: &str) -> Box<dyn FormField> {
    match kind {
        FieldKind::Text => Box::new(TextField::new(name)),
        FieldKind::TextArea => Box::new(TextareaField::new(name)),
        FieldKind::Numeric => Box::new(NumericField::new(name)),
        FieldKind::Checkbox => Box::new(CheckboxField::new(name)),
        FieldKind::Date => Box::new(DateField::new(name)),
        FieldKind::Dropdown { options } => Box::new(DropdownField::new(name, options.clone())),
        FieldKind::Hidden => Box::new(HiddenField::new(name)),
        FieldKind::Readonly => Box::new(ReadonlyField::new(name)),
    }
}

// =============================================================================
// TESTS
// =============================================================================
