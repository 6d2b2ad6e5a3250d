//! Display-formatting templates.

use crate::{FieldValue, Record};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)").expect("placeholder pattern is valid")
});

/// Expand a formatting template for one cell.
///
/// `$value` is the (already cast) cell value; any other `$Name` is the
/// record's value for column `Name`. Unknown names expand to nothing.
pub fn render_template(template: &str, record: &Record, value: &FieldValue) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            if name == "value" {
                value.to_string()
            } else {
                record.get(name).to_string()
            }
        })
        .into_owned()
}
