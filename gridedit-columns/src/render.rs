//! Cell and table rendering.

use crate::grid::EditableGrid;
use crate::html::{attr, escape};
use gridedit_core::{FieldValue, GridError, GridResult, Record};

/// Extra class carried by grids with editable columns attached.
pub const EDITABLE_GRID_CLASS: &str = "editable-grid";

impl EditableGrid {
    /// Raw column value after the configured cast and format rules.
    pub fn display_value(&self, record: &Record, column: &str) -> FieldValue {
        let raw = record.get(column);
        let cast = match self.casting_for(column) {
            Some(rule) => rule.apply(raw),
            None => raw.clone(),
        };
        match self.formatting_for(column) {
            Some(rule) => FieldValue::Text(rule.apply(record, column, &cast)),
            None => cast,
        }
    }

    /// Non-editable cell: the escaped display value.
    pub fn render_default_cell(&self, record: &Record, column: &str) -> String {
        escape(&self.display_value(record, column).to_string())
    }

    /// Markup for one cell.
    ///
    /// Records the repository does not allow editing render through
    /// [`render_default_cell`](Self::render_default_cell). Editable records
    /// get a fresh copy of the column's field, named with the namespaced
    /// encoding and holding the display value.
    pub fn render_cell(&self, record: &Record, column: &str) -> GridResult<String> {
        if !self.repository().is_editable(record.id) {
            return Ok(self.render_default_cell(record, column));
        }

        let fields = self.build_fields(record)?;
        let mut field = fields
            .field_by_name(column)
            .ok_or_else(|| GridError::ColumnNotFound {
                column: column.to_string(),
            })?
            .clone_box();

        let value = self.display_value(record, column);
        let name = self.field_name(record.id, field.name());
        field.set_name(name);
        field.set_value(value);
        Ok(field.render())
    }

    /// The full grid: a header of column titles and one row per record,
    /// wrapped in a form that posts back to the grid link.
    pub fn render_table(&self) -> GridResult<String> {
        let records = self.repository().list()?;

        let mut out = format!(
            "<form{} method=\"post\"{}>",
            attr("action", self.form_action()),
            attr("class", "editable-grid-form")
        );
        out.push_str(&format!(
            "<table{}{}>",
            attr("class", &format!("grid-field {}", EDITABLE_GRID_CLASS)),
            attr("data-name", self.name())
        ));

        out.push_str("<thead><tr>");
        for column in self.column_names() {
            out.push_str(&format!(
                "<th{}>{}</th>",
                attr("class", &format!("col-{}", column)),
                escape(self.column_title(column))
            ));
        }
        out.push_str("</tr></thead><tbody>");

        for record in &records {
            out.push_str(&format!("<tr{}>", attr("data-id", &record.id.to_string())));
            for column in self.column_names() {
                out.push_str(&format!(
                    "<td{}>{}</td>",
                    attr("class", &format!("col-{}", column)),
                    self.render_cell(record, column)?
                ));
            }
            out.push_str("</tr>");
        }

        out.push_str("</tbody></table><button type=\"submit\">Save</button></form>");
        tracing::debug!(grid = %self.name(), rows = records.len(), "Grid rendered");
        Ok(out)
    }

    /// Target of the grid form; the root when the grid is mounted at `""`.
    pub fn form_action(&self) -> &str {
        if self.link().is_empty() {
            "/"
        } else {
            self.link()
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
