//! GRIDEDIT Columns - Inline Editable Grid Columns
//!
//! Turns configured grid columns into live form fields:
//! - [`EditableGrid::resolve_field`] picks the field for a column
//! - [`EditableGrid::render_cell`] renders a record's cell as a namespaced input
//! - [`EditableGrid::save`] binds a posted edit set back into records
//! - [`EditableGrid::handle_row_form`] serves one record's fields as a form
//!
//! Records, schema hints and edit permission come from a
//! [`gridedit_storage::RecordRepository`].

pub mod descriptor;
pub mod field;
pub mod form;
pub mod grid;
mod html;
pub mod registry;
pub mod render;
pub mod resolver;
pub mod row_form;
pub mod save;

pub use descriptor::{ColumnDescriptor, FieldFactory, FormatFn, FormatRule};
pub use field::{
    scaffold_field, CheckboxField, DateField, DropdownField, FormField, HiddenField,
    NumericField, ReadonlyField, TextField, TextareaField,
};
pub use form::{FieldList, Form, MergeMode};
pub use grid::{EditableGrid, GridBuilder};
pub use html::escape;
pub use registry::{FieldConstructor, FieldRegistry};
pub use render::EDITABLE_GRID_CLASS;
pub use resolver::FieldResolution;
pub use row_form::RowForm;
pub use save::{SaveReport, SkipReason, SkippedEntry};
