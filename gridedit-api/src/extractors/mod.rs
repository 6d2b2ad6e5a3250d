//! Custom request extractors.

pub mod nested_form;

pub use nested_form::NestedForm;
