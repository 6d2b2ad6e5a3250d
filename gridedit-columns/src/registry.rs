//! Field registry: kind tag to constructor.

use crate::field::{
    scaffold_field, CheckboxField, DateField, DropdownField, FormField, HiddenField,
    NumericField, ReadonlyField, TextField, TextareaField,
};
use gridedit_core::FieldKind;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Builds a field named after its argument.
pub type FieldConstructor = Arc<dyn Fn(&str) -> Box<dyn FormField> + Send + Sync>;

/// Maps field kind tags (`"text"`, `"checkbox"`, ...) to constructors.
///
/// `Field { kind }` column descriptors are resolved through this registry,
/// so applications can add their own field types next to the built-ins.
#[derive(Clone, Default)]
pub struct FieldRegistry {
    constructors: HashMap<String, FieldConstructor>,
}

impl FieldRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in field kind.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register("text", |name| Box::new(TextField::new(name)));
        registry.register("textarea", |name| Box::new(TextareaField::new(name)));
        registry.register("numeric", |name| Box::new(NumericField::new(name)));
        registry.register("checkbox", |name| Box::new(CheckboxField::new(name)));
        registry.register("date", |name| Box::new(DateField::new(name)));
        registry.register("dropdown", |name| {
            Box::new(DropdownField::new(name, Vec::new()))
        });
        registry.register("hidden", |name| Box::new(HiddenField::new(name)));
        registry.register("readonly", |name| Box::new(ReadonlyField::new(name)));
        registry
    }

    /// Register (or replace) the constructor for `tag`.
    pub fn register<F>(&mut self, tag: impl Into<String>, constructor: F)
    where
        F: Fn(&str) -> Box<dyn FormField> + Send + Sync + 'static,
    {
        self.constructors.insert(tag.into(), Arc::new(constructor));
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.constructors.contains_key(tag)
    }

    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Construct the field registered under `tag`, named `name`.
    pub fn construct(&self, tag: &str, name: &str) -> Option<Box<dyn FormField>> {
        self.constructors.get(tag).map(|constructor| constructor(name))
    }

    /// Build the field a schema column scaffolds to.
    ///
    /// A registered constructor for the kind's tag wins; otherwise the
    /// built-in field is used. Dropdowns always carry the schema's options.
    pub fn scaffold(&self, kind: &FieldKind, name: &str) -> Box<dyn FormField> {
        if let FieldKind::Dropdown { .. } = kind {
            return scaffold_field(kind, name);
        }
        self.construct(kind.tag(), name)
            .unwrap_or_else(|| scaffold_field(kind, name))
    }
}

impl fmt::Debug for FieldRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}
