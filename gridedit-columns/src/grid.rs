//! The editable grid: column configuration bound to a record repository.

use crate::descriptor::{ColumnDescriptor, FormatRule};
use crate::registry::FieldRegistry;
use gridedit_core::{
    CastRule, ConfigError, FieldNameCodec, GridConfig, GridResult, RecordId, DEFAULT_NAMESPACE,
};
use gridedit_storage::RecordRepository;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// GRID
// ============================================================================

/// A grid whose configured columns render as inline form fields.
///
/// Column order is display order. The configuration is fixed once the grid
/// is built; per-request work (resolving, rendering, saving) only reads it.
#[derive(Clone)]
pub struct EditableGrid {
    name: String,
    link: String,
    codec: FieldNameCodec,
    columns: IndexMap<String, ColumnDescriptor>,
    casting: IndexMap<String, CastRule>,
    formatting: IndexMap<String, FormatRule>,
    registry: FieldRegistry,
    repository: Arc<dyn RecordRepository>,
}

impl EditableGrid {
    pub fn builder(name: impl Into<String>) -> GridBuilder {
        GridBuilder::new(name)
    }

    /// Build a grid from declarative configuration using the built-in fields.
    pub fn from_config(
        config: &GridConfig,
        repository: Arc<dyn RecordRepository>,
    ) -> GridResult<Self> {
        Self::from_config_with_registry(config, FieldRegistry::with_builtin(), repository)
    }

    /// Build a grid from declarative configuration.
    ///
    /// Every `field` kind named in the configuration must be registered.
    pub fn from_config_with_registry(
        config: &GridConfig,
        registry: FieldRegistry,
        repository: Arc<dyn RecordRepository>,
    ) -> GridResult<Self> {
        config.validate()?;

        let mut builder = GridBuilder::new(config.name.clone())
            .namespace(config.namespace.clone())
            .link(config.link.clone())
            .registry(registry);

        for (column, column_config) in &config.columns {
            let title = column_config
                .title
                .clone()
                .unwrap_or_else(|| column.clone());
            let descriptor = match &column_config.field {
                Some(kind) => {
                    if !builder.registry.contains(kind) {
                        return Err(ConfigError::UnknownFieldKind {
                            column: column.clone(),
                            kind: kind.clone(),
                        }
                        .into());
                    }
                    ColumnDescriptor::field(title, kind.clone())
                }
                None => ColumnDescriptor::title(title),
            };
            builder = builder.column(column.clone(), descriptor);
        }
        for (column, rule) in &config.casting {
            builder = builder.cast(column.clone(), rule.clone());
        }
        for (column, template) in &config.formatting {
            builder = builder.format(column.clone(), FormatRule::template(template.clone()));
        }

        builder.build(repository)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base URL the grid is served under.
    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn namespace(&self) -> &str {
        self.codec.namespace()
    }

    pub fn codec(&self) -> &FieldNameCodec {
        &self.codec
    }

    /// Namespaced input name for a record's field.
    pub fn field_name(&self, record_id: RecordId, field: &str) -> String {
        self.codec.encode(record_id, field)
    }

    pub fn columns(&self) -> &IndexMap<String, ColumnDescriptor> {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Header title for a column; the column name when none is configured.
    pub fn column_title<'a>(&'a self, column: &'a str) -> &'a str {
        self.columns
            .get(column)
            .and_then(ColumnDescriptor::display_title)
            .unwrap_or(column)
    }

    pub fn casting_for(&self, column: &str) -> Option<&CastRule> {
        self.casting.get(column)
    }

    pub fn formatting_for(&self, column: &str) -> Option<&FormatRule> {
        self.formatting.get(column)
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn repository(&self) -> &Arc<dyn RecordRepository> {
        &self.repository
    }
}

impl fmt::Debug for EditableGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditableGrid")
            .field("name", &self.name)
            .field("link", &self.link)
            .field("namespace", &self.codec.namespace())
            .field("columns", &self.columns)
            .field("casting", &self.casting)
            .field("formatting", &self.formatting)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for [`EditableGrid`].
#[derive(Debug, Clone)]
pub struct GridBuilder {
    name: String,
    namespace: String,
    link: String,
    columns: IndexMap<String, ColumnDescriptor>,
    casting: IndexMap<String, CastRule>,
    formatting: IndexMap<String, FormatRule>,
    registry: FieldRegistry,
}

impl GridBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            link: "/grid".to_string(),
            columns: IndexMap::new(),
            casting: IndexMap::new(),
            formatting: IndexMap::new(),
            registry: FieldRegistry::with_builtin(),
        }
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    /// Append a column. Re-adding a column replaces its descriptor in place.
    pub fn column(mut self, name: impl Into<String>, descriptor: ColumnDescriptor) -> Self {
        self.columns.insert(name.into(), descriptor);
        self
    }

    /// Append a plain column titled after its name.
    pub fn plain_column(self, name: impl Into<String>) -> Self {
        let name = name.into();
        let descriptor = ColumnDescriptor::title(name.clone());
        self.column(name, descriptor)
    }

    pub fn cast(mut self, column: impl Into<String>, rule: CastRule) -> Self {
        self.casting.insert(column.into(), rule);
        self
    }

    pub fn format(mut self, column: impl Into<String>, rule: FormatRule) -> Self {
        self.formatting.insert(column.into(), rule);
        self
    }

    pub fn registry(mut self, registry: FieldRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn build(self, repository: Arc<dyn RecordRepository>) -> GridResult<EditableGrid> {
        check_segment("name", &self.name)?;
        check_segment("namespace", &self.namespace)?;
        for column in self.columns.keys() {
            check_segment("columns", column)?;
        }
        for (column, rule) in &self.casting {
            rule.validate().map_err(|reason| ConfigError::InvalidValue {
                field: format!("casting.{}", column),
                value: format!("{:?}", rule),
                reason,
            })?;
        }

        let link = normalize_link(&self.link);
        tracing::debug!(
            grid = %self.name,
            columns = self.columns.len(),
            link = %link,
            "Editable grid built"
        );

        Ok(EditableGrid {
            codec: FieldNameCodec::new(self.name.clone(), self.namespace),
            name: self.name,
            link,
            columns: self.columns,
            casting: self.casting,
            formatting: self.formatting,
            registry: self.registry,
            repository,
        })
    }
}

/// Names end up inside bracketed input names, so they must be non-empty
/// and bracket-free.
fn check_segment(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::MissingRequired {
            field: field.to_string(),
        });
    }
    if value.contains(['[', ']']) {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must not contain brackets".to_string(),
        });
    }
    Ok(())
}

/// `"grid/"` and `"/grid"` both become `"/grid"`; the root stays `""`.
fn normalize_link(link: &str) -> String {
    let trimmed = link.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

// =============================================================================
// TESTS
// =============================================================================
