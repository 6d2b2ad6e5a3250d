//! Grid configuration types

use crate::naming::DEFAULT_NAMESPACE;
use crate::{CastRule, ConfigError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One configured column.
///
/// A column without `field` uses schema scaffolding; a column with `field`
/// names the registry tag of the field to construct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
}

/// Declarative grid configuration, usually loaded from TOML.
///
/// ```toml
/// name = "Articles"
/// link = "/grid"
///
/// [columns.Title]
/// title = "Title"
///
/// [columns.Rating]
/// field = "numeric"
///
/// [casting]
/// Title = { limit_characters = 40 }
///
/// [formatting]
/// Rating = "$value / 5"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub name: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default = "default_link")]
    pub link: String,
    pub columns: IndexMap<String, ColumnConfig>,
    #[serde(default)]
    pub casting: IndexMap<String, CastRule>,
    #[serde(default)]
    pub formatting: IndexMap<String, String>,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_link() -> String {
    "/grid".to_string()
}

impl GridConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: default_namespace(),
            link: default_link(),
            columns: IndexMap::new(),
            casting: IndexMap::new(),
            formatting: IndexMap::new(),
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: GridConfig = toml::from_str(source).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every name is usable inside a bracketed input name and
    /// that casting/formatting rules refer to configured columns.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_name("name", &self.name)?;
        validate_name("namespace", &self.namespace)?;

        if self.columns.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "columns".to_string(),
            });
        }
        for column in self.columns.keys() {
            validate_name("columns", column)?;
        }

        for (column, rule) in &self.casting {
            self.require_column("casting", column)?;
            rule.validate().map_err(|reason| ConfigError::InvalidValue {
                field: format!("casting.{}", column),
                value: format!("{:?}", rule),
                reason,
            })?;
        }
        for column in self.formatting.keys() {
            self.require_column("formatting", column)?;
        }
        Ok(())
    }

    fn require_column(&self, section: &str, column: &str) -> Result<(), ConfigError> {
        if self.columns.contains_key(column) {
            Ok(())
        } else {
            Err(ConfigError::InvalidValue {
                field: section.to_string(),
                value: column.to_string(),
                reason: "not a configured column".to_string(),
            })
        }
    }
}

fn validate_name(field: &str, value: &str) -> Result<(), ConfigError> {
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
