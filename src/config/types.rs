use crate::formatted::{DEFAULT_FORMAT, DEFAULT_SUFFIX};
use crate::introspection::Table;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub extension: ExtensionConfig,
    /// Introspected tables to build types for
    #[serde(default)]
    pub table: Vec<Table>,
}

/// Formatted timestamp field options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionConfig {
    /// Appended to the inflected column name
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Postgres `to_char` pattern used when a query omits `format`
    #[serde(default = "default_format")]
    pub default_format: String,
}

fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            default_format: default_format(),
        }
    }
}

impl ExtensionConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.suffix.is_empty() || !self.suffix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(format!(
                "Suffix '{}' must be a non-empty alphanumeric GraphQL name fragment",
                self.suffix
            ));
        }

        if self.default_format.is_empty() {
            return Err("Default format must not be empty".to_string());
        }

        Ok(())
    }
}

/// Validate one table snapshot
pub fn validate_table(table: &Table) -> Result<(), String> {
    if table.name.is_empty() || table.schema.is_empty() {
        return Err("Table schema and name must not be empty".to_string());
    }

    let mut nums = HashSet::new();
    for attr in &table.attributes {
        if attr.name.is_empty() {
            return Err(format!("Table '{}' has a column without a name", table.name));
        }
        if !nums.insert(attr.num) {
            return Err(format!(
                "Table '{}' declares column number {} more than once",
                table.name, attr.num
            ));
        }
    }

    for constraint in &table.constraints {
        if let Some(num) = constraint
            .key_attribute_nums
            .iter()
            .find(|num| !nums.contains(*num))
        {
            return Err(format!(
                "Table '{}' has a {:?} constraint on unknown column number {}",
                table.name, constraint.kind, num
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introspection::{Attribute, Constraint, ConstraintKind, PgType, Tags};

    fn table() -> Table {
        Table {
            schema: "public".to_string(),
            name: "orders".to_string(),
            description: None,
            tags: Tags::new(),
            attributes: vec![Attribute {
                num: 1,
                name: "id".to_string(),
                description: None,
                ty: PgType {
                    name: "int4".to_string(),
                    domain_is_not_null: false,
                },
                type_modifier: None,
                is_not_null: true,
                tags: Tags::new(),
            }],
            constraints: vec![Constraint {
                kind: ConstraintKind::PrimaryKey,
                key_attribute_nums: vec![1],
            }],
        }
    }

    #[test]
    fn test_extension_validation_valid() {
        assert!(ExtensionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_extension_validation_invalid_suffix() {
        let config = ExtensionConfig {
            suffix: "In-Zone".to_string(),
            ..ExtensionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_extension_validation_empty_format() {
        let config = ExtensionConfig {
            default_format: String::new(),
            ..ExtensionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_table_validation_valid() {
        assert!(validate_table(&table()).is_ok());
    }

    #[test]
    fn test_table_validation_duplicate_column_number() {
        let mut table = table();
        let mut dup = table.attributes[0].clone();
        dup.name = "other".to_string();
        table.attributes.push(dup);
        assert!(validate_table(&table).is_err());
    }

    #[test]
    fn test_table_validation_unknown_constraint_column() {
        let mut table = table();
        table.constraints.push(Constraint {
            kind: ConstraintKind::ForeignKey,
            key_attribute_nums: vec![7],
        });
        assert!(validate_table(&table).is_err());
    }
}
