use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Type name Postgres uses for `timestamp with time zone`
pub const TIMESTAMPTZ: &str = "timestamptz";

/// Smart-comment tags attached to a table or column
pub type Tags = IndexMap<String, TagValue>;

/// Introspected table snapshot
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Table {
    #[serde(default = "default_schema")]
    pub schema: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub tags: Tags,
    #[serde(default, rename = "attribute")]
    pub attributes: Vec<Attribute>,
    #[serde(default, rename = "constraint")]
    pub constraints: Vec<Constraint>,
}

fn default_schema() -> String {
    "public".to_string()
}

/// One column of a table
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Attribute {
    /// Column ordinal (`attnum`), used to match constraints
    pub num: i16,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: PgType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_modifier: Option<i32>,
    #[serde(default)]
    pub is_not_null: bool,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub tags: Tags,
}

/// Declared column type
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PgType {
    pub name: String,
    /// Set when the column's type is a domain declared `NOT NULL`
    #[serde(default)]
    pub domain_is_not_null: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Constraint {
    pub kind: ConstraintKind,
    pub key_attribute_nums: Vec<i16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    #[serde(alias = "p")]
    PrimaryKey,
    #[serde(alias = "f")]
    ForeignKey,
    #[serde(alias = "u")]
    Unique,
    #[serde(alias = "c")]
    Check,
}

/// Value of a smart-comment tag (`@omit`, `@omit read,update`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TagValue {
    Flag(bool),
    Text(String),
    List(Vec<String>),
}

impl TagValue {
    pub fn is_truthy(&self) -> bool {
        match self {
            TagValue::Flag(flag) => *flag,
            TagValue::Text(text) => !text.is_empty(),
            TagValue::List(items) => !items.is_empty(),
        }
    }

    /// Individual entries, splitting comma-separated text
    pub fn entries(&self) -> Vec<&str> {
        match self {
            TagValue::Flag(_) => Vec::new(),
            TagValue::Text(text) => text.split(',').map(str::trim).collect(),
            TagValue::List(items) => items
                .iter()
                .flat_map(|item| item.split(',').map(str::trim))
                .collect(),
        }
    }
}

impl Table {
    pub fn primary_key(&self) -> Option<&Constraint> {
        self.constraints
            .iter()
            .find(|c| c.kind == ConstraintKind::PrimaryKey)
    }

    pub fn is_primary_key_column(&self, attr: &Attribute) -> bool {
        self.primary_key()
            .is_some_and(|pk| pk.key_attribute_nums.contains(&attr.num))
    }

    pub fn is_foreign_key_column(&self, attr: &Attribute) -> bool {
        self.constraints.iter().any(|c| {
            c.kind == ConstraintKind::ForeignKey && c.key_attribute_nums.contains(&attr.num)
        })
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

impl Attribute {
    pub fn tag(&self, key: &str) -> Option<&TagValue> {
        self.tags.get(key)
    }

    /// Any one of the not-null signals is enough; they are not cross-checked
    pub fn is_definitely_not_null(&self) -> bool {
        self.is_not_null
            || self.ty.domain_is_not_null
            || self.tag("notNull").is_some_and(TagValue::is_truthy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_table() {
        let toml_str = r#"
name = "orders"
description = "Customer orders"

[[attribute]]
num = 1
name = "id"
type = { name = "int4" }
is_not_null = true

[[attribute]]
num = 2
name = "created_at"
type = { name = "timestamptz" }
is_not_null = true

[[constraint]]
kind = "p"
key_attribute_nums = [1]
"#;

        let table: Table = toml::from_str(toml_str).unwrap();
        assert_eq!(table.schema, "public");
        assert_eq!(table.name, "orders");
        assert_eq!(table.attributes.len(), 2);
        assert_eq!(table.attributes[1].ty.name, TIMESTAMPTZ);
        assert_eq!(table.constraints[0].kind, ConstraintKind::PrimaryKey);
    }

    #[test]
    fn test_deserialize_tags() {
        let toml_str = r#"
num = 3
name = "shipped_at"
type = { name = "timestamptz" }
tags = { omit = "read,update", notNull = true, name = "sent_at" }
"#;

        let attr: Attribute = toml::from_str(toml_str).unwrap();
        assert_eq!(attr.tag("omit").unwrap().entries(), vec!["read", "update"]);
        assert_eq!(attr.tag("notNull"), Some(&TagValue::Flag(true)));
        assert_eq!(attr.tag("name"), Some(&TagValue::Text("sent_at".to_string())));
        assert!(!attr.is_not_null);
        assert!(attr.is_definitely_not_null());
    }

    #[test]
    fn test_not_null_signals() {
        let mut attr = Attribute {
            num: 1,
            name: "created_at".to_string(),
            description: None,
            ty: PgType {
                name: TIMESTAMPTZ.to_string(),
                domain_is_not_null: false,
            },
            type_modifier: None,
            is_not_null: false,
            tags: Tags::new(),
        };
        assert!(!attr.is_definitely_not_null());

        attr.ty.domain_is_not_null = true;
        assert!(attr.is_definitely_not_null());

        attr.ty.domain_is_not_null = false;
        attr.tags.insert("notNull".to_string(), TagValue::Flag(false));
        assert!(!attr.is_definitely_not_null());

        attr.tags.insert("notNull".to_string(), TagValue::Flag(true));
        assert!(attr.is_definitely_not_null());
    }

    #[test]
    fn test_key_membership() {
        let table = Table {
            schema: "public".to_string(),
            name: "orders".to_string(),
            description: None,
            tags: Tags::new(),
            attributes: Vec::new(),
            constraints: vec![
                Constraint {
                    kind: ConstraintKind::PrimaryKey,
                    key_attribute_nums: vec![1],
                },
                Constraint {
                    kind: ConstraintKind::ForeignKey,
                    key_attribute_nums: vec![3, 4],
                },
                Constraint {
                    kind: ConstraintKind::Unique,
                    key_attribute_nums: vec![5],
                },
            ],
        };

        let col = |num: i16| Attribute {
            num,
            name: format!("c{}", num),
            description: None,
            ty: PgType {
                name: TIMESTAMPTZ.to_string(),
                domain_is_not_null: false,
            },
            type_modifier: None,
            is_not_null: false,
            tags: Tags::new(),
        };

        assert!(table.is_primary_key_column(&col(1)));
        assert!(!table.is_primary_key_column(&col(3)));
        assert!(table.is_foreign_key_column(&col(4)));
        assert!(!table.is_foreign_key_column(&col(5)));
    }
}
