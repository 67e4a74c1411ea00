use super::{Converter, Host};
use crate::fragment;
use crate::introspection::{Attribute, PgType, Table, TagValue};
use crate::sql::Fragment;

use async_graphql::Value;
use heck::{ToLowerCamelCase, ToUpperCamelCase};
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;

/// Longest response alias used verbatim as a select alias. Postgres
/// truncates identifiers past 63 bytes.
const MAX_VERBATIM_ALIAS: usize = 60;

/// Reference host for Postgres catalogs
///
/// - only user columns (`attnum > 0`) are visible
/// - `@omit` hides a column from every action, `@omit read,update` from the listed ones
/// - `@name` renames a column or table before inflection
#[derive(Debug, Clone, Default)]
pub struct PgHost;

impl PgHost {
    pub fn new() -> Self {
        Self
    }
}

impl Host for PgHost {
    fn column_visible(&self, attr: &Attribute, _table: &Table) -> bool {
        attr.num > 0
    }

    fn is_omitted_from_read(&self, attr: &Attribute) -> bool {
        match attr.tag("omit") {
            Some(TagValue::Flag(flag)) => *flag,
            Some(value) => value
                .entries()
                .iter()
                .any(|action| action.eq_ignore_ascii_case("read") || action.eq_ignore_ascii_case("all")),
            None => false,
        }
    }

    fn inflect_column_name(&self, attr: &Attribute) -> String {
        match attr.tag("name") {
            Some(TagValue::Text(name)) => name.to_lower_camel_case(),
            _ => attr.name.to_lower_camel_case(),
        }
    }

    fn inflect_table_name(&self, table: &Table) -> String {
        match table.tags.get("name") {
            Some(TagValue::Text(name)) => name.to_upper_camel_case(),
            _ => table.name.to_upper_camel_case(),
        }
    }

    fn select_value(&self, ty: &PgType, _type_modifier: Option<i32>, expr: Fragment) -> Fragment {
        match ty.name.as_str() {
            // Wider than a JSON number can carry
            "int8" | "numeric" => fragment!["(", expr, ")::text"],
            _ => expr,
        }
    }

    fn safe_alias(&self, alias: &str) -> String {
        if alias.len() <= MAX_VERBATIM_ALIAS && !alias.starts_with('@') {
            format!("@{}", alias)
        } else {
            let mut hasher = DefaultHasher::new();
            alias.hash(&mut hasher);
            format!("@@{:016x}", hasher.finish())
        }
    }

    fn storage_to_query(&self, ty: &PgType) -> Converter {
        match ty.name.as_str() {
            "int8" | "numeric" => numeric_to_string(),
            _ => passthrough(),
        }
    }
}

fn passthrough() -> Converter {
    Arc::new(json_to_value)
}

fn numeric_to_string() -> Converter {
    Arc::new(|raw: &serde_json::Value| match raw {
        serde_json::Value::Number(n) => Value::String(n.to_string()),
        other => json_to_value(other),
    })
}

fn json_to_value(raw: &serde_json::Value) -> Value {
    Value::from_json(raw.clone()).unwrap_or(Value::Null)
}
