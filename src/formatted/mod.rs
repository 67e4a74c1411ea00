/// Formatted timestamp fields
///
/// For every plain `timestamptz` column of a table this synthesizes an
/// extra GraphQL field (`createdAt` → `createdAtFormatted`) whose value is
/// rendered by the database with a caller-chosen format and timezone.
///
/// Synthesis happens in two phases:
/// 1. [`FormattedTimestamps::extend_fields`] runs once per schema build and
///    returns a [`DerivedField`] per eligible column.
/// 2. While planning a query, the host calls
///    [`ExpressionGenerator::apply`] for each selection of such a field.

mod adapter;
mod expression;
mod filter;
mod function;
mod naming;

pub use adapter::ValueAdapter;
pub use expression::{
    ArgumentSpec, ExpressionGenerator, FieldSelection, FormatArgs, ARGUMENTS, DEFAULT_FORMAT,
    FORMAT_ARG, TZ_ARG,
};
pub use filter::is_eligible;
pub use function::DATE_FORMAT_TZ_FUNCTION;
pub use naming::{default_name_fn, suffix_name_fn, NameFn, DEFAULT_SUFFIX};

use crate::config::ExtensionConfig;
use crate::host::Host;
use crate::introspection::{Attribute, Table};

use async_graphql::dynamic::TypeRef;
use std::fmt;
use std::sync::Arc;

/// Construction-time options
#[derive(Clone)]
pub struct Options {
    pub name_fn: NameFn,
    /// Used when a query omits `format`
    pub default_format: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            name_fn: default_name_fn(),
            default_format: DEFAULT_FORMAT.to_string(),
        }
    }
}

impl From<&ExtensionConfig> for Options {
    fn from(config: &ExtensionConfig) -> Self {
        Self {
            name_fn: suffix_name_fn(config.suffix.clone()),
            default_format: config.default_format.clone(),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("default_format", &self.default_format)
            .finish_non_exhaustive()
    }
}

/// A synthesized field, ready to be registered on the table's type
#[derive(Debug, Clone)]
pub struct DerivedField {
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<ArgumentSpec>,
    pub nullable: bool,
    /// Ordinal of the column the field renders
    pub attribute_num: i16,
    pub generator: ExpressionGenerator,
    pub adapter: ValueAdapter,
}

impl DerivedField {
    pub fn type_ref(&self) -> TypeRef {
        if self.nullable {
            TypeRef::named(TypeRef::STRING)
        } else {
            TypeRef::named_nn(TypeRef::STRING)
        }
    }
}

#[derive(Clone)]
pub struct FormattedTimestamps {
    host: Arc<dyn Host>,
    options: Options,
}

impl FormattedTimestamps {
    pub fn new(host: Arc<dyn Host>, options: Options) -> Self {
        Self { host, options }
    }

    pub fn host(&self) -> &dyn Host {
        self.host.as_ref()
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Fields to add to `table`'s type, in column order
    pub fn extend_fields(&self, table: &Table) -> Vec<DerivedField> {
        table
            .attributes
            .iter()
            .filter(|attr| is_eligible(self.host(), table, attr))
            .map(|attr| self.derive_field(table, attr))
            .collect()
    }

    fn derive_field(&self, table: &Table, attr: &Attribute) -> DerivedField {
        let name = (self.options.name_fn)(&self.host.inflect_column_name(attr));

        tracing::debug!(
            "Adding field '{}' for column \"{}\".\"{}\".\"{}\". Rename the column with a smart comment: comment on column \"{}\".\"{}\".\"{}\" is E'@name newNameHere';",
            name,
            table.schema,
            table.name,
            attr.name,
            table.schema,
            table.name,
            attr.name,
        );

        DerivedField {
            name,
            description: attr.description.clone(),
            arguments: ARGUMENTS.to_vec(),
            nullable: !attr.is_definitely_not_null(),
            attribute_num: attr.num,
            generator: ExpressionGenerator::new(attr, &self.options.default_format),
            adapter: ValueAdapter::for_type(self.host(), &attr.ty),
        }
    }
}

impl fmt::Debug for FormattedTimestamps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormattedTimestamps")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::PgHost;
    use crate::introspection::{Constraint, ConstraintKind, PgType, TagValue, Tags};

    fn column(num: i16, name: &str, type_name: &str, is_not_null: bool) -> Attribute {
        Attribute {
            num,
            name: name.to_string(),
            description: None,
            ty: PgType {
                name: type_name.to_string(),
                domain_is_not_null: false,
            },
            type_modifier: None,
            is_not_null,
            tags: Tags::new(),
        }
    }

    fn orders() -> Table {
        let mut created_at = column(2, "created_at", "timestamptz", true);
        created_at.description = Some("When the order was placed".to_string());

        Table {
            schema: "public".to_string(),
            name: "orders".to_string(),
            description: None,
            tags: Tags::new(),
            attributes: vec![
                column(1, "id", "timestamptz", true),
                created_at,
                column(3, "shipped_at", "timestamptz", false),
                column(4, "total", "numeric", true),
            ],
            constraints: vec![Constraint {
                kind: ConstraintKind::PrimaryKey,
                key_attribute_nums: vec![1],
            }],
        }
    }

    fn extension(options: Options) -> FormattedTimestamps {
        FormattedTimestamps::new(Arc::new(PgHost::new()), options)
    }

    #[test]
    fn test_orders_fields() {
        let fields = extension(Options::default()).extend_fields(&orders());
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["createdAtFormatted", "shippedAtFormatted"]);

        let created = &fields[0];
        assert!(!created.nullable);
        assert_eq!(created.type_ref().to_string(), "String!");
        assert_eq!(created.description.as_deref(), Some("When the order was placed"));
        assert_eq!(created.attribute_num, 2);
        let args: Vec<&str> = created.arguments.iter().map(|a| a.name).collect();
        assert_eq!(args, vec!["format", "tz"]);

        let shipped = &fields[1];
        assert!(shipped.nullable);
        assert_eq!(shipped.type_ref().to_string(), "String");
    }

    #[test]
    fn test_not_null_tag_and_domain() {
        let mut table = orders();
        table.attributes[2]
            .tags
            .insert("notNull".to_string(), TagValue::Flag(true));
        let mut domain = column(5, "delivered_at", "timestamptz", false);
        domain.ty.domain_is_not_null = true;
        table.attributes.push(domain);

        let fields = extension(Options::default()).extend_fields(&table);
        assert!(fields.iter().all(|f| !f.nullable));
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn test_custom_name_fn() {
        let options = Options {
            name_fn: Arc::new(|name: &str| format!("{}InZone", name)),
            default_format: "YYYY".to_string(),
        };
        let fields = extension(options).extend_fields(&orders());
        assert_eq!(fields[0].name, "createdAtInZone");
        assert_eq!(
            fields[0].generator,
            ExpressionGenerator::new(&orders().attributes[1], "YYYY")
        );
    }

    #[test]
    fn test_synthesis_is_repeatable() {
        let ext = extension(Options::default());
        let table = orders();
        let first = ext.extend_fields(&table);
        let second = ext.extend_fields(&table);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.nullable, b.nullable);
            assert_eq!(a.arguments, b.arguments);
            assert_eq!(a.attribute_num, b.attribute_num);
            assert_eq!(a.generator, b.generator);
        }
    }

    #[test]
    fn test_table_without_timestamps() {
        let mut table = orders();
        table.attributes.retain(|a| a.ty.name != "timestamptz");
        assert!(extension(Options::default()).extend_fields(&table).is_empty());
    }
}
