/// Per-table field registry and query planning
///
/// A [`TablePlan`] records how each GraphQL field of a table type is
/// selected: base fields read a column, formatted fields defer to their
/// [`ExpressionGenerator`](crate::formatted::ExpressionGenerator).

use crate::error::{Result, StampinatorError};
use crate::formatted::{DerivedField, FieldSelection, FormatArgs};
use crate::fragment;
use crate::host::Host;
use crate::introspection::{Attribute, PgType, Table};
use crate::sql::{Fragment, QueryBuilder};

use indexmap::IndexMap;

#[derive(Debug, Clone)]
pub enum FieldPlan {
    Column {
        column: String,
        ty: PgType,
        type_modifier: Option<i32>,
    },
    Formatted(DerivedField),
}

/// One field requested by a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedField {
    pub name: String,
    pub selection: FieldSelection,
}

impl RequestedField {
    pub fn new(name: impl Into<String>, alias: Option<&str>, args: FormatArgs) -> Self {
        let name = name.into();
        let alias = alias.map(str::to_string).unwrap_or_else(|| name.clone());
        Self {
            name,
            selection: FieldSelection { alias, args },
        }
    }
}

#[derive(Debug, Clone)]
pub struct TablePlan {
    pub schema: String,
    pub table: String,
    pub type_name: String,
    fields: IndexMap<String, FieldPlan>,
}

impl TablePlan {
    pub fn new(table: &Table, type_name: impl Into<String>) -> Self {
        Self {
            schema: table.schema.clone(),
            table: table.name.clone(),
            type_name: type_name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Register a field; names must be unique within the type
    pub fn register(&mut self, name: impl Into<String>, field: FieldPlan) -> Result<()> {
        let name = name.into();
        if self.fields.contains_key(&name) {
            return Err(StampinatorError::SchemaGeneration(format!(
                "Field '{}' on type '{}' is defined more than once; rename one of the columns with a '@name' smart comment",
                name, self.type_name
            )));
        }
        self.fields.insert(name, field);
        Ok(())
    }

    pub fn register_column(&mut self, name: impl Into<String>, attr: &Attribute) -> Result<()> {
        self.register(
            name,
            FieldPlan::Column {
                column: attr.name.clone(),
                ty: attr.ty.clone(),
                type_modifier: attr.type_modifier,
            },
        )
    }

    pub fn register_formatted(&mut self, field: DerivedField) -> Result<()> {
        self.register(field.name.clone(), FieldPlan::Formatted(field))
    }

    pub fn field(&self, name: &str) -> Option<&FieldPlan> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &FieldPlan)> {
        self.fields.iter()
    }

    /// Build the select for a list query. Unknown names such as
    /// `__typename` select nothing.
    pub fn plan(
        &self,
        host: &dyn Host,
        requested: &[RequestedField],
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> QueryBuilder {
        let mut qb = QueryBuilder::new(&self.schema, &self.table);

        for field in requested {
            match self.fields.get(&field.name) {
                Some(FieldPlan::Column {
                    column,
                    ty,
                    type_modifier,
                }) => {
                    let expr = fragment![qb.table_alias(), ".", Fragment::identifier([column.as_str()])];
                    let value = host.select_value(ty, *type_modifier, expr);
                    qb.select(value, host.safe_alias(&field.selection.alias));
                }
                Some(FieldPlan::Formatted(derived)) => {
                    derived.generator.apply(host, &field.selection, &mut qb);
                }
                None => {}
            }
        }

        if let Some(limit) = limit {
            qb.limit(limit);
        }
        if let Some(offset) = offset {
            qb.offset(offset);
        }

        qb
    }
}
