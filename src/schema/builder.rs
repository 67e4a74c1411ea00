/// GraphQL schema builder
///
/// This module provides the `SchemaBuilder` which generates a complete GraphQL schema
/// from introspected tables, including the formatted timestamp fields.

use crate::config::ExtensionConfig;
use crate::error::{Result, StampinatorError};
use crate::formatted::{FormattedTimestamps, Options, ValueAdapter};
use crate::host::{Host, PgHost};
use crate::introspection::Table;
use crate::schema::executor::Executor;
use crate::schema::plan::{FieldPlan, TablePlan};
use crate::schema::resolver::{create_formatted_field, create_list_resolver, create_value_field};
use crate::schema::scalars::register_custom_scalars;
use crate::schema::type_mapping::pg_to_graphql_type;

use async_graphql::dynamic::{Object, Schema};
use std::sync::Arc;

/// Schema builder for generating GraphQL schemas from Postgres tables
pub struct SchemaBuilder {
    host: Arc<dyn Host>,
    extension: FormattedTimestamps,
    executor: Option<Arc<dyn Executor>>,
}

impl SchemaBuilder {
    pub fn new(host: Arc<dyn Host>, options: Options) -> Self {
        let extension = FormattedTimestamps::new(host.clone(), options);
        Self {
            host,
            extension,
            executor: None,
        }
    }

    /// Builder on the Postgres reference host
    pub fn from_config(config: &ExtensionConfig) -> Self {
        Self::new(Arc::new(PgHost::new()), Options::from(config))
    }

    /// Executor the list resolvers run their statements through
    pub fn with_executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn host(&self) -> &dyn Host {
        self.host.as_ref()
    }

    /// Build complete GraphQL schema from tables
    pub fn build_schema(&self, tables: &[Table]) -> Result<Schema> {
        if tables.is_empty() {
            return Err(StampinatorError::SchemaGeneration(
                "No tables provided".to_string(),
            ));
        }

        let mut query = Object::new("Query");
        let mut objects = Vec::with_capacity(tables.len());

        for table in tables {
            let plan = Arc::new(self.table_plan(table)?);

            tracing::info!("Building schema for table: {}.{}", table.schema, table.name);

            objects.push(self.build_table_type(table, &plan));
            query = query.field(create_list_resolver(plan, self.host.clone()));
        }

        let mut schema_builder = Schema::build(query.type_name(), None, None);

        for scalar in register_custom_scalars() {
            schema_builder = schema_builder.register(scalar);
        }

        for object in objects {
            schema_builder = schema_builder.register(object);
        }

        schema_builder = schema_builder.register(query);

        if let Some(executor) = &self.executor {
            schema_builder = schema_builder.data(executor.clone());
        }

        schema_builder.finish().map_err(|e| {
            StampinatorError::SchemaGeneration(format!("Failed to build schema: {}", e))
        })
    }

    /// Register base column fields, then the formatted fields, for one table
    pub fn table_plan(&self, table: &Table) -> Result<TablePlan> {
        let mut plan = TablePlan::new(table, self.host.inflect_table_name(table));

        for attr in &table.attributes {
            if !self.host.column_visible(attr, table) || self.host.is_omitted_from_read(attr) {
                continue;
            }
            if pg_to_graphql_type(&attr.name, &attr.ty.name, true).is_none() {
                continue;
            }
            plan.register_column(self.host.inflect_column_name(attr), attr)?;
        }

        let derived = self.extension.extend_fields(table);
        tracing::debug!(
            "Adding {} formatted fields to '{}'",
            derived.len(),
            plan.type_name
        );
        for field in derived {
            plan.register_formatted(field)?;
        }

        Ok(plan)
    }

    fn build_table_type(&self, table: &Table, plan: &TablePlan) -> Object {
        let mut object = Object::new(&plan.type_name);

        if let Some(desc) = &table.description {
            object = object.description(desc);
        }

        for (name, field) in plan.fields() {
            let graphql_field = match field {
                FieldPlan::Column { column, ty, .. } => {
                    let nullable = table
                        .attribute(column)
                        .map(|attr| !attr.is_definitely_not_null())
                        .unwrap_or(true);
                    let Some(type_ref) = pg_to_graphql_type(column, &ty.name, nullable) else {
                        continue;
                    };
                    let mut graphql_field = create_value_field(
                        name,
                        type_ref,
                        ValueAdapter::for_type(self.host(), ty),
                        self.host.clone(),
                    );
                    if let Some(desc) = table.attribute(column).and_then(|a| a.description.as_ref()) {
                        graphql_field = graphql_field.description(desc);
                    }
                    graphql_field
                }
                FieldPlan::Formatted(derived) => {
                    create_formatted_field(derived, self.host.clone())
                }
            };

            object = object.field(graphql_field);
        }

        object
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::from_config(&ExtensionConfig::default())
    }
}
