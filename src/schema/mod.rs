/// GraphQL schema generation from introspected Postgres tables
///
/// This module provides functionality to generate GraphQL schemas from table
/// snapshots, including type mapping, query planning, resolvers, and dynamic
/// schema building.

mod builder;
mod executor;
mod plan;
mod resolver;
mod scalars;
mod type_mapping;

pub use builder::SchemaBuilder;
pub use executor::Executor;
pub use plan::{FieldPlan, RequestedField, TablePlan};
pub use resolver::{create_formatted_field, create_list_resolver, create_value_field};
pub use scalars::register_custom_scalars;
pub use type_mapping::{pg_to_graphql_type, to_snake_case};
