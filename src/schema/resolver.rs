/// GraphQL resolvers for generated table types
///
/// This module provides:
/// - List resolvers that plan and run one statement per query
/// - Field resolvers that read their cell from the parent row by safe alias

use crate::formatted::{DerivedField, FormatArgs, ValueAdapter, FORMAT_ARG, TZ_ARG};
use crate::host::{Host, Row};
use crate::schema::executor::Executor;
use crate::schema::plan::{RequestedField, TablePlan};
use crate::schema::type_mapping::to_snake_case;

use async_graphql::dynamic::{Field, FieldFuture, FieldValue, InputValue, ResolverContext, TypeRef};
use async_graphql::{Name, Value};
use std::sync::Arc;

const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 1000;

/// Create list_X(limit, offset) resolver for a table type
///
/// The resolver walks its selection set, plans every requested field into
/// a single select, and hands the statement to the [`Executor`] stored in
/// the schema data.
pub fn create_list_resolver(plan: Arc<TablePlan>, host: Arc<dyn Host>) -> Field {
    let field_name = format!("list_{}", to_snake_case(&plan.type_name));
    let type_name = plan.type_name.clone();

    Field::new(
        field_name,
        TypeRef::named_nn_list_nn(&type_name),
        move |ctx: ResolverContext| {
            let plan = plan.clone();
            let host = host.clone();

            FieldFuture::new(async move {
                let limit: i64 = ctx
                    .args
                    .try_get("limit")
                    .ok()
                    .and_then(|v| v.i64().ok())
                    .unwrap_or(DEFAULT_LIMIT)
                    .clamp(0, MAX_LIMIT);
                let offset: i64 = ctx
                    .args
                    .try_get("offset")
                    .ok()
                    .and_then(|v| v.i64().ok())
                    .unwrap_or(0)
                    .max(0);

                let requested = ctx
                    .ctx
                    .field()
                    .selection_set()
                    .map(|child| -> async_graphql::Result<RequestedField> {
                        let args = format_args(&child.arguments()?);
                        Ok(RequestedField::new(child.name(), child.alias(), args))
                    })
                    .collect::<async_graphql::Result<Vec<_>>>()?;
                let statement = plan
                    .plan(host.as_ref(), &requested, Some(limit), Some(offset))
                    .build();

                tracing::debug!("Executing query: {} {:?}", statement.text, statement.params);

                let executor = ctx
                    .data::<Arc<dyn Executor>>()
                    .map_err(|_e| "No query executor configured")?;

                let rows = executor.query(&statement).await?;

                Ok(Some(FieldValue::list(
                    rows.into_iter().map(FieldValue::owned_any),
                )))
            })
        },
    )
    .argument(InputValue::new("limit", TypeRef::named(TypeRef::INT)))
    .argument(InputValue::new("offset", TypeRef::named(TypeRef::INT)))
}

/// Field that reads its value from the parent row
pub fn create_value_field(
    name: &str,
    type_ref: TypeRef,
    adapter: ValueAdapter,
    host: Arc<dyn Host>,
) -> Field {
    Field::new(name, type_ref, move |ctx: ResolverContext| {
        let adapter = adapter.clone();
        let host = host.clone();

        FieldFuture::new(async move {
            let row = ctx.parent_value.try_downcast_ref::<Row>()?;
            let alias = host.safe_alias(&response_key(&ctx));
            Ok(Some(FieldValue::value(adapter.resolve(row, &alias))))
        })
    })
}

/// Formatted timestamp field with its `format` and `tz` arguments
pub fn create_formatted_field(derived: &DerivedField, host: Arc<dyn Host>) -> Field {
    let mut field = create_value_field(
        &derived.name,
        derived.type_ref(),
        derived.adapter.clone(),
        host,
    );

    for arg in &derived.arguments {
        field = field.argument(
            InputValue::new(arg.name, TypeRef::named(TypeRef::STRING)).description(arg.description),
        );
    }

    if let Some(desc) = &derived.description {
        field = field.description(desc);
    }

    field
}

/// Response key of the field being resolved
fn response_key(ctx: &ResolverContext<'_>) -> String {
    let field = ctx.ctx.field();
    field.alias().unwrap_or_else(|| field.name()).to_string()
}

fn format_args(arguments: &[(Name, Value)]) -> FormatArgs {
    let string_arg = |key: &str| {
        arguments
            .iter()
            .find(|(name, _)| name.as_str() == key)
            .and_then(|(_, value)| match value {
                Value::String(s) => Some(s.clone()),
                _ => None,
            })
    };

    FormatArgs::new(string_arg(FORMAT_ARG), string_arg(TZ_ARG))
}
