/// Postgres to GraphQL type mapping for base column fields

use crate::schema::scalars::{DATE, DATETIME};

use async_graphql::dynamic::TypeRef;

/// Map a Postgres type name to a GraphQL TypeRef
///
/// Returns `None` for types the reference schema does not expose; the
/// column is skipped.
///
/// - `int2`, `int4` → `Int`
/// - `int8`, `numeric` → `String` (wider than a GraphQL Int)
/// - `float4`, `float8` → `Float`
/// - text-like types and `uuid` → `String`
/// - `bool` → `Boolean`
/// - `date` → `Date`, `timestamp`/`timestamptz` → `DateTime`
pub fn pg_to_graphql_type(column_name: &str, type_name: &str, nullable: bool) -> Option<TypeRef> {
    let base = match type_name {
        "int2" | "int4" => TypeRef::INT,
        "int8" | "numeric" => TypeRef::STRING,
        "float4" | "float8" => TypeRef::FLOAT,
        "text" | "varchar" | "bpchar" | "char" | "name" | "citext" | "uuid" => TypeRef::STRING,
        "bool" => TypeRef::BOOLEAN,
        "date" => DATE,
        "timestamp" | "timestamptz" => DATETIME,
        _ => {
            tracing::warn!(
                "Unsupported Postgres type '{}' for column '{}', skipping field",
                type_name,
                column_name
            );
            return None;
        }
    };

    Some(if nullable {
        TypeRef::named(base)
    } else {
        TypeRef::named_nn(base)
    })
}

/// Helper function to convert a GraphQL type name to snake_case
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() && i > 0 {
            result.push('_');
            result.push(ch.to_ascii_lowercase());
        } else {
            result.push(ch.to_ascii_lowercase());
        }
    }
    result
}
