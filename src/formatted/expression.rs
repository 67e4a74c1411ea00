/// SQL for formatted timestamp fields
///
/// Formatting happens in the database through `public.date_format_tz`.
/// Both the format pattern and the timezone come from the query, so they
/// are only ever bound as parameters.

use crate::fragment;
use crate::host::Host;
use crate::introspection::{Attribute, PgType};
use crate::sql::{Fragment, QueryBuilder};

/// ISO 8601, e.g. `2024-01-15T10:00:00+00`
pub const DEFAULT_FORMAT: &str = r#"YYYY-MM-DD"T"HH24:MI:SSOF"#;

pub const FORMAT_ARG: &str = "format";
pub const TZ_ARG: &str = "tz";

/// Argument declared on every formatted field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentSpec {
    pub name: &'static str,
    pub description: &'static str,
}

pub const ARGUMENTS: [ArgumentSpec; 2] = [
    ArgumentSpec {
        name: FORMAT_ARG,
        description: "See https://www.postgresql.org/docs/current/functions-formatting.html",
    },
    ArgumentSpec {
        name: TZ_ARG,
        description: "Timezone to format the date in",
    },
];

/// Query-time arguments of a formatted field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatArgs {
    pub format: Option<String>,
    pub tz: Option<String>,
}

impl FormatArgs {
    pub fn new(format: Option<String>, tz: Option<String>) -> Self {
        Self { format, tz }
    }

    // Empty strings count as not supplied
    fn format(&self) -> Option<&str> {
        self.format.as_deref().filter(|s| !s.is_empty())
    }

    fn tz(&self) -> Option<&str> {
        self.tz.as_deref().filter(|s| !s.is_empty())
    }
}

/// One selection of a formatted field within a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelection {
    /// Response key: the alias if the query gave one, else the field name
    pub alias: String,
    pub args: FormatArgs,
}

/// Deferred generator that plans a formatted field into a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionGenerator {
    column: String,
    ty: PgType,
    type_modifier: Option<i32>,
    default_format: String,
}

impl ExpressionGenerator {
    pub fn new(attr: &Attribute, default_format: &str) -> Self {
        Self {
            column: attr.name.clone(),
            ty: attr.ty.clone(),
            type_modifier: attr.type_modifier,
            default_format: default_format.to_string(),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn expression(&self, args: &FormatArgs, table_alias: &Fragment) -> Fragment {
        let tz = match args.tz() {
            Some(tz) => Fragment::value(tz),
            None => Fragment::raw("current_setting('TimeZone')"),
        };
        let format = Fragment::value(args.format().unwrap_or(self.default_format.as_str()));
        let column = fragment![table_alias, ".", Fragment::identifier([self.column.as_str()])];

        // Parenthesized column so composite access like (row).col parses
        fragment![
            "(public.date_format_tz((",
            column,
            "), ",
            format,
            ", ",
            tz,
            "))",
        ]
    }

    pub fn apply(&self, host: &dyn Host, selection: &FieldSelection, qb: &mut QueryBuilder) {
        let expr = self.expression(&selection.args, &qb.table_alias());
        let value = host.select_value(&self.ty, self.type_modifier, expr);
        qb.select(value, host.safe_alias(&selection.alias));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::PgHost;
    use crate::introspection::Tags;
    use crate::sql::SqlValue;

    fn created_at() -> Attribute {
        Attribute {
            num: 2,
            name: "created_at".to_string(),
            description: None,
            ty: PgType {
                name: "timestamptz".to_string(),
                domain_is_not_null: false,
            },
            type_modifier: None,
            is_not_null: true,
            tags: Tags::new(),
        }
    }

    fn plan(args: FormatArgs) -> crate::sql::Compiled {
        let generator = ExpressionGenerator::new(&created_at(), DEFAULT_FORMAT);
        let mut qb = QueryBuilder::new("public", "orders");
        generator.apply(
            &PgHost::new(),
            &FieldSelection {
                alias: "createdAtFormatted".to_string(),
                args,
            },
            &mut qb,
        );
        qb.build()
    }

    #[test]
    fn test_defaults_use_session_timezone() {
        let compiled = plan(FormatArgs::default());

        assert_eq!(
            compiled.text,
            "select (public.date_format_tz((\"__local_0__\".\"created_at\"), $1, current_setting('TimeZone'))) \
             as \"@createdAtFormatted\" from \"public\".\"orders\" as \"__local_0__\""
        );
        assert_eq!(compiled.params, vec![SqlValue::Text(DEFAULT_FORMAT.to_string())]);
    }

    #[test]
    fn test_supplied_arguments_are_bound() {
        let compiled = plan(FormatArgs::new(
            Some("YYYY".to_string()),
            Some("UTC".to_string()),
        ));

        assert!(compiled
            .text
            .contains(r#"(public.date_format_tz(("__local_0__"."created_at"), $1, $2))"#));
        assert!(!compiled.text.contains("YYYY"));
        assert!(!compiled.text.contains("UTC"));
        assert!(!compiled.text.contains("current_setting"));
        assert_eq!(
            compiled.params,
            vec![
                SqlValue::Text("YYYY".to_string()),
                SqlValue::Text("UTC".to_string())
            ]
        );
    }

    #[test]
    fn test_hostile_arguments_never_reach_sql_text() {
        let format = "YYYY'), now(), ('";
        let tz = "UTC')); drop table orders; --";
        let compiled = plan(FormatArgs::new(Some(format.to_string()), Some(tz.to_string())));

        assert!(!compiled.text.contains("drop table"));
        assert!(!compiled.text.contains("now()"));
        assert_eq!(
            compiled.params,
            vec![SqlValue::Text(format.to_string()), SqlValue::Text(tz.to_string())]
        );
    }

    #[test]
    fn test_empty_arguments_fall_back_to_defaults() {
        let compiled = plan(FormatArgs::new(Some(String::new()), Some(String::new())));
        assert!(compiled.text.contains("current_setting('TimeZone')"));
        assert_eq!(compiled.params, vec![SqlValue::Text(DEFAULT_FORMAT.to_string())]);
    }

    #[test]
    fn test_only_tz_supplied() {
        let compiled = plan(FormatArgs::new(None, Some("Europe/Paris".to_string())));
        assert_eq!(
            compiled.params,
            vec![
                SqlValue::Text(DEFAULT_FORMAT.to_string()),
                SqlValue::Text("Europe/Paris".to_string())
            ]
        );
    }

    #[test]
    fn test_planning_twice_selects_once() {
        let generator = ExpressionGenerator::new(&created_at(), DEFAULT_FORMAT);
        let host = PgHost::new();
        let selection = FieldSelection {
            alias: "createdAtFormatted".to_string(),
            args: FormatArgs::new(Some("YYYY".to_string()), None),
        };

        let mut qb = QueryBuilder::new("public", "orders");
        generator.apply(&host, &selection, &mut qb);
        let first = qb.build();
        generator.apply(&host, &selection, &mut qb);

        assert_eq!(qb.selection_count(), 1);
        assert_eq!(qb.build(), first);
    }
}
