/// Custom GraphQL scalar types for Date and DateTime columns
///
/// These scalars handle ISO 8601 formatted date and datetime strings.

use async_graphql::dynamic::Scalar;
use async_graphql::Value;
use chrono::{DateTime as ChronoDateTime, NaiveDate};

pub const DATE: &str = "Date";
pub const DATETIME: &str = "DateTime";

/// Custom scalars every generated schema registers
pub fn register_custom_scalars() -> Vec<Scalar> {
    vec![date_scalar(), datetime_scalar()]
}

fn date_scalar() -> Scalar {
    Scalar::new(DATE)
        .description("ISO 8601 date format (YYYY-MM-DD)")
        .validator(|value| matches!(value, Value::String(s) if is_valid_date(s)))
}

fn datetime_scalar() -> Scalar {
    Scalar::new(DATETIME)
        .description("ISO 8601 datetime format with timezone")
        .validator(|value| matches!(value, Value::String(s) if is_valid_datetime(s)))
}

fn is_valid_date(s: &str) -> bool {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

fn is_valid_datetime(s: &str) -> bool {
    ChronoDateTime::parse_from_rfc3339(s).is_ok()
}
