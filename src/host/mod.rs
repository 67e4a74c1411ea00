/// Capabilities the schema host provides to schema extensions
///
/// Extensions never reach into the host's internals; everything they need
/// is listed on [`Host`] and injected when the extension is built.

mod postgres;

pub use postgres::PgHost;

use crate::introspection::{Attribute, PgType, Table};
use crate::sql::Fragment;

use async_graphql::Value;
use std::sync::Arc;

/// Raw row as returned by the database, keyed by select alias
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Storage-to-query conversion for one declared type
pub type Converter = Arc<dyn Fn(&serde_json::Value) -> Value + Send + Sync>;

pub trait Host: Send + Sync {
    /// Generic column visibility policy
    fn column_visible(&self, attr: &Attribute, table: &Table) -> bool;

    /// True when the column is tagged to be left out of reads
    fn is_omitted_from_read(&self, attr: &Attribute) -> bool;

    /// Canonical GraphQL name of a column
    fn inflect_column_name(&self, attr: &Attribute) -> String;

    /// GraphQL type name of a table
    fn inflect_table_name(&self, table: &Table) -> String;

    /// Wrap a selected expression according to the type it evaluates to.
    /// Scalars are selected as-is.
    fn select_value(&self, _ty: &PgType, _type_modifier: Option<i32>, expr: Fragment) -> Fragment {
        expr
    }

    /// Select alias for a GraphQL response alias
    fn safe_alias(&self, alias: &str) -> String;

    fn storage_to_query(&self, ty: &PgType) -> Converter;
}
