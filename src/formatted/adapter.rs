use crate::host::{Converter, Host, Row};
use crate::introspection::PgType;

use async_graphql::Value;
use std::fmt;

/// Converts the selected cell back into a GraphQL value
///
/// The converter is looked up from the attribute's declared type rather
/// than fixed to strings, so it follows whatever the host does for that
/// type.
#[derive(Clone)]
pub struct ValueAdapter {
    converter: Converter,
}

impl ValueAdapter {
    pub fn for_type(host: &dyn Host, ty: &PgType) -> Self {
        Self {
            converter: host.storage_to_query(ty),
        }
    }

    /// Cell stored under `alias`, converted; null when the row lacks it
    pub fn resolve(&self, row: &Row, alias: &str) -> Value {
        match row.get(alias) {
            Some(raw) => (self.converter)(raw),
            None => Value::Null,
        }
    }
}

impl fmt::Debug for ValueAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueAdapter").finish_non_exhaustive()
    }
}
