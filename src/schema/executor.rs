use crate::error::Result;
use crate::host::Row;
use crate::sql::Compiled;

use async_trait::async_trait;

/// Runs planned statements against the database
///
/// Each returned row maps select aliases to the raw cell values, e.g. as
/// produced by `row_to_json`.
#[async_trait]
pub trait Executor: Send + Sync + 'static {
    async fn query(&self, statement: &Compiled) -> Result<Vec<Row>>;
}
