use super::{Compiled, Fragment};
use crate::fragment;

use indexmap::IndexMap;

const TABLE_ALIAS: &str = "__local_0__";

/// Select-list builder for a single table
///
/// Selections are keyed by their output alias; selecting the same alias
/// again replaces the earlier expression, so planning a field twice is
/// harmless.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    from: Fragment,
    selects: IndexMap<String, Fragment>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl QueryBuilder {
    pub fn new(schema: &str, table: &str) -> Self {
        Self {
            from: Fragment::identifier([schema, table]),
            selects: IndexMap::new(),
            limit: None,
            offset: None,
        }
    }

    pub fn table_alias(&self) -> Fragment {
        Fragment::identifier([TABLE_ALIAS])
    }

    pub fn select(&mut self, expr: Fragment, alias: impl Into<String>) {
        self.selects.insert(alias.into(), expr);
    }

    pub fn selection(&self, alias: &str) -> Option<&Fragment> {
        self.selects.get(alias)
    }

    pub fn selection_count(&self) -> usize {
        self.selects.len()
    }

    pub fn limit(&mut self, limit: i64) {
        self.limit = Some(limit);
    }

    pub fn offset(&mut self, offset: i64) {
        self.offset = Some(offset);
    }

    pub fn build(&self) -> Compiled {
        let columns = if self.selects.is_empty() {
            // Still one output row per table row
            Fragment::raw("1")
        } else {
            Fragment::join(
                self.selects.iter().map(|(alias, expr)| {
                    fragment![expr, " as ", Fragment::identifier([alias.as_str()])]
                }),
                ", ",
            )
        };

        let mut query = fragment![
            "select ",
            columns,
            " from ",
            &self.from,
            " as ",
            self.table_alias(),
        ];

        if let Some(limit) = self.limit {
            query.push(fragment![" limit ", Fragment::value(limit)]);
        }
        if let Some(offset) = self.offset {
            query.push(fragment![" offset ", Fragment::value(offset)]);
        }

        query.compile()
    }
}
