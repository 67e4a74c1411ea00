/// Parameterized SQL fragments
///
/// A [`Fragment`] is built from three kinds of pieces: trusted SQL text
/// (only `&'static str`), quoted identifiers, and bound values. Runtime
/// strings therefore never reach the statement text unquoted; values are
/// rendered as `$n` placeholders and collected separately when the
/// fragment is compiled.

mod params;
mod query;

pub use params::{Params, Placeholder, SqlValue};
pub use query::QueryBuilder;

use std::fmt::Write;

/// Concatenate fragments, `&'static str` text, or anything else convertible
/// into a [`Fragment`].
#[macro_export]
macro_rules! fragment {
    ($( $part:expr ),* $(,)?) => {{
        let mut fragment = $crate::sql::Fragment::empty();
        $(
            fragment.push($part);
        )*
        fragment
    }};
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Raw(&'static str),
    Identifier(Vec<String>),
    Value(SqlValue),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    nodes: Vec<Node>,
}

/// SQL text with its bound parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    pub text: String,
    pub params: Vec<SqlValue>,
}

impl Fragment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn raw(text: &'static str) -> Self {
        Self {
            nodes: vec![Node::Raw(text)],
        }
    }

    /// Dotted, double-quoted identifier, e.g. `"public"."orders"`
    pub fn identifier<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            nodes: vec![Node::Identifier(parts.into_iter().map(Into::into).collect())],
        }
    }

    pub fn value(value: impl Into<SqlValue>) -> Self {
        Self {
            nodes: vec![Node::Value(value.into())],
        }
    }

    pub fn join(fragments: impl IntoIterator<Item = Fragment>, separator: &'static str) -> Self {
        let mut joined = Self::empty();
        for (i, fragment) in fragments.into_iter().enumerate() {
            if i > 0 {
                joined.push(separator);
            }
            joined.push(fragment);
        }
        joined
    }

    pub fn push(&mut self, part: impl Into<Fragment>) {
        self.nodes.extend(part.into().nodes);
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Values this fragment binds, in order of appearance
    pub fn values(&self) -> impl Iterator<Item = &SqlValue> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Value(value) => Some(value),
            _ => None,
        })
    }

    pub fn compile(&self) -> Compiled {
        let mut text = String::new();
        let mut params = Vec::new();
        self.to_sql(&mut text, &mut params);
        Compiled { text, params }
    }

    pub fn to_sql(&self, dst: &mut String, params: &mut impl Params) {
        for node in &self.nodes {
            match node {
                Node::Raw(text) => dst.push_str(text),
                Node::Identifier(parts) => {
                    for (i, part) in parts.iter().enumerate() {
                        if i > 0 {
                            dst.push('.');
                        }
                        dst.push('"');
                        dst.push_str(&part.replace('"', "\"\""));
                        dst.push('"');
                    }
                }
                Node::Value(value) => {
                    let placeholder = params.push(value);
                    // Writing to a String cannot fail
                    let _ = write!(dst, "{}", placeholder);
                }
            }
        }
    }
}

impl From<&'static str> for Fragment {
    fn from(text: &'static str) -> Self {
        Fragment::raw(text)
    }
}

impl From<&Fragment> for Fragment {
    fn from(fragment: &Fragment) -> Self {
        fragment.clone()
    }
}
