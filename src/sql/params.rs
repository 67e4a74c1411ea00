use std::fmt;

/// Value bound to a statement placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Text(String),
    Int(i64),
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Text(text) => write!(f, "{:?}", text),
            SqlValue::Int(int) => write!(f, "{}", int),
        }
    }
}

pub trait Params {
    fn push(&mut self, param: &SqlValue) -> Placeholder;
}

/// 1-based position of a bound parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(pub usize);

impl Params for Vec<SqlValue> {
    fn push(&mut self, value: &SqlValue) -> Placeholder {
        self.push(value.clone());
        Placeholder(self.len())
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}
