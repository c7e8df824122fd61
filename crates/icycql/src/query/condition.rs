use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Predicate
///
/// Comparison operator applied between a column and its bound value(s).
///

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Predicate {
    Eq,
    Gt,
    Ge,
    Lt,
    Le,
    In,
}

///
/// Condition
///
/// One predicate against one column. Scalar predicates carry `value`;
/// membership carries `values`, each of which binds its own placeholder.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub column: String,
    pub predicate: Predicate,
    pub value: Option<Value>,
    pub values: Vec<Value>,
}

impl Condition {
    fn scalar(column: impl Into<String>, predicate: Predicate, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            predicate,
            value: Some(value.into()),
            values: Vec::new(),
        }
    }
}

/// `column = ?`
pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Condition {
    Condition::scalar(column, Predicate::Eq, value)
}

/// `column > ?`
pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Condition {
    Condition::scalar(column, Predicate::Gt, value)
}

/// `column >= ?`
pub fn ge(column: impl Into<String>, value: impl Into<Value>) -> Condition {
    Condition::scalar(column, Predicate::Ge, value)
}

/// `column < ?`
pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Condition {
    Condition::scalar(column, Predicate::Lt, value)
}

/// `column <= ?`
pub fn le(column: impl Into<String>, value: impl Into<Value>) -> Condition {
    Condition::scalar(column, Predicate::Le, value)
}

/// Membership in a set; binds one placeholder per member, in order.
pub fn is_in<V: Into<Value>>(
    column: impl Into<String>,
    values: impl IntoIterator<Item = V>,
) -> Condition {
    Condition {
        column: column.into(),
        predicate: Predicate::In,
        value: None,
        values: values.into_iter().map(Into::into).collect(),
    }
}

///
/// OrderBy
///

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: String,
    pub direction: Direction,
}

///
/// Direction
///

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Asc,
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        };
        write!(f, "{label}")
    }
}

/// `ORDER BY column ASC`
pub fn asc(column: impl Into<String>) -> OrderBy {
    OrderBy {
        column: column.into(),
        direction: Direction::Asc,
    }
}

/// `ORDER BY column DESC`
pub fn desc(column: impl Into<String>) -> OrderBy {
    OrderBy {
        column: column.into(),
        direction: Direction::Desc,
    }
}
