//! Typed field values and their SQL literal encoding.
//!
//! `quote` is the only escaping the mapping layer performs: it doubles
//! embedded single quotes so generated statements stay well-formed. It is
//! not a defense against hostile input.

use std::fmt;

use chrono::NaiveDateTime;

use crate::column::ColumnType;

/// Format applied to dates before they are quoted.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A single field value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SqlValue {
    #[default]
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Date(NaiveDateTime),
}

impl SqlValue {
    /// Whether the value is absent. Nullish fields are skipped by every
    /// generated statement.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
            Self::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
        }
    }
}

impl From<i64> for SqlValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for SqlValue {
    fn from(n: i32) -> Self {
        Self::Integer(n.into())
    }
}

impl From<f64> for SqlValue {
    fn from(x: f64) -> Self {
        Self::Real(x)
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(d: NaiveDateTime) -> Self {
        Self::Date(d)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Render a value as a single-quoted SQL literal.
///
/// Every value, numbers included, becomes a quoted string; SQLite's column
/// affinity converts it back on storage and comparison.
pub fn quote(value: &SqlValue) -> String {
    let raw = value.to_string();
    format!("'{}'", raw.replace('\'', "''"))
}

/// Infer a column's storage type from a representative value.
pub fn infer_type(value: &SqlValue) -> ColumnType {
    match value {
        SqlValue::Integer(_) | SqlValue::Real(_) => ColumnType::Integer,
        SqlValue::Null => ColumnType::Null,
        SqlValue::Text(_) | SqlValue::Date(_) => ColumnType::Text,
    }
}
