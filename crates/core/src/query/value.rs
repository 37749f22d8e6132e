use std::collections::BTreeMap;

use serde::Serialize;

/// A value bound to a statement parameter.
///
/// Values never become part of the SQL text; backends bind them through the
/// driver's positional markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

/// Column name to value, as produced by an entity's create or patch input.
///
/// Keys are always column names taken from a [`TableDescriptor`](super::TableDescriptor),
/// never caller-supplied text.
pub type FieldMap = BTreeMap<&'static str, SqlValue>;

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Real(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlValue::Null, Into::into)
    }
}
