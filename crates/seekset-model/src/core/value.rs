use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar value carried by a cursor element and bound as a query parameter.
///
/// The serde representation is untagged: on the wire a value is the plain
/// JSON scalar. Variant order matters for decoding — `Timestamp` is tried
/// before `String`, so RFC 3339 strings come back as timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
    String(String),
    Null,
}

impl Value {
    /// Re-types a string value as a timestamp when it parses as RFC 3339.
    ///
    /// Applied to every value before it is bound as a filter parameter, so
    /// timestamp boundaries compare as points in time rather than as text.
    /// On parse failure the original value is returned unchanged; non-string
    /// values pass through untouched.
    pub fn normalized(self) -> Value {
        match self {
            Value::String(raw) => match DateTime::parse_from_rfc3339(&raw) {
                Ok(ts) => Value::Timestamp(ts.with_timezone(&Utc)),
                Err(_) => Value::String(raw),
            },
            other => other,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Timestamp(v) => {
                write!(f, "{}", v.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Value::String(v) => write!(f, "{v}"),
            Value::Null => write!(f, "NULL"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}
