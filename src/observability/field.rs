//! Structured key/value fields.

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use serde::Serialize;
use serde_json::{Map, Value};

/// One key/value pair attached to a record or to a logger.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    key: String,
    value: Value,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_parts(self) -> (String, Value) {
        (self.key, self.value)
    }
}

impl<K: Into<String>, V: Into<Value>> From<(K, V)> for Field {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

pub fn string(key: impl Into<String>, value: impl Into<String>) -> Field {
    Field::new(key, value.into())
}

pub fn int(key: impl Into<String>, value: i64) -> Field {
    Field::new(key, value)
}

pub fn uint(key: impl Into<String>, value: u64) -> Field {
    Field::new(key, value)
}

/// Non-finite floats encode as `null`.
pub fn float(key: impl Into<String>, value: f64) -> Field {
    Field::new(key, value)
}

pub fn boolean(key: impl Into<String>, value: bool) -> Field {
    Field::new(key, value)
}

/// An error under the conventional `error` key.
pub fn error(err: &dyn StdError) -> Field {
    named_error("error", err)
}

pub fn named_error(key: impl Into<String>, err: &dyn StdError) -> Field {
    Field::new(key, err.to_string())
}

/// A duration as fractional seconds.
pub fn duration(key: impl Into<String>, value: Duration) -> Field {
    Field::new(key, value.as_secs_f64())
}

pub fn display(key: impl Into<String>, value: impl fmt::Display) -> Field {
    Field::new(key, value.to_string())
}

pub fn debug(key: impl Into<String>, value: impl fmt::Debug) -> Field {
    Field::new(key, format!("{value:?}"))
}

/// Any serializable value, kept structured.
pub fn any(key: impl Into<String>, value: &impl Serialize) -> Field {
    let value = serde_json::to_value(value)
        .unwrap_or_else(|err| Value::String(format!("<unserializable: {err}>")));
    Field::new(key, value)
}

/// Insert `fields` into `map`. A repeated key keeps its position and takes the new value.
pub(crate) fn merge(map: &mut Map<String, Value>, fields: impl IntoIterator<Item = Field>) {
    for field in fields {
        let (key, value) = field.into_parts();
        map.insert(key, value);
    }
}
