use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Type identifier for JSON values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl JsonType {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => JsonType::Null,
            Value::Bool(_) => JsonType::Boolean,
            Value::Number(_) => JsonType::Number,
            Value::String(_) => JsonType::String,
            Value::Array(_) => JsonType::Array,
            Value::Object(_) => JsonType::Object,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JsonType::Null => "null",
            JsonType::Boolean => "boolean",
            JsonType::Number => "number",
            JsonType::String => "string",
            JsonType::Array => "array",
            JsonType::Object => "object",
        }
    }

    /// True for leaf values: everything except arrays and objects
    pub fn is_scalar(self) -> bool {
        !matches!(self, JsonType::Array | JsonType::Object)
    }
}

/// Errors raised by extraction calls.
///
/// Only the root of an extraction is checked strictly; failures while
/// resolving individual elements are treated as "not present" and skip
/// that branch instead of surfacing here.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("extraction root must be an object or array, found {found}")]
    TypeMismatch { found: &'static str },
}

impl ExtractError {
    pub(crate) fn type_mismatch(value: &Value) -> Self {
        ExtractError::TypeMismatch {
            found: JsonType::from_value(value).as_str(),
        }
    }
}

/// One flat output row - a mapping from column name to scalar value
///
/// Columns iterate in the order they were declared by the spec that
/// produced the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// The column data for this record
    pub columns: Map<String, Value>,
}

impl Record {
    pub fn new(columns: Map<String, Value>) -> Self {
        Record { columns }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// A hashable wrapper around a JSON value, used for building sets of
/// extracted scalars.
///
/// `serde_json::Value` is not `Eq + Hash`, so deduplication goes through
/// this wrapper. Equality is JSON value equality.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueKey(Value);

impl ValueKey {
    pub fn new(value: Value) -> Self {
        ValueKey(value)
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for ValueKey {
    fn from(value: Value) -> Self {
        ValueKey(value)
    }
}

// serde_json numbers cannot hold NaN, so value equality is reflexive.
impl Eq for ValueKey {}

impl Hash for ValueKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_value(&self.0, state);
    }
}

fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    match value {
        Value::Null => state.write_u8(0),
        Value::Bool(b) => {
            state.write_u8(1);
            b.hash(state);
        }
        Value::Number(n) => {
            state.write_u8(2);
            n.hash(state);
        }
        Value::String(s) => {
            state.write_u8(3);
            s.hash(state);
        }
        Value::Array(items) => {
            state.write_u8(4);
            state.write_usize(items.len());
            for item in items {
                hash_value(item, state);
            }
        }
        Value::Object(map) => {
            // Map equality ignores entry order, so only the arity is hashed.
            state.write_u8(5);
            state.write_usize(map.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_json_type_names() {
        assert_eq!(JsonType::from_value(&json!(null)).as_str(), "null");
        assert_eq!(JsonType::from_value(&json!(3)).as_str(), "number");
        assert_eq!(JsonType::from_value(&json!([1])).as_str(), "array");
        assert_eq!(JsonType::from_value(&json!({})).as_str(), "object");
    }

    #[test]
    fn test_scalar_classification() {
        assert!(JsonType::from_value(&json!("x")).is_scalar());
        assert!(JsonType::from_value(&json!(null)).is_scalar());
        assert!(!JsonType::from_value(&json!({"a": 1})).is_scalar());
        assert!(!JsonType::from_value(&json!([])).is_scalar());
    }

    #[test]
    fn test_value_key_equality() {
        let mut set = HashSet::new();
        set.insert(ValueKey::new(json!("Akron")));
        set.insert(ValueKey::new(json!("Akron")));
        set.insert(ValueKey::new(json!("Lima")));
        set.insert(ValueKey::new(json!(42)));
        set.insert(ValueKey::new(json!(42)));

        assert_eq!(set.len(), 3);
        assert!(set.contains(&ValueKey::new(json!("Akron"))));
    }

    #[test]
    fn test_record_columns_keep_declaration_order() {
        let mut columns = Map::new();
        columns.insert("firstname".to_string(), json!("Jane"));
        columns.insert("city".to_string(), json!("Akron"));

        let record = Record::new(columns);
        let names: Vec<&str> = record.columns.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["firstname", "city"]);
    }
}
