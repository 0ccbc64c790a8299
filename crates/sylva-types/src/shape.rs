//! Shape predicates for property values.
//!
//! Property values are plain JSON data. Only [`Shape::Record`] values are
//! eligible for recursive comparison; sequences and scalars are atomic.

use std::fmt;

use serde_json::{Map, Value};

/// The coarse shape of a property value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// `null`, booleans, numbers and strings.
    Scalar,
    /// An ordered sequence (JSON array).
    Sequence,
    /// A plain key/value record (JSON object).
    Record,
}

impl Shape {
    /// Classify a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Array(_) => Shape::Sequence,
            Value::Object(_) => Shape::Record,
            _ => Shape::Scalar,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Scalar => "scalar",
            Shape::Sequence => "sequence",
            Shape::Record => "record",
        };
        f.write_str(name)
    }
}

/// Returns `true` if the value is an ordered sequence.
pub fn is_sequence(value: &Value) -> bool {
    Shape::of(value) == Shape::Sequence
}

/// Returns `true` if the value is a plain record. `null` is not a record.
pub fn is_record(value: &Value) -> bool {
    Shape::of(value) == Shape::Record
}

/// Borrow the value as a record, if it is one.
pub fn as_record(value: &Value) -> Option<&Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_values() {
        assert_eq!(Shape::of(&json!(null)), Shape::Scalar);
        assert_eq!(Shape::of(&json!("x")), Shape::Scalar);
        assert_eq!(Shape::of(&json!(1.5)), Shape::Scalar);
        assert_eq!(Shape::of(&json!([1, 2])), Shape::Sequence);
        assert_eq!(Shape::of(&json!({"a": 1})), Shape::Record);
    }

    #[test]
    fn null_is_not_a_record() {
        assert!(!is_record(&json!(null)));
        assert!(as_record(&json!(null)).is_none());
    }

    #[test]
    fn arrays_are_sequences_not_records() {
        let value = json!([{"a": 1}]);
        assert!(is_sequence(&value));
        assert!(!is_record(&value));
    }

    #[test]
    fn as_record_borrows_map() {
        let value = json!({"delta": true});
        let map = as_record(&value).unwrap();
        assert_eq!(map.get("delta"), Some(&json!(true)));
    }
}
