//! Property diff: deep comparison of the non-structural fields of two nodes.
//!
//! Records present on both sides are compared key by key; every other value
//! (scalars, sequences) is atomic and replaced as a whole when it differs.
//! There is no element-wise sequence diffing.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use sylva_types::as_record;

/// The change recorded for one property key.
#[derive(Clone, Debug, PartialEq)]
pub enum PropChange {
    /// The key exists on the left only.
    Removed,
    /// The key was added, or its value replaced, with this value.
    Set(Value),
    /// Both values are records; only their differences are kept.
    Nested(PropsDiff),
}

/// Changed, added and removed property keys, sorted by key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropsDiff(BTreeMap<String, PropChange>);

impl PropsDiff {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&PropChange> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropChange)> {
        self.0.iter().map(|(key, change)| (key.as_str(), change))
    }

    pub fn insert(&mut self, key: impl Into<String>, change: PropChange) {
        self.0.insert(key.into(), change);
    }
}

impl<K: Into<String>> FromIterator<(K, PropChange)> for PropsDiff {
    fn from_iter<I: IntoIterator<Item = (K, PropChange)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, change)| (key.into(), change))
                .collect(),
        )
    }
}

/// Compare two property maps.
///
/// Returns `None` when they are equal. With `nested` off, records are
/// treated like any other value.
pub fn diff_props(
    left: &Map<String, Value>,
    right: &Map<String, Value>,
    nested: bool,
) -> Option<PropsDiff> {
    let mut diff = PropsDiff::new();

    for (key, left_value) in left {
        let Some(right_value) = right.get(key) else {
            diff.insert(key.as_str(), PropChange::Removed);
            continue;
        };

        if left_value == right_value {
            continue;
        }

        match (as_record(left_value), as_record(right_value)) {
            (Some(left_record), Some(right_record)) if nested => {
                if let Some(sub) = diff_props(left_record, right_record, nested) {
                    diff.insert(key.as_str(), PropChange::Nested(sub));
                }
            }
            _ => diff.insert(key.as_str(), PropChange::Set(right_value.clone())),
        }
    }

    for (key, right_value) in right {
        if !left.contains_key(key) {
            diff.insert(key.as_str(), PropChange::Set(right_value.clone()));
        }
    }

    (!diff.is_empty()).then_some(diff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn equal_primitives_no_diff() {
        let left = props(json!({"charlie": "delta", "echo": true, "foxtrot": 1, "golf": null}));
        let right = left.clone();
        assert_eq!(diff_props(&left, &right, true), None);
    }

    #[test]
    fn deep_equal_records_no_diff() {
        let left = props(json!({"data": {"charlie": "delta", "golf": null}}));
        let right = props(json!({"data": {"charlie": "delta", "golf": null}}));
        assert_eq!(diff_props(&left, &right, true), None);
    }

    #[test]
    fn removed_key_is_marked_removed() {
        let left = props(json!({"charlie": "delta"}));
        let right = props(json!({}));
        let diff = diff_props(&left, &right, true).unwrap();
        assert_eq!(diff, PropsDiff::from_iter([("charlie", PropChange::Removed)]));
    }

    #[test]
    fn added_key_is_set() {
        let left = props(json!({}));
        let right = props(json!({"charlie": "delta"}));
        let diff = diff_props(&left, &right, true).unwrap();
        assert_eq!(diff.get("charlie"), Some(&PropChange::Set(json!("delta"))));
        assert_eq!(diff.len(), 1);
    }

    #[test]
    fn changed_primitive_is_set() {
        let left = props(json!({"bravo": true}));
        let right = props(json!({"bravo": false}));
        let diff = diff_props(&left, &right, true).unwrap();
        assert_eq!(diff, PropsDiff::from_iter([("bravo", PropChange::Set(json!(false)))]));
    }

    #[test]
    fn changed_record_recurses() {
        let left = props(json!({"data": {"keep": 1, "change": "a", "drop": true}}));
        let right = props(json!({"data": {"keep": 1, "change": "b", "add": [1]}}));
        let diff = diff_props(&left, &right, true).unwrap();

        let expected = PropsDiff::from_iter([(
            "data",
            PropChange::Nested(PropsDiff::from_iter([
                ("add", PropChange::Set(json!([1]))),
                ("change", PropChange::Set(json!("b"))),
                ("drop", PropChange::Removed),
            ])),
        )]);
        assert_eq!(diff, expected);
    }

    #[test]
    fn nested_off_replaces_whole_record() {
        let left = props(json!({"charlie": {"delta": true, "echo": 1}}));
        let right = props(json!({"charlie": {"delta": false, "echo": 1}}));
        let diff = diff_props(&left, &right, false).unwrap();
        assert_eq!(
            diff.get("charlie"),
            Some(&PropChange::Set(json!({"delta": false, "echo": 1})))
        );
    }

    #[test]
    fn changed_sequence_replaced_whole() {
        let left = props(json!({"charlie": [1, 2]}));
        let right = props(json!({"charlie": [2, 3]}));
        let diff = diff_props(&left, &right, true).unwrap();
        assert_eq!(diff.get("charlie"), Some(&PropChange::Set(json!([2, 3]))));
    }

    #[test]
    fn equal_sequences_no_diff() {
        let left = props(json!({"charlie": [1, 2, 3]}));
        let right = props(json!({"charlie": [1, 2, 3]}));
        assert_eq!(diff_props(&left, &right, true), None);
    }

    #[test]
    fn sequence_and_record_swap_is_set() {
        let left = props(json!({"charlie": [1, 2, 3]}));
        let right = props(json!({"charlie": {"delta": true}}));
        let diff = diff_props(&left, &right, true).unwrap();
        assert_eq!(diff.get("charlie"), Some(&PropChange::Set(json!({"delta": true}))));

        let diff = diff_props(&right, &left, true).unwrap();
        assert_eq!(diff.get("charlie"), Some(&PropChange::Set(json!([1, 2, 3]))));
    }

    #[test]
    fn null_to_record_is_set() {
        let left = props(json!({"golf": null}));
        let right = props(json!({"golf": {"x": 1}}));
        let diff = diff_props(&left, &right, true).unwrap();
        assert_eq!(diff.get("golf"), Some(&PropChange::Set(json!({"x": 1}))));
    }

    #[test]
    fn iter_is_sorted_by_key() {
        let left = props(json!({"b": 1, "a": 1}));
        let right = props(json!({"c": 1}));
        let diff = diff_props(&left, &right, true).unwrap();
        let keys: Vec<&str> = diff.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }
}
