//! Synthetic keys used to align two sibling lists.
//!
//! A key is the node type plus a canonical encoding of its properties. The
//! text value and the children take no part, so two text siblings of one
//! type with equal properties get the same base key and fall back to
//! positional alignment through the occurrence counter.

use std::collections::HashMap;

use serde_json::Value;
use sylva_types::{Node, NodeRef};

/// The base key of a node: `type:{canonical props}`.
pub fn base_key(node: &Node) -> String {
    let mut key = String::with_capacity(node.kind.len() + 2);
    key.push_str(&node.kind);
    key.push(':');
    write_record(node.props.iter(), &mut key);
    key
}

fn write_record<'a>(entries: impl Iterator<Item = (&'a String, &'a Value)>, out: &mut String) {
    let mut entries: Vec<_> = entries.collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

    out.push('{');
    for (i, (name, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&Value::from(name.as_str()).to_string());
        out.push(':');
        write_value(value, out);
    }
    out.push('}');
}

fn write_value(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => write_record(map.iter(), out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// Keys of one sibling list, in both directions.
///
/// Repeated base keys are disambiguated in traversal order: the first
/// occurrence keeps the bare key, later ones get `:1`, `:2`, ... Base keys
/// always end in `}`, so a suffixed key never equals a base key. Gaps
/// (absent children) get no key.
#[derive(Debug, Default)]
pub struct KeyIndex {
    positions: HashMap<String, usize>,
    keys: Vec<Option<String>>,
}

impl KeyIndex {
    pub fn build<'a>(children: impl IntoIterator<Item = Option<&'a NodeRef>>) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut index = KeyIndex::default();

        for (position, child) in children.into_iter().enumerate() {
            let Some(child) = child else {
                index.keys.push(None);
                continue;
            };

            let base = base_key(child);
            let key = match counts.get_mut(&base) {
                Some(count) => {
                    let key = format!("{base}:{count}");
                    *count += 1;
                    key
                }
                None => {
                    counts.insert(base.clone(), 1);
                    base
                }
            };

            index.positions.insert(key.clone(), position);
            index.keys.push(Some(key));
        }

        index
    }

    /// The key at `position`; `None` for a gap or past the end.
    pub fn key_at(&self, position: usize) -> Option<&str> {
        self.keys.get(position).and_then(|key| key.as_deref())
    }

    pub fn position_of(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Number of positions indexed, gaps included.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn base_key_ignores_value_and_children() {
        let a = Node::text("word", "alpha");
        let b = Node::text("word", "bravo");
        assert_eq!(base_key(&a), base_key(&b));
        assert_eq!(base_key(&a), "word:{}");

        let parent = Node::parent("word", [a.into_ref()]);
        assert_eq!(base_key(&parent), "word:{}");
    }

    #[test]
    fn base_key_includes_props() {
        let a = Node::void("a").with_prop("id", "bravo");
        let b = Node::void("a").with_prop("id", "charlie");
        assert_ne!(base_key(&a), base_key(&b));
        assert_eq!(base_key(&a), r#"a:{"id":"bravo"}"#);
    }

    #[test]
    fn base_key_is_order_stable() {
        let a = Node::void("a")
            .with_prop("x", json!({"q": 1, "p": [true, null]}))
            .with_prop("b", 2);
        let b = Node::void("a")
            .with_prop("b", 2)
            .with_prop("x", json!({"p": [true, null], "q": 1}));
        assert_eq!(base_key(&a), base_key(&b));
        assert_eq!(base_key(&a), r#"a:{"b":2,"x":{"p":[true,null],"q":1}}"#);
    }

    #[test]
    fn repeated_keys_get_counters() {
        let children = vec![
            Node::text("word", "a").into_ref(),
            Node::void("break").into_ref(),
            Node::text("word", "b").into_ref(),
            Node::text("word", "c").into_ref(),
        ];
        let index = KeyIndex::build(children.iter().map(Some));

        assert_eq!(index.key_at(0), Some("word:{}"));
        assert_eq!(index.key_at(1), Some("break:{}"));
        assert_eq!(index.key_at(2), Some("word:{}:1"));
        assert_eq!(index.key_at(3), Some("word:{}:2"));
        assert_eq!(index.position_of("word:{}:2"), Some(3));
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn gaps_get_no_key() {
        let a = Node::void("a").into_ref();
        let children = vec![None, Some(a.clone()), None];
        let index = KeyIndex::build(children.iter().map(Option::as_ref));

        assert_eq!(index.key_at(0), None);
        assert_eq!(index.key_at(1), Some("a:{}"));
        assert_eq!(index.key_at(2), None);
        assert_eq!(index.key_at(3), None);
        assert!(index.contains("a:{}"));
        assert_eq!(index.len(), 3);
    }
}
