//! Extracts dot-path keys from a nested translation tree.

use std::collections::{
    BTreeMap,
    BTreeSet,
};

use serde_json::Value;

/// Returns the key path of every leaf reachable from `value`.
///
/// Objects are namespaces and are descended into; every other value
/// (including arrays) is a leaf. A non-object root has no key paths.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use i18n_validate::analyzer::extractor::extract_keys;
///
/// let json = json!({
///     "common": {
///         "hello": "Hello",
///         "goodbye": "Goodbye"
///     },
///     "tags": ["a", "b"]
/// });
///
/// let keys = extract_keys(&json, ".");
/// assert!(keys.contains("common.hello"));
/// assert!(keys.contains("tags"));
/// assert_eq!(keys.len(), 3);
/// ```
#[must_use]
pub fn extract_keys(value: &Value, separator: &str) -> BTreeSet<String> {
    leaf_entries(value, separator).into_iter().map(|(key, _)| key).collect()
}

/// Maps every leaf's key path to the leaf value.
///
/// When a literal dotted key and a nested path spell the same key path, the
/// map keeps only one of them; use [`leaf_entries`] to see every leaf.
#[must_use]
pub fn flatten_leaves<'a>(value: &'a Value, separator: &str) -> BTreeMap<String, &'a Value> {
    leaf_entries(value, separator).into_iter().collect()
}

/// Every leaf with its key path, sorted by key path.
///
/// Unlike [`flatten_leaves`] nothing is merged: colliding key paths
/// (`{"a.b": 1, "a": {"b": 2}}`) yield one entry per leaf. Uses an explicit
/// stack, so nesting depth is only bounded by memory.
#[must_use]
pub fn leaf_entries<'a>(value: &'a Value, separator: &str) -> Vec<(String, &'a Value)> {
    let mut leaves = Vec::new();
    let Value::Object(root) = value else {
        return leaves;
    };

    let mut stack: Vec<(String, &Value)> =
        root.iter().map(|(key, child)| (key.clone(), child)).collect();

    while let Some((key_path, value)) = stack.pop() {
        match value {
            Value::Object(map) => {
                stack.extend(
                    map.iter().map(|(key, child)| (format!("{key_path}{separator}{key}"), child)),
                );
            }
            leaf => leaves.push((key_path, leaf)),
        }
    }

    leaves.sort_by(|(a, _), (b, _)| a.cmp(b));
    leaves
}

/// Looks up the value at `key_path`.
///
/// Keys that themselves contain the separator are supported: at each level
/// the longest matching key wins, falling back to shorter ones.
#[must_use]
pub fn resolve_key_path<'a>(value: &'a Value, key_path: &str, separator: &str) -> Option<&'a Value> {
    let segments: Vec<&str> = key_path.split(separator).collect();
    resolve_segments(value, &segments, separator)
}

fn resolve_segments<'a>(value: &'a Value, segments: &[&str], separator: &str) -> Option<&'a Value> {
    if segments.is_empty() {
        return Some(value);
    }
    let Value::Object(map) = value else {
        return None;
    };

    (1..=segments.len()).rev().find_map(|take| {
        let (head, rest) = segments.split_at(take);
        map.get(&head.join(separator))
            .and_then(|child| resolve_segments(child, rest, separator))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn key_set(keys: &[&str]) -> BTreeSet<String> {
        keys.iter().map(ToString::to_string).collect()
    }

    #[rstest]
    fn extract_keys_empty_document() {
        assert!(extract_keys(&json!({}), ".").is_empty());
    }

    #[rstest]
    fn extract_keys_nested() {
        let json = json!({
            "common": {
                "hello": "Hello",
                "goodbye": "Goodbye"
            },
            "errors": {
                "notFound": "Not found"
            }
        });

        assert_eq!(
            extract_keys(&json, "."),
            key_set(&["common.hello", "common.goodbye", "errors.notFound"])
        );
    }

    #[rstest]
    fn extract_keys_custom_separator() {
        let json = json!({"common": {"hello": "Hello"}});

        assert_eq!(extract_keys(&json, "_"), key_set(&["common_hello"]));
    }

    #[rstest]
    fn extract_keys_treats_non_objects_as_leaves() {
        let json = json!({
            "items": ["apple", {"nested": "ignored"}],
            "number": 42,
            "boolean": true,
            "null": null,
            "emptyNamespace": {}
        });

        assert_eq!(extract_keys(&json, "."), key_set(&["items", "number", "boolean", "null"]));
    }

    #[rstest]
    #[case::array(json!(["a"]))]
    #[case::string(json!("a"))]
    #[case::null(json!(null))]
    fn extract_keys_non_object_root(#[case] json: Value) {
        assert!(extract_keys(&json, ".").is_empty());
    }

    #[rstest]
    fn extract_keys_handles_deep_nesting() {
        let mut json = json!("leaf");
        for _ in 0..1_000 {
            json = json!({ "n": json });
        }

        let keys = extract_keys(&json, ".");

        assert_eq!(keys.len(), 1);
        assert!(keys.iter().all(|key| key.split('.').count() == 1_000));
    }

    #[googletest::test]
    fn flatten_leaves_keeps_values() {
        let json = json!({"product": {"title": "Title", "tags": ["x"]}});

        let leaves = flatten_leaves(&json, ".");

        expect_that!(leaves.get("product.title").copied(), some(eq(&json!("Title"))));
        expect_that!(leaves.get("product.tags").copied(), some(eq(&json!(["x"]))));
        expect_that!(leaves.len(), eq(2));
    }

    #[rstest]
    fn leaf_entries_keeps_colliding_key_paths() {
        let json = json!({"a": {"b": "nested"}, "a.b": "dotted", "c": "C"});

        let entries = leaf_entries(&json, ".");

        let mut colliding: Vec<&Value> =
            entries.iter().filter(|(key, _)| key == "a.b").map(|(_, leaf)| *leaf).collect();
        colliding.sort_by(|a, b| a.as_str().cmp(&b.as_str()));
        assert_eq!(colliding, vec![&json!("dotted"), &json!("nested")]);
        assert_that!(entries.len(), eq(3));
        assert_eq!(extract_keys(&json, "."), key_set(&["a.b", "c"]));
    }

    #[rstest]
    fn every_key_resolves_back_to_its_leaf() {
        let json = json!({
            "common": {"save": "Save", "cancel": "Cancel"},
            "product": {"price": {"label": "Price", "currency": "USD"}, "count_one": "{{count}} item"},
            "list": [1, 2],
            "flag": false
        });

        let leaves = flatten_leaves(&json, ".");

        assert_eq!(leaves.len(), 7);
        for (key, leaf) in &leaves {
            assert_eq!(resolve_key_path(&json, key, "."), Some(*leaf), "key {key}");
        }
    }

    #[rstest]
    fn resolve_key_path_with_dotted_keys() {
        let json = json!({
            "hoge.fuga": {"piyo": "Hello"},
            "hoge": {"foo.bar": "World"}
        });

        assert_eq!(resolve_key_path(&json, "hoge.fuga.piyo", "."), Some(&json!("Hello")));
        assert_eq!(resolve_key_path(&json, "hoge.foo.bar", "."), Some(&json!("World")));
        assert_eq!(resolve_key_path(&json, "hoge.missing", "."), None);
    }
}
