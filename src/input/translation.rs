//! Translation document definitions

use std::collections::{
    BTreeSet,
    HashMap,
};
use std::path::{
    Path,
    PathBuf,
};

use serde::Deserialize;
use serde_json::Value;

use crate::analyzer::extractor::extract_keys;
use crate::input::error::LoadError;
use crate::types::SourceRange;

/// A parsed translation file for one locale.
///
/// The root is always a JSON object. Nested objects are namespaces, every
/// other value (strings, arrays, numbers, booleans, null) is a leaf.
#[derive(Debug, Clone)]
pub struct TranslationDocument {
    locale: String,
    file_path: Option<PathBuf>,
    root: Value,
    /// Key path to source range of the key, for report locations.
    key_ranges: HashMap<String, SourceRange>,
}

impl TranslationDocument {
    /// Parses JSON text into a document.
    ///
    /// # Errors
    /// `MalformedDocument` when the text is not valid JSON or its root is not
    /// an object. No partial document is returned.
    pub fn parse(
        locale: &str,
        text: &str,
        file_path: Option<&Path>,
        separator: &str,
    ) -> Result<Self, LoadError> {
        let root = parse_json(text).map_err(|e| LoadError::MalformedDocument {
            locale: locale.to_string(),
            reason: format!("Failed to parse JSON: {e}"),
        })?;

        let mut document = Self::from_value(locale, root)?;
        document.file_path = file_path.map(Path::to_path_buf);
        document.key_ranges = extract_key_ranges(text, separator);
        Ok(document)
    }

    /// Wraps an already parsed value. Documents built this way carry no source ranges.
    ///
    /// # Errors
    /// `MalformedDocument` when the value is not an object.
    pub fn from_value(locale: &str, root: Value) -> Result<Self, LoadError> {
        if !root.is_object() {
            return Err(LoadError::MalformedDocument {
                locale: locale.to_string(),
                reason: format!("expected a JSON object at the document root, found {}", kind_of(&root)),
            });
        }

        Ok(Self { locale: locale.to_string(), file_path: None, root, key_ranges: HashMap::new() })
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    #[must_use]
    pub const fn root(&self) -> &Value {
        &self.root
    }

    /// The set of key paths of every leaf in the document.
    #[must_use]
    pub fn keys(&self, separator: &str) -> BTreeSet<String> {
        extract_keys(&self.root, separator)
    }

    /// Source range of the key at `key_path`, when the document was parsed from text.
    #[must_use]
    pub fn key_range(&self, key_path: &str) -> Option<SourceRange> {
        self.key_ranges.get(key_path).copied()
    }
}

/// Parses JSON without serde_json's nesting limit.
///
/// Deep documents grow the stack on the heap instead of overflowing it.
fn parse_json(text: &str) -> serde_json::Result<Value> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let root = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(root)
}

/// Human readable name of a JSON value's type.
const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Extract key source ranges from JSON text using tree-sitter.
///
/// Arrays are leaves, so their elements get no entry of their own.
#[must_use]
pub fn extract_key_ranges(json_text: &str, separator: &str) -> HashMap<String, SourceRange> {
    let mut key_ranges = HashMap::new();

    let mut parser = tree_sitter::Parser::new();
    let Ok(()) = parser.set_language(&tree_sitter_json::LANGUAGE.into()) else {
        tracing::warn!("Failed to set tree-sitter-json language");
        return key_ranges;
    };

    let Some(tree) = parser.parse(json_text, None) else {
        tracing::warn!("Failed to parse JSON with tree-sitter");
        return key_ranges;
    };

    let source = json_text.as_bytes();
    let mut cursor = tree.walk();
    // (node, key path prefix) pairs still to visit.
    let mut stack: Vec<(tree_sitter::Node<'_>, Option<String>)> = vec![(tree.root_node(), None)];

    while let Some((node, prefix)) = stack.pop() {
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "object" => stack.push((child, prefix.clone())),
                "pair" => {
                    let nested =
                        extract_pair(child, source, separator, prefix.as_deref(), &mut key_ranges);
                    if let Some((full_key, object)) = nested {
                        stack.push((object, Some(full_key)));
                    }
                }
                _ => {}
            }
        }
    }

    key_ranges
}

/// Records the range of a `pair`'s key.
///
/// Returns the full key path and the value node when the value is an object
/// to descend into.
fn extract_pair<'tree>(
    node: tree_sitter::Node<'tree>,
    source: &[u8],
    separator: &str,
    prefix: Option<&str>,
    key_ranges: &mut HashMap<String, SourceRange>,
) -> Option<(String, tree_sitter::Node<'tree>)> {
    let key_node = node.child_by_field_name("key")?;
    let value_node = node.child_by_field_name("value")?;

    let Ok(key_text) = key_node.utf8_text(source) else {
        tracing::warn!("Failed to get key text from node");
        return None;
    };
    // Decode escapes so the key matches what serde_json produced.
    let key = serde_json::from_str::<String>(key_text)
        .unwrap_or_else(|_| key_text.trim_matches('"').to_string());

    let full_key = prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));

    key_ranges.insert(full_key.clone(), SourceRange::from_node(&key_node));

    (value_node.kind() == "object").then_some((full_key, value_node))
}
