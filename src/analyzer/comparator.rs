//! Compares a target locale's document against the base locale.

use std::collections::{
    BTreeMap,
    BTreeSet,
};

use serde_json::Value;

use crate::analyzer::extractor::{
    flatten_leaves,
    leaf_entries,
};
use crate::analyzer::placeholder::PlaceholderScanner;
use crate::analyzer::types::{
    Completeness,
    InterpolationMismatch,
    PlaceholderHit,
    ValidationResult,
};
use crate::config::RulesConfig;
use crate::input::TranslationDocument;

/// Keys present in `base` but absent in `target`.
#[must_use]
pub fn missing_keys(base: &BTreeSet<String>, target: &BTreeSet<String>) -> BTreeSet<String> {
    base.difference(target).cloned().collect()
}

/// Keys present in `target` but absent in `base`.
#[must_use]
pub fn extra_keys(base: &BTreeSet<String>, target: &BTreeSet<String>) -> BTreeSet<String> {
    target.difference(base).cloned().collect()
}

/// Every string inside a leaf; arrays contribute their (nested) string elements.
fn leaf_strings(value: &Value) -> Vec<&str> {
    match value {
        Value::String(s) => vec![s.as_str()],
        Value::Array(items) => items.iter().flat_map(leaf_strings).collect(),
        Value::Object(map) => map.values().flat_map(leaf_strings).collect(),
        _ => Vec::new(),
    }
}

/// Compares target documents against one base document.
///
/// The base is flattened once; [`Comparator::compare`] only borrows, so a
/// single comparator can be shared by worker threads.
#[derive(Debug)]
pub struct Comparator<'a> {
    base_leaves: BTreeMap<String, &'a Value>,
    base_keys: BTreeSet<String>,
    separator: &'a str,
    rules: RulesConfig,
    scanner: &'a PlaceholderScanner,
}

impl<'a> Comparator<'a> {
    #[must_use]
    pub fn new(
        base: &'a TranslationDocument,
        separator: &'a str,
        rules: RulesConfig,
        scanner: &'a PlaceholderScanner,
    ) -> Self {
        let base_leaves = flatten_leaves(base.root(), separator);
        let base_keys = base_leaves.keys().cloned().collect();
        Self { base_leaves, base_keys, separator, rules, scanner }
    }

    #[must_use]
    pub const fn base_keys(&self) -> &BTreeSet<String> {
        &self.base_keys
    }

    /// Diffs `target` against the base and scans its values.
    #[must_use]
    pub fn compare(&self, target: &TranslationDocument) -> ValidationResult {
        // Every leaf, including ones whose key path collides with another.
        let target_leaves = leaf_entries(target.root(), self.separator);
        let target_keys: BTreeSet<String> =
            target_leaves.iter().map(|(key, _)| key.clone()).collect();

        let missing = missing_keys(&self.base_keys, &target_keys);
        let extra = extra_keys(&self.base_keys, &target_keys);
        let completeness =
            Completeness::compute(self.base_keys.len(), target_keys.len(), extra.len());

        let placeholders = self.find_placeholders(target, &target_leaves);

        let empty_values = if self.rules.empty_value.is_enabled() {
            find_empty_values(&target_leaves)
        } else {
            BTreeSet::new()
        };

        let interpolation_mismatches = if self.rules.interpolation_mismatch.is_enabled() {
            self.find_interpolation_mismatches(&target_leaves)
        } else {
            Vec::new()
        };

        let untranslated =
            self.rules.untranslated.is_enabled() && self.is_untranslated(&target_leaves);

        tracing::debug!(
            locale = target.locale(),
            missing = missing.len(),
            extra = extra.len(),
            placeholders = placeholders.len(),
            "Compared locale"
        );

        ValidationResult {
            locale: target.locale().to_string(),
            file_path: target.file_path().map(std::path::Path::to_path_buf),
            total_keys: target_keys.len(),
            missing,
            extra,
            placeholders,
            empty_values,
            interpolation_mismatches,
            untranslated,
            completeness,
        }
    }

    fn find_placeholders(
        &self,
        target: &TranslationDocument,
        target_leaves: &[(String, &Value)],
    ) -> Vec<PlaceholderHit> {
        target_leaves
            .iter()
            .filter_map(|(key, leaf)| {
                leaf_strings(leaf).into_iter().find_map(|value| {
                    self.scanner.scan(value).map(|pattern| PlaceholderHit {
                        key: key.clone(),
                        value: value.to_string(),
                        pattern: pattern.to_string(),
                        location: target.key_range(key).map(|range| range.start),
                    })
                })
            })
            .collect()
    }

    fn find_interpolation_mismatches(
        &self,
        target_leaves: &[(String, &Value)],
    ) -> Vec<InterpolationMismatch> {
        let tokens = self.scanner.tokens();
        target_leaves
            .iter()
            .filter_map(|(key, leaf)| {
                let (Some(Value::String(base)), Value::String(target)) =
                    (self.base_leaves.get(key).copied(), leaf)
                else {
                    return None;
                };
                let expected = tokens.variables(base);
                let found = tokens.variables(target);
                (expected != found).then(|| InterpolationMismatch { key: key.clone(), expected, found })
            })
            .collect()
    }

    /// True when the target shares at least one string with the base and all of them are identical.
    fn is_untranslated(&self, target_leaves: &[(String, &Value)]) -> bool {
        let mut shared = target_leaves.iter().filter_map(|(key, leaf)| {
            match (self.base_leaves.get(key).copied(), leaf) {
                (Some(Value::String(base)), Value::String(target)) => Some(base == target),
                _ => None,
            }
        });

        // `all` on an empty iterator is true, so require a first element.
        shared.next().is_some_and(|identical| identical && shared.all(|identical| identical))
    }
}

fn find_empty_values(target_leaves: &[(String, &Value)]) -> BTreeSet<String> {
    target_leaves
        .iter()
        .filter(|(_, leaf)| is_empty_leaf(leaf))
        .map(|(key, _)| key.clone())
        .collect()
}

/// `""` and `null` are empty; an array is empty when any element is.
fn is_empty_leaf(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.iter().any(is_empty_leaf),
        Value::Object(map) => map.values().any(is_empty_leaf),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
