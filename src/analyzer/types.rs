//! Types for the analyzer module

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use serde::{
    Serialize,
    Serializer,
};

use crate::config::{
    RulesConfig,
    Severity,
};
use crate::types::SourcePosition;

/// Share of base keys present in a target locale, in hundredths of a percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Completeness {
    basis_points: u64,
}

/// Basis points in 100%.
const FULL: u64 = 10_000;

impl Completeness {
    /// `(target_keys - extra_keys) / base_keys * 100`, rounded half-up to two decimals.
    ///
    /// Returns `None` when the base has no keys (not applicable).
    #[must_use]
    pub fn compute(base_keys: usize, target_keys: usize, extra_keys: usize) -> Option<Self> {
        let base = u64::try_from(base_keys).ok().filter(|&base| base > 0)?;
        let present = u64::try_from(target_keys.saturating_sub(extra_keys)).ok()?;

        let doubled = present.checked_mul(FULL * 2)?.checked_add(base)?;
        Some(Self { basis_points: doubled / (base * 2) })
    }

    #[must_use]
    pub const fn from_basis_points(basis_points: u64) -> Self {
        Self { basis_points }
    }

    #[must_use]
    pub const fn basis_points(self) -> u64 {
        self.basis_points
    }

    #[must_use]
    pub const fn is_full(self) -> bool {
        self.basis_points >= FULL
    }
}

/// Formats as `50.00%`.
impl fmt::Display for Completeness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.basis_points / 100, self.basis_points % 100)
    }
}

impl Serialize for Completeness {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!("{}.{:02}", self.basis_points / 100, self.basis_points % 100))
    }
}

/// A leaf value still containing placeholder text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderHit {
    pub key: String,
    pub value: String,
    /// The configured pattern that matched.
    pub pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourcePosition>,
}

/// A key whose interpolation variables differ from the base locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpolationMismatch {
    pub key: String,
    pub expected: BTreeSet<String>,
    pub found: BTreeSet<String>,
}

/// Result of comparing one target locale against the base locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub locale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
    pub total_keys: usize,
    /// Keys present in the base but absent here.
    pub missing: BTreeSet<String>,
    /// Keys present here but absent in the base (stale, tolerated).
    pub extra: BTreeSet<String>,
    pub placeholders: Vec<PlaceholderHit>,
    /// Keys whose value is `""` or `null`.
    pub empty_values: BTreeSet<String>,
    pub interpolation_mismatches: Vec<InterpolationMismatch>,
    /// Every string shared with the base is identical to it.
    pub untranslated: bool,
    /// `None` when the base locale has no keys.
    pub completeness: Option<Completeness>,
}

impl ValidationResult {
    /// Errors fail the run: missing keys, placeholder hits, and any
    /// supplementary issue whose rule is `error`.
    #[must_use]
    pub fn has_errors(&self, rules: &RulesConfig) -> bool {
        !self.missing.is_empty()
            || !self.placeholders.is_empty()
            || self.issues_at(rules, Severity::Error)
    }

    /// Warnings are reported only: extra keys and supplementary issues whose rule is `warning`.
    #[must_use]
    pub fn has_warnings(&self, rules: &RulesConfig) -> bool {
        !self.extra.is_empty() || self.issues_at(rules, Severity::Warning)
    }

    fn issues_at(&self, rules: &RulesConfig, severity: Severity) -> bool {
        (rules.empty_value == severity && !self.empty_values.is_empty())
            || (rules.interpolation_mismatch == severity
                && !self.interpolation_mismatches.is_empty())
            || (rules.untranslated == severity && self.untranslated)
    }
}
