//! i18n-validate
//!
//! Validates a set of per-locale JSON translation files against a base locale:
//! missing and stale keys, leftover placeholder text, empty values,
//! interpolation mismatches and untranslated copies.

pub mod analyzer;
pub mod config;
pub mod input;
pub mod report;
pub mod types;
pub mod validator;

#[cfg(test)]
mod test_utils;

pub use report::{
    OutputFormat,
    Verdict,
};
pub use validator::{
    LocaleOutcome,
    ValidateError,
    ValidationRun,
    Validator,
    validate_project,
};
