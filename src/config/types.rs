use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "placeholders.patterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// How a supplementary check affects the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reported and fails the run.
    Error,
    /// Reported only.
    Warning,
    /// Not checked.
    Off,
}

impl Severity {
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::Off)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidatorSettings {
    /// Directory holding one `<locale>.json` per locale.
    /// Relative paths are resolved against the project root.
    pub locales_dir: PathBuf,

    pub base_locale: String,

    /// Expected target locales.
    ///
    /// - `None`: every translation file found in `locales_dir` (default)
    /// - `Some([...])`: exactly these; a listed locale without a file fails
    pub locales: Option<Vec<String>>,

    pub translation_files: TranslationFilesConfig,

    pub key_separator: String,

    pub placeholders: PlaceholderConfig,
    pub rules: RulesConfig,
    pub concurrency: ConcurrencyConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationFilesConfig {
    /// Glob matched against file names inside `locales_dir`.
    pub file_pattern: String,
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaceholderConfig {
    /// Case-insensitive regular expressions for leftover placeholder text.
    pub patterns: Vec<String>,

    /// Interpolation variables whose `{{name}}` token is ignored by the scan.
    pub allowed_interpolations: Vec<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RulesConfig {
    pub empty_value: Severity,
    pub interpolation_mismatch: Severity,
    pub untranslated: Severity,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ConcurrencyConfig {
    /// Worker threads for per-locale validation.
    /// Default: 80% of CPU cores (minimum 1).
    pub num_threads: Option<usize>,
}

impl ConcurrencyConfig {
    /// Resolves the configured thread count, falling back to 80% of the cores.
    #[must_use]
    pub fn effective_threads(self) -> usize {
        self.num_threads.unwrap_or_else(|| (num_cpus::get() * 4 / 5).max(1))
    }
}

impl ValidatorSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Invalid placeholder regex
    /// - Zero worker threads
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.base_locale.trim().is_empty() {
            errors.push(ValidationError::new(
                "baseLocale",
                "The base locale cannot be empty. Example: \"en-US\"",
            ));
        }

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if let Some(locales) = &self.locales {
            for (index, locale) in locales.iter().enumerate() {
                if locale.trim().is_empty() {
                    errors.push(ValidationError::new(
                        format!("locales[{index}]"),
                        "A locale identifier cannot be empty",
                    ));
                }
            }
        }

        if self.translation_files.file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                "The pattern cannot be empty. Example: \"*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.translation_files.file_pattern) {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                format!("Invalid glob pattern '{}': {e}", self.translation_files.file_pattern),
            ));
        }

        for (index, pattern) in self.translation_files.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("translationFiles.excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, pattern) in self.placeholders.patterns.iter().enumerate() {
            if pattern.is_empty() {
                errors.push(ValidationError::new(
                    format!("placeholders.patterns[{index}]"),
                    "The pattern cannot be empty, it would match every value",
                ));
            } else if let Err(e) = regex::Regex::new(pattern) {
                errors.push(ValidationError::new(
                    format!("placeholders.patterns[{index}]"),
                    format!("Invalid regular expression '{pattern}': {e}"),
                ));
            }
        }

        if self.concurrency.num_threads == Some(0) {
            errors.push(ValidationError::new(
                "concurrency.numThreads",
                "At least one thread is required, or remove this field to use the default",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for ValidatorSettings {
    fn default() -> Self {
        Self {
            locales_dir: PathBuf::from("src/locales"),
            base_locale: "en-US".to_string(),
            locales: None,
            translation_files: TranslationFilesConfig::default(),
            key_separator: ".".to_string(),
            placeholders: PlaceholderConfig::default(),
            rules: RulesConfig::default(),
            concurrency: ConcurrencyConfig::default(),
        }
    }
}

impl Default for TranslationFilesConfig {
    fn default() -> Self {
        Self { file_pattern: "*.json".to_string(), exclude_patterns: Vec::new() }
    }
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            patterns: vec![
                "TODO".to_string(),
                "FIXME".to_string(),
                "TRANSLATE".to_string(),
                r"\[translation needed\]".to_string(),
            ],
            allowed_interpolations: vec!["year".to_string()],
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            empty_value: Severity::Error,
            interpolation_mismatch: Severity::Error,
            untranslated: Severity::Warning,
        }
    }
}
