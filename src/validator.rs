//! Runs a validation: base locale first, then every target locale.

use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use crate::analyzer::{
    Comparator,
    PlaceholderScanner,
    ValidationResult,
};
use crate::config::{
    ConfigError,
    ConfigManager,
    FileMatcher,
    MatcherError,
    RulesConfig,
    SettingsOverrides,
    ValidatorSettings,
};
use crate::input::{
    DirectorySource,
    DocumentSource,
    LoadError,
};
use crate::report::Verdict;

/// Errors that stop a run before any locale is compared.
#[derive(Error, Debug)]
pub enum ValidateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Matcher(#[from] MatcherError),

    #[error("Invalid placeholder pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to load base locale: {0}")]
    BaseLocale(#[source] LoadError),

    #[error(transparent)]
    Discovery(LoadError),
}

/// What happened to one target locale.
#[derive(Debug)]
pub enum LocaleOutcome {
    Validated(ValidationResult),
    Failed(LoadError),
}

impl LocaleOutcome {
    #[must_use]
    pub fn locale(&self) -> &str {
        match self {
            Self::Validated(result) => &result.locale,
            Self::Failed(
                LoadError::DocumentNotFound { locale, .. }
                | LoadError::MalformedDocument { locale, .. }
                | LoadError::Io { locale, .. },
            ) => locale,
            Self::Failed(LoadError::Discovery { .. }) => "",
        }
    }

    #[must_use]
    pub fn has_errors(&self, rules: &RulesConfig) -> bool {
        match self {
            Self::Validated(result) => result.has_errors(rules),
            Self::Failed(_) => true,
        }
    }
}

/// Everything a run found, in target order.
#[derive(Debug)]
pub struct ValidationRun {
    pub base_locale: String,
    pub base_file: Option<PathBuf>,
    pub base_key_count: usize,
    pub outcomes: Vec<LocaleOutcome>,
    pub rules: RulesConfig,
}

impl ValidationRun {
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        if self.outcomes.iter().any(|outcome| outcome.has_errors(&self.rules)) {
            Verdict::Fail
        } else {
            Verdict::Pass
        }
    }

    /// Number of target locales with errors.
    #[must_use]
    pub fn failed_locales(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.has_errors(&self.rules)).count()
    }
}

/// Validates documents from a [`DocumentSource`] with fixed settings.
#[derive(Debug)]
pub struct Validator {
    settings: ValidatorSettings,
    scanner: PlaceholderScanner,
}

impl Validator {
    /// # Errors
    /// `Pattern` when a placeholder pattern does not compile.
    pub fn new(settings: ValidatorSettings) -> Result<Self, ValidateError> {
        let scanner = PlaceholderScanner::new(&settings.placeholders)?;
        Ok(Self { settings, scanner })
    }

    /// Target locales: the configured list, or every locale the source has,
    /// without the base and without duplicates.
    fn target_locales(&self, source: &dyn DocumentSource) -> Result<Vec<String>, ValidateError> {
        let candidates = match &self.settings.locales {
            Some(locales) => locales.clone(),
            None => source.locales().map_err(ValidateError::Discovery)?,
        };

        let mut targets: Vec<String> = Vec::with_capacity(candidates.len());
        for locale in candidates {
            if locale != self.settings.base_locale && !targets.contains(&locale) {
                targets.push(locale);
            }
        }
        Ok(targets)
    }

    /// Loads the base locale, then loads and compares every target locale.
    ///
    /// Target failures are recorded per locale; only a base locale or
    /// discovery failure aborts the run.
    ///
    /// # Errors
    /// `BaseLocale` or `Discovery`.
    pub fn validate(&self, source: &dyn DocumentSource) -> Result<ValidationRun, ValidateError> {
        let base_locale = &self.settings.base_locale;
        let base = source.load(base_locale).map_err(ValidateError::BaseLocale)?;
        let targets = self.target_locales(source)?;

        let comparator = Comparator::new(
            &base,
            &self.settings.key_separator,
            self.settings.rules,
            &self.scanner,
        );
        tracing::debug!(
            base_locale = %base_locale,
            base_keys = comparator.base_keys().len(),
            targets = targets.len(),
            "Validating translations"
        );

        let threads = self.settings.concurrency.effective_threads();
        let outcomes = validate_parallel(&comparator, source, &targets, threads);

        Ok(ValidationRun {
            base_locale: base_locale.clone(),
            base_file: base.file_path().map(Path::to_path_buf),
            base_key_count: comparator.base_keys().len(),
            outcomes,
            rules: self.settings.rules,
        })
    }
}

fn validate_locale(
    comparator: &Comparator<'_>,
    source: &dyn DocumentSource,
    locale: &str,
) -> LocaleOutcome {
    match source.load(locale) {
        Ok(document) => LocaleOutcome::Validated(comparator.compare(&document)),
        Err(error) => {
            tracing::warn!(locale, %error, "Failed to load translation file");
            LocaleOutcome::Failed(error)
        }
    }
}

/// Splits `targets` into at most `threads` contiguous chunks, one scoped
/// thread per chunk. Outcomes keep the order of `targets`.
fn validate_parallel(
    comparator: &Comparator<'_>,
    source: &dyn DocumentSource,
    targets: &[String],
    threads: usize,
) -> Vec<LocaleOutcome> {
    if threads <= 1 || targets.len() <= 1 {
        return targets.iter().map(|locale| validate_locale(comparator, source, locale)).collect();
    }

    let chunk_size = targets.len().div_ceil(threads);
    std::thread::scope(|scope| {
        let handles: Vec<_> = targets
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|locale| validate_locale(comparator, source, locale))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| {
                handle.join().unwrap_or_else(|payload| std::panic::resume_unwind(payload))
            })
            .collect()
    })
}

/// Loads settings for `project_root` and validates its locales directory.
///
/// # Errors
/// Configuration, pattern, base locale and discovery errors.
pub fn validate_project(
    project_root: &Path,
    overrides: &SettingsOverrides,
) -> Result<ValidationRun, ValidateError> {
    let mut config_manager = ConfigManager::new(project_root.to_path_buf());
    config_manager.load_settings(overrides)?;

    let settings = config_manager.get_settings().clone();
    let matcher = FileMatcher::new(config_manager.locales_dir(), &settings)?;
    let source = DirectorySource::new(matcher, settings.key_separator.clone());

    Validator::new(settings)?.validate(&source)
}
