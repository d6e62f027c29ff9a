//! Detection of leftover placeholder text (`TODO`, `FIXME`, ...) in translations.

use std::collections::HashSet;

use regex::{
    Regex,
    RegexBuilder,
};

use crate::analyzer::interpolation::InterpolationTokens;
use crate::config::PlaceholderConfig;

/// A compiled banned pattern together with its configured source text.
#[derive(Debug, Clone)]
struct BannedPattern {
    source: String,
    regex: Regex,
}

/// Scans translation values for banned placeholder patterns.
///
/// Interpolation tokens for allow-listed variables are removed before
/// matching, so only literal text can trigger a hit.
#[derive(Debug, Clone)]
pub struct PlaceholderScanner {
    patterns: Vec<BannedPattern>,
    allowed_interpolations: HashSet<String>,
    tokens: InterpolationTokens,
}

impl PlaceholderScanner {
    /// Compiles the configured patterns case-insensitively.
    ///
    /// # Errors
    /// Returns the first pattern that is not a valid regular expression.
    pub fn new(config: &PlaceholderConfig) -> Result<Self, regex::Error> {
        let patterns = config
            .patterns
            .iter()
            .map(|source| {
                RegexBuilder::new(source)
                    .case_insensitive(true)
                    .build()
                    .map(|regex| BannedPattern { source: source.clone(), regex })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            patterns,
            allowed_interpolations: config.allowed_interpolations.iter().cloned().collect(),
            tokens: InterpolationTokens::new()?,
        })
    }

    /// Returns the source of the first pattern matching `value`, if any.
    #[must_use]
    pub fn scan(&self, value: &str) -> Option<&str> {
        let text = self.tokens.strip_allowed(value, &self.allowed_interpolations);
        self.patterns
            .iter()
            .find(|pattern| pattern.regex.is_match(&text))
            .map(|pattern| pattern.source.as_str())
    }

    #[must_use]
    pub const fn tokens(&self) -> &InterpolationTokens {
        &self.tokens
    }
}
