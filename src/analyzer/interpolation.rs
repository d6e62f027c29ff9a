//! i18next `{{variable}}` interpolation tokens.

use std::borrow::Cow;
use std::collections::{
    BTreeSet,
    HashSet,
};

use regex::{
    Captures,
    Regex,
};

/// Matches `{{name}}`, `{{ name }}` and `{{name, format}}`; group 1 is the name.
const TOKEN_PATTERN: &str = r"\{\{\s*([^{},\s]+)\s*(?:,[^{}]*)?\}\}";

/// Finds interpolation tokens in translation values.
#[derive(Debug, Clone)]
pub struct InterpolationTokens {
    regex: Regex,
}

impl InterpolationTokens {
    /// # Errors
    /// Only if the built-in token pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self { regex: Regex::new(TOKEN_PATTERN)? })
    }

    /// Names of the variables interpolated into `text`.
    #[must_use]
    pub fn variables(&self, text: &str) -> BTreeSet<String> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1).map(|name| name.as_str().to_string()))
            .collect()
    }

    /// Replaces every token whose variable is in `allowed` with a space.
    ///
    /// Other tokens are kept verbatim.
    #[must_use]
    pub fn strip_allowed<'a>(&self, text: &'a str, allowed: &HashSet<String>) -> Cow<'a, str> {
        if allowed.is_empty() {
            return Cow::Borrowed(text);
        }

        self.regex.replace_all(text, |caps: &Captures<'_>| {
            let whole = caps.get(0).map_or("", |m| m.as_str());
            match caps.get(1) {
                Some(name) if allowed.contains(name.as_str()) => " ".to_string(),
                _ => whole.to_string(),
            }
        })
    }
}
