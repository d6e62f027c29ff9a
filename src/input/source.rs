//! Where translation documents come from.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use ignore::WalkBuilder;

use crate::config::FileMatcher;
use crate::input::error::LoadError;
use crate::input::translation::TranslationDocument;

/// A mapping from locale identifier to translation document.
///
/// Implementations must be shareable between the worker threads that
/// validate locales in parallel.
pub trait DocumentSource: Sync {
    /// Loads the document of one locale.
    ///
    /// # Errors
    /// `DocumentNotFound` when the locale has no document, `MalformedDocument`
    /// when its content is not a JSON object.
    fn load(&self, locale: &str) -> Result<TranslationDocument, LoadError>;

    /// Every locale this source has a document for, sorted.
    ///
    /// # Errors
    /// `Discovery` when the source cannot be listed.
    fn locales(&self) -> Result<Vec<String>, LoadError>;
}

/// One `<locale>.json` file per locale in a directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    matcher: FileMatcher,
    separator: String,
}

impl DirectorySource {
    #[must_use]
    pub fn new(matcher: FileMatcher, separator: impl Into<String>) -> Self {
        Self { matcher, separator: separator.into() }
    }

    /// Path of the translation file whose stem is `locale`, if the
    /// directory has one matching the configured patterns.
    #[must_use]
    pub fn path_for(&self, locale: &str) -> Option<PathBuf> {
        self.translation_files().ok().and_then(|mut files| files.remove(locale))
    }

    /// Every translation file in the locales directory, keyed by file stem.
    fn translation_files(&self) -> Result<BTreeMap<String, PathBuf>, LoadError> {
        let locales_dir = self.matcher.locales_dir();
        if !locales_dir.is_dir() {
            return Err(LoadError::Discovery {
                dir: locales_dir.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }

        let mut files = BTreeMap::new();
        for result in WalkBuilder::new(locales_dir)
            .max_depth(Some(1))
            .hidden(true)
            .git_ignore(true)
            .git_exclude(true)
            .follow_links(false)
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read directory entry");
                    continue;
                }
            };

            // ファイルのみを対象
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            if !self.matcher.is_translation_file(path) {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                tracing::warn!(path = %path.display(), "Skipping file with a non UTF-8 name");
                continue;
            };
            if let Some(previous) = files.insert(stem.to_string(), path.to_path_buf()) {
                tracing::warn!(
                    locale = stem,
                    ignored = %previous.display(),
                    "Several translation files share a locale"
                );
            }
        }

        Ok(files)
    }
}

impl DocumentSource for DirectorySource {
    fn load(&self, locale: &str) -> Result<TranslationDocument, LoadError> {
        let Some(path) = self.path_for(locale) else {
            return Err(LoadError::DocumentNotFound {
                locale: locale.to_string(),
                path: self.matcher.locales_dir().join(format!("{locale}.json")),
            });
        };
        tracing::debug!(locale, path = %path.display(), "Loading translation file");

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LoadError::DocumentNotFound { locale: locale.to_string(), path });
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(LoadError::MalformedDocument {
                    locale: locale.to_string(),
                    reason: format!("file is not valid UTF-8: {e}"),
                });
            }
            Err(source) => {
                return Err(LoadError::Io { locale: locale.to_string(), path, source });
            }
        };

        TranslationDocument::parse(locale, &content, Some(&path), &self.separator)
    }

    fn locales(&self) -> Result<Vec<String>, LoadError> {
        let locales: Vec<String> = self.translation_files()?.into_keys().collect();
        tracing::debug!(
            count = locales.len(),
            dir = %self.matcher.locales_dir().display(),
            "Discovered locales"
        );
        Ok(locales)
    }
}

/// Raw JSON text per locale, kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: BTreeMap<String, String>,
    separator: String,
}

impl MemorySource {
    #[must_use]
    pub fn new(separator: impl Into<String>) -> Self {
        Self { documents: BTreeMap::new(), separator: separator.into() }
    }

    /// Adds (or replaces) the raw text of a locale (builder style).
    #[must_use]
    pub fn with_document(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(locale, text);
        self
    }

    pub fn insert(&mut self, locale: impl Into<String>, text: impl Into<String>) {
        self.documents.insert(locale.into(), text.into());
    }
}

impl DocumentSource for MemorySource {
    fn load(&self, locale: &str) -> Result<TranslationDocument, LoadError> {
        let Some(text) = self.documents.get(locale) else {
            return Err(LoadError::DocumentNotFound {
                locale: locale.to_string(),
                path: PathBuf::from(format!("{locale}.json")),
            });
        };

        TranslationDocument::parse(locale, text, None, &self.separator)
    }

    fn locales(&self) -> Result<Vec<String>, LoadError> {
        Ok(self.documents.keys().cloned().collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::config::{
        TranslationFilesConfig,
        ValidatorSettings,
    };
    use crate::input::error::LoadErrorKind;

    fn directory_source(dir: &TempDir, settings: &ValidatorSettings) -> DirectorySource {
        let matcher = FileMatcher::new(dir.path().to_path_buf(), settings).expect("valid patterns");
        DirectorySource::new(matcher, ".")
    }

    #[rstest]
    fn directory_source_discovers_matching_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("fr-FR.json"), "{}").unwrap();
        fs::write(dir.path().join("en-US.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("de-DE.json"), "{}").unwrap();

        let source = directory_source(&dir, &ValidatorSettings::default());

        assert_that!(source.locales().unwrap(), elements_are![eq("en-US"), eq("fr-FR")]);
    }

    #[rstest]
    fn directory_source_honours_exclude_patterns() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("en-US.json"), "{}").unwrap();
        fs::write(dir.path().join("schema.json"), "{}").unwrap();
        let settings = ValidatorSettings {
            translation_files: TranslationFilesConfig {
                exclude_patterns: vec!["schema.json".to_string()],
                ..TranslationFilesConfig::default()
            },
            ..ValidatorSettings::default()
        };

        let source = directory_source(&dir, &settings);

        assert_that!(source.locales().unwrap(), elements_are![eq("en-US")]);
    }

    #[rstest]
    fn directory_source_missing_dir_is_discovery_error() {
        let dir = TempDir::new().unwrap();
        let settings = ValidatorSettings::default();
        let matcher = FileMatcher::new(dir.path().join("absent"), &settings).unwrap();
        let source = DirectorySource::new(matcher, ".");

        let err = source.locales().unwrap_err();

        assert_eq!(err.kind(), LoadErrorKind::Discovery);
    }

    #[rstest]
    fn directory_source_loads_document() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ja-JP.json"), r#"{"common": {"save": "保存"}}"#).unwrap();

        let source = directory_source(&dir, &ValidatorSettings::default());
        let document = source.load("ja-JP").unwrap();

        assert_eq!(document.locale(), "ja-JP");
        assert_eq!(document.file_path(), Some(dir.path().join("ja-JP.json").as_path()));
        assert!(document.keys(".").contains("common.save"));
    }

    #[rstest]
    #[case::absent(None, LoadErrorKind::DocumentNotFound)]
    #[case::malformed(Some("{ not json"), LoadErrorKind::MalformedDocument)]
    #[case::not_an_object(Some("[1, 2]"), LoadErrorKind::MalformedDocument)]
    fn directory_source_load_failures(
        #[case] content: Option<&str>,
        #[case] expected: LoadErrorKind,
    ) {
        let dir = TempDir::new().unwrap();
        if let Some(content) = content {
            fs::write(dir.path().join("ar-SA.json"), content).unwrap();
        }

        let source = directory_source(&dir, &ValidatorSettings::default());

        assert_eq!(source.load("ar-SA").unwrap_err().kind(), expected);
    }

    #[rstest]
    fn directory_source_loads_files_matching_custom_pattern() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("en-US.json5"), r#"{"save": "Save"}"#).unwrap();
        fs::write(dir.path().join("fr-FR.json5"), r#"{"save": "Enregistrer"}"#).unwrap();
        fs::write(dir.path().join("de-DE.json"), "{}").unwrap();
        let settings = ValidatorSettings {
            translation_files: TranslationFilesConfig {
                file_pattern: "*.json5".to_string(),
                ..TranslationFilesConfig::default()
            },
            ..ValidatorSettings::default()
        };

        let source = directory_source(&dir, &settings);

        assert_that!(source.locales().unwrap(), elements_are![eq("en-US"), eq("fr-FR")]);
        let document = source.load("fr-FR").unwrap();
        assert_eq!(document.file_path(), Some(dir.path().join("fr-FR.json5").as_path()));
        assert!(document.keys(".").contains("save"));
        assert_eq!(source.load("de-DE").unwrap_err().kind(), LoadErrorKind::DocumentNotFound);
    }

    #[rstest]
    fn memory_source_round_trip() {
        let source = MemorySource::new(".")
            .with_document("en-US", r#"{"a": "b"}"#)
            .with_document("es-ES", "oops");

        assert_that!(source.locales().unwrap(), elements_are![eq("en-US"), eq("es-ES")]);
        assert!(source.load("en-US").is_ok());
        assert_eq!(source.load("es-ES").unwrap_err().kind(), LoadErrorKind::MalformedDocument);
        assert_eq!(source.load("it-IT").unwrap_err().kind(), LoadErrorKind::DocumentNotFound);
    }
}
