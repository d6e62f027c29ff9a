use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Defines errors that may occur while loading a locale's translation document
#[derive(Error, Debug)]
pub enum LoadError {
    /// No document exists for the locale
    #[error("Translation file for '{locale}' not found: {}", path.display())]
    DocumentNotFound { locale: String, path: PathBuf },
    /// The content is not a JSON object
    #[error("Translation file for '{locale}' is malformed: {reason}")]
    MalformedDocument { locale: String, reason: String },
    /// Any other read failure
    #[error("Failed to read translation file for '{locale}' ({}): {source}", path.display())]
    Io {
        locale: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The locales directory could not be listed
    #[error("Failed to list translation files in {}: {reason}", dir.display())]
    Discovery { dir: PathBuf, reason: String },
}

/// Stable, serializable name of a [`LoadError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LoadErrorKind {
    DocumentNotFound,
    MalformedDocument,
    Io,
    Discovery,
}

impl LoadError {
    #[must_use]
    pub const fn kind(&self) -> LoadErrorKind {
        match self {
            Self::DocumentNotFound { .. } => LoadErrorKind::DocumentNotFound,
            Self::MalformedDocument { .. } => LoadErrorKind::MalformedDocument,
            Self::Io { .. } => LoadErrorKind::Io,
            Self::Discovery { .. } => LoadErrorKind::Discovery,
        }
    }
}
