//! Loading translation documents.
/// Load errors
pub mod error;
/// Document sources (directory, memory)
pub mod source;
/// Parsed translation documents
pub mod translation;

pub use error::{
    LoadError,
    LoadErrorKind,
};
pub use source::{
    DirectorySource,
    DocumentSource,
    MemorySource,
};
pub use translation::TranslationDocument;
