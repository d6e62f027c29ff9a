//! Key extraction, comparison and value scanning.
pub mod comparator;
pub mod extractor;
pub mod interpolation;
pub mod placeholder;
pub mod types;

pub use comparator::Comparator;
pub use placeholder::PlaceholderScanner;
pub use types::{
    Completeness,
    InterpolationMismatch,
    PlaceholderHit,
    ValidationResult,
};
