//! Core types used throughout the project.

use std::fmt;

use serde::Serialize;

/// A range in a translation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SourceRange {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

/// A position in a translation file (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SourcePosition {
    pub line: u32,
    pub character: u32,
}

/// Rows and columns beyond `u32::MAX` saturate.
impl From<tree_sitter::Point> for SourcePosition {
    fn from(point: tree_sitter::Point) -> Self {
        Self {
            line: u32::try_from(point.row).unwrap_or(u32::MAX),
            character: u32::try_from(point.column).unwrap_or(u32::MAX),
        }
    }
}

/// Displays as the 1-indexed `line:column` pair editors expect.
impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line.saturating_add(1), self.character.saturating_add(1))
    }
}

impl SourceRange {
    #[must_use]
    pub fn from_node(node: &tree_sitter::Node<'_>) -> Self {
        Self { start: node.start_position().into(), end: node.end_position().into() }
    }
}
