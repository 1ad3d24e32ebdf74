use serde::{Deserialize, Serialize};

/// A point in a text, as seen by Markdown tooling and linters.
///
/// `line` and `column` are 1-based; columns count Unicode scalar values.
/// `offset` is a 0-based byte offset and is only present when it was
/// computed from a concrete text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            offset: None,
        }
    }

    pub fn with_offset(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset: Some(offset),
        }
    }

    /// Ordering key. Offsets are ignored so that positions with and without
    /// offsets compare by where they point.
    pub(crate) fn key(self) -> (usize, usize) {
        (self.line, self.column)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A `[start, end)` region between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Number of lines between start and end.
    pub fn line_delta(&self) -> usize {
        self.end.line.saturating_sub(self.start.line)
    }
}
