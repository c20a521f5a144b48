//! Span - Source location
//!
//! A Span marks the bytes of the input a token or error was produced from.

use serde::Serialize;

/// A position in the scanned buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Position {
    /// Line (1-indexed)
    pub line: u32,
    /// Column (1-indexed, counted in bytes)
    pub column: u32,
    /// Byte offset from the start of the buffer
    pub offset: usize,
}

impl Position {
    pub fn new(line: u32, column: u32, offset: usize) -> Self {
        Self { line, column, offset }
    }

    /// Position of the first byte of a buffer
    pub fn start() -> Self {
        Self::new(1, 1, 0)
    }
}

/// A region of the buffer (start inclusive, end exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Creates an empty span at a single position
    pub fn point(pos: Position) -> Self {
        Self { start: pos, end: pos }
    }

    /// Combines two spans, creating one that covers both
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: if self.start.offset < other.start.offset {
                self.start
            } else {
                other.start
            },
            end: if self.end.offset > other.end.offset {
                self.end
            } else {
                other.end
            },
        }
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte range of the span, for slicing the scanned buffer
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start.offset..self.end.offset
    }
}
