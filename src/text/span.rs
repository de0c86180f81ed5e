//! Character-offset spans over the text buffer
//!
//! Pure positions with no styling knowledge. All offsets count code points,
//! not bytes.

use serde::{Deserialize, Serialize};

/// A half-open range of character offsets `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Check if this span is empty (start == end)
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if a character offset falls inside this span
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Check if this span wholly contains another span
    pub fn covers(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Check if two spans share at least one character
    pub fn overlaps(&self, other: Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}
