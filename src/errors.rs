//! Error types for document editing
//!
//! Defines the error hierarchy for rejected edits, with range errors
//! (offsets outside the buffer), validation errors (malformed input),
//! and the no-op signals for exhausted undo/redo history.

use thiserror::Error;

/// Top-level editing error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// Offset or range outside buffer bounds, or start > end
    #[error("range {start}..{end} invalid for buffer of length {len}")]
    Range {
        start: usize,
        end: usize,
        len: usize,
    },

    /// Malformed input: bad URL, empty color, wrong annotation kind
    #[error("validation failed: {0}")]
    Validation(String),

    /// Undo requested with only the initial snapshot left (not a failure)
    #[error("nothing to undo")]
    NothingToUndo,

    /// Redo requested with an empty redo stack (not a failure)
    #[error("nothing to redo")]
    NothingToRedo,
}

impl EditorError {
    /// Build a range error for a single offset
    pub fn offset(offset: usize, len: usize) -> Self {
        Self::Range {
            start: offset,
            end: offset,
            len,
        }
    }
}
