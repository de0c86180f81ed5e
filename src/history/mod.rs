//! Undo/redo history
//!
//! Full-state checkpoints: each committed edit captures the buffer content
//! together with the annotation set and link table, so undo restores styles
//! and links along with the text. Snapshots are immutable after capture.

use crate::errors::EditorError;
use crate::links::LinkRegistry;
use crate::text::{AnnotationStore, TextBuffer};
use serde::{Deserialize, Serialize};

const DEFAULT_MAX_DEPTH: usize = 100;

/// Immutable capture of document state at a point in history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub text: String,
    pub annotations: AnnotationStore,
    pub links: LinkRegistry,
}

impl Snapshot {
    /// Capture the current document state
    pub fn capture(
        buffer: &TextBuffer,
        annotations: &AnnotationStore,
        links: &LinkRegistry,
    ) -> Self {
        Self {
            text: buffer.as_str().to_string(),
            annotations: annotations.clone(),
            links: links.clone(),
        }
    }
}

/// Manages the undo and redo stacks
///
/// The undo stack never drops below one element: the bottom entry is the
/// initial document state, so undo can never walk past document creation.
/// The current state is always the top of the undo stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryManager {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    max_depth: usize,
}

impl HistoryManager {
    /// Create a history seeded with the initial document snapshot
    pub fn new(initial: Snapshot) -> Self {
        Self::with_max_depth(initial, DEFAULT_MAX_DEPTH)
    }

    /// Create a history with a custom depth bound
    pub fn with_max_depth(initial: Snapshot, max_depth: usize) -> Self {
        Self {
            undo_stack: vec![initial],
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Discard all history and reseed with a new initial snapshot
    ///
    /// Used on new-document and load; history is never partially retained
    /// across a full document replacement.
    pub fn reset(&mut self, initial: Snapshot) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.undo_stack.push(initial);
    }

    /// Push a committed edit; any divergent redo history is discarded
    pub fn commit(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();
        if self.undo_stack.len() > self.max_depth {
            // Drop the second-oldest entry so the initial state survives
            self.undo_stack.remove(1);
        }
    }

    /// Step back one snapshot
    ///
    /// Moves the current state to the redo stack and returns the snapshot
    /// to restore. Fails with `NothingToUndo` at the initial snapshot.
    pub fn undo(&mut self) -> Result<Snapshot, EditorError> {
        if self.undo_stack.len() <= 1 {
            return Err(EditorError::NothingToUndo);
        }
        if let Some(current) = self.undo_stack.pop() {
            self.redo_stack.push(current);
        }
        match self.undo_stack.last() {
            Some(snapshot) => Ok(snapshot.clone()),
            None => Err(EditorError::NothingToUndo),
        }
    }

    /// Step forward one undone snapshot
    pub fn redo(&mut self) -> Result<Snapshot, EditorError> {
        match self.redo_stack.pop() {
            Some(snapshot) => {
                self.undo_stack.push(snapshot.clone());
                Ok(snapshot)
            }
            None => Err(EditorError::NothingToRedo),
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of available undo steps
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len() - 1
    }

    /// Number of available redo steps
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// The snapshot representing the current state
    pub fn current(&self) -> Option<&Snapshot> {
        self.undo_stack.last()
    }
}
