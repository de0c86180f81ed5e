//! Rich-Text Document Core
//!
//! In-memory document state for a rich-text editor: a text buffer with
//! overlapping stylistic annotations (bold, italic, underline, color,
//! alignment, hyperlink, misspelling), a linear undo/redo history of
//! full-buffer checkpoints, and an on-demand spell-check pass.
//!
//! The core receives plain text and style commands from presentation and
//! I/O collaborators and returns renderable annotation spans and status
//! text to them; it performs no I/O or network calls itself.

pub mod document;
pub mod errors;
pub mod history;
pub mod links;
pub mod spell;
pub mod text;

// Re-export commonly used types
pub use document::{Document, DocumentStatus, RenderSpan};
pub use errors::EditorError;
pub use history::{HistoryManager, Snapshot};
pub use links::{LinkEntry, LinkRegistry};
pub use spell::{Dictionary, MisspelledWord};
pub use text::{Alignment, Annotation, AnnotationKind, AnnotationStore, AnnotationValue, Span, TextBuffer};
