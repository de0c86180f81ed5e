//! Layer 0: Text Editor Core
//!
//! This module provides pure text and annotation state with no knowledge
//! of presentation. It is the source of truth for document content.
//!
//! ## Modules
//!
//! - `buffer`: Text storage and editing operations
//! - `span`: Character-offset ranges
//! - `annotations`: Styling metadata layered over the buffer

pub mod annotations;
pub mod buffer;
pub mod span;

// Re-exports for convenience
pub use annotations::{Alignment, Annotation, AnnotationKind, AnnotationStore, AnnotationValue};
pub use buffer::TextBuffer;
pub use span::Span;
