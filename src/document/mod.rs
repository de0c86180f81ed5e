//! Document façade
//!
//! Ties the text buffer, annotation store, link registry, spell checker and
//! history together behind the command surface consumed by presentation and
//! I/O collaborators. Every mutation either fully applies or fully rejects;
//! the document never performs I/O itself.

use crate::errors::EditorError;
use crate::history::{HistoryManager, Snapshot};
use crate::links::{self, LinkRegistry};
use crate::spell::{self, Dictionary};
use crate::text::{
    Alignment, AnnotationKind, AnnotationStore, AnnotationValue, Span, TextBuffer,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One uniform run of styling, produced by merging annotation queries per
/// character run. Consecutive spans tile the whole buffer; unstyled runs
/// carry no kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSpan {
    pub span: Span,
    pub kinds: Vec<AnnotationKind>,
    pub values: Vec<AnnotationValue>,
}

/// Counts for a status-bar collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStatus {
    pub chars: usize,
    pub words: usize,
    pub lines: usize,
}

/// An editable rich-text document
///
/// Single-threaded and synchronous: every command runs to completion
/// before the next is accepted. Commands that change content or styling
/// commit a history snapshot; spelling rescans do not (derived data).
#[derive(Debug, Clone)]
pub struct Document {
    buffer: TextBuffer,
    annotations: AnnotationStore,
    links: LinkRegistry,
    history: HistoryManager,
    dictionary: Dictionary,
}

impl Document {
    /// Create an empty document with the built-in common-words dictionary
    pub fn new() -> Self {
        Self::with_dictionary(Dictionary::common_english())
    }

    /// Create an empty document with a collaborator-supplied dictionary
    pub fn with_dictionary(dictionary: Dictionary) -> Self {
        let buffer = TextBuffer::new();
        let annotations = AnnotationStore::new();
        let links = LinkRegistry::new();
        let history = HistoryManager::new(Snapshot::capture(&buffer, &annotations, &links));
        Self {
            buffer,
            annotations,
            links,
            history,
            dictionary,
        }
    }

    /// Replace the whole document: new content, no annotations, history
    /// reset to a single initial snapshot of the new state
    pub fn load(&mut self, text: &str) {
        self.buffer = TextBuffer::from_str(text);
        self.annotations.clear();
        self.links.clear();
        self.history
            .reset(Snapshot::capture(&self.buffer, &self.annotations, &self.links));
        log::debug!("loaded document, {} chars", self.buffer.len());
    }

    /// Plain-text content; style information is not persisted by the core
    pub fn serialize(&self) -> &str {
        self.buffer.as_str()
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Insert text at a character offset, shifting annotations and links
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<(), EditorError> {
        let inserted = self.buffer.insert(offset, text)?;
        self.annotations.on_insert(offset, inserted);
        self.links.on_insert(offset, inserted);
        self.commit();
        log::debug!("insert {inserted} chars at {offset}");
        Ok(())
    }

    /// Delete `[start, end)`, clipping annotations and links
    ///
    /// Returns the removed text.
    pub fn delete(&mut self, start: usize, end: usize) -> Result<String, EditorError> {
        let removed = self.buffer.delete(start, end)?;
        self.annotations.on_delete(start, end);
        self.links.on_delete(start, end);
        self.commit();
        log::debug!("delete {start}..{end}");
        Ok(removed)
    }

    /// Read the substring in `[start, end)` without side effects
    pub fn read(&self, start: usize, end: usize) -> Result<&str, EditorError> {
        self.buffer.read(start, end)
    }

    /// Replace every occurrence of `find` with `replace`
    ///
    /// A whole-content replacement: annotations and links are cleared when
    /// anything matched. Returns the number of replacements.
    pub fn replace_all(&mut self, find: &str, replace: &str) -> Result<usize, EditorError> {
        if find.is_empty() {
            return Err(EditorError::Validation(
                "cannot replace an empty string".to_string(),
            ));
        }
        let count = self.buffer.as_str().matches(find).count();
        if count == 0 {
            return Ok(0);
        }
        let replaced = self.buffer.as_str().replace(find, replace);
        self.buffer = TextBuffer::from_str(&replaced);
        self.annotations.clear();
        self.links.clear();
        self.commit();
        log::debug!("replaced {count} occurrences");
        Ok(count)
    }

    /// Toggle a boolean style over a range
    ///
    /// Off if the entire range already carries the kind, else on for the
    /// whole range; a partially styled range toggles on. Only bold, italic
    /// and underline are toggleable.
    pub fn toggle_style(&mut self, kind: AnnotationKind, span: Span) -> Result<(), EditorError> {
        if !kind.is_toggle() {
            return Err(EditorError::Validation(format!(
                "{kind:?} is not a toggleable style"
            )));
        }
        self.check_range(span)?;
        if span.is_empty() {
            return Ok(());
        }
        if self.annotations.covered(kind, span) {
            self.annotations.remove(kind, span);
        } else {
            self.annotations.add(kind, span, None, self.buffer.len())?;
        }
        self.commit();
        Ok(())
    }

    /// Set paragraph alignment over a range, replacing any other alignment
    /// on the overlapping region
    pub fn set_alignment(&mut self, span: Span, alignment: Alignment) -> Result<(), EditorError> {
        self.check_range(span)?;
        if span.is_empty() {
            return Ok(());
        }
        self.annotations.add(
            AnnotationKind::Alignment,
            span,
            Some(AnnotationValue::Alignment(alignment)),
            self.buffer.len(),
        )?;
        self.commit();
        Ok(())
    }

    /// Set foreground color over a range, replacing any other color on the
    /// overlapping region
    pub fn set_color(&mut self, span: Span, color: &str) -> Result<(), EditorError> {
        if color.is_empty() {
            return Err(EditorError::Validation("empty color value".to_string()));
        }
        self.check_range(span)?;
        if span.is_empty() {
            return Ok(());
        }
        self.annotations.add(
            AnnotationKind::Color,
            span,
            Some(AnnotationValue::Color(color.to_string())),
            self.buffer.len(),
        )?;
        self.commit();
        Ok(())
    }

    /// Bind a URL to a range: registers the target and creates the matching
    /// link annotation in one step
    pub fn bind_link(&mut self, span: Span, url: &str) -> Result<(), EditorError> {
        self.check_range(span)?;
        if span.is_empty() {
            return Err(EditorError::Validation(
                "cannot bind a link to an empty range".to_string(),
            ));
        }
        links::validate_url(url)?;
        self.annotations.add(
            AnnotationKind::Link,
            span,
            Some(AnnotationValue::Url(url.to_string())),
            self.buffer.len(),
        )?;
        self.links.bind(span, url.to_string());
        self.commit();
        Ok(())
    }

    /// Remove the registry entry and the link annotation together
    ///
    /// Links are removed whole: unbinding any part of a bound range drops
    /// the entire link on both sides, so an annotation never survives
    /// without its URL. Unbinding a range with no link is a no-op that
    /// commits nothing.
    pub fn unbind_link(&mut self, span: Span) -> Result<(), EditorError> {
        self.check_range(span)?;
        self.annotations.remove_overlapping(AnnotationKind::Link, span);
        let removed = self.links.unbind(span);
        if removed > 0 {
            self.commit();
        }
        Ok(())
    }

    /// URL at a character offset, for activation/tooltip collaborators
    pub fn resolve_link(&self, offset: usize) -> Option<&str> {
        self.links.resolve(offset)
    }

    /// Re-run the spell-check pass over the whole buffer
    ///
    /// Fully replaces the previous misspelled annotation set; stale spans
    /// from an earlier buffer state never persist. Returns the span count.
    pub fn rescan_spelling(&mut self) -> Result<usize, EditorError> {
        self.annotations.clear_kind(AnnotationKind::Misspelled);
        let found = spell::scan(self.buffer.as_str(), &self.dictionary);
        for word in &found {
            self.annotations
                .add(AnnotationKind::Misspelled, word.span, None, self.buffer.len())?;
        }
        log::debug!("spell scan found {} unknown words", found.len());
        Ok(found.len())
    }

    /// Current misspelled spans
    pub fn misspelled_spans(&self) -> Vec<Span> {
        self.annotations.misspelled_spans()
    }

    /// Restore the immediately prior snapshot
    pub fn undo(&mut self) -> Result<(), EditorError> {
        match self.history.undo() {
            Ok(snapshot) => {
                self.apply_snapshot(snapshot);
                Ok(())
            }
            Err(err) => {
                log::warn!("undo requested with no history");
                Err(err)
            }
        }
    }

    /// Restore the most recently undone snapshot
    pub fn redo(&mut self) -> Result<(), EditorError> {
        match self.history.redo() {
            Ok(snapshot) => {
                self.apply_snapshot(snapshot);
                Ok(())
            }
            Err(err) => {
                log::warn!("redo requested with no history");
                Err(err)
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Ordered runs of uniform styling covering the whole buffer
    pub fn render_spans(&self) -> Vec<RenderSpan> {
        let mut boundaries = BTreeSet::new();
        boundaries.insert(0);
        boundaries.insert(self.buffer.len());
        for annotation in self.annotations.iter() {
            boundaries.insert(annotation.span.start);
            boundaries.insert(annotation.span.end);
        }

        let offsets: Vec<usize> = boundaries.into_iter().collect();
        let mut runs = Vec::with_capacity(offsets.len().saturating_sub(1));
        for pair in offsets.windows(2) {
            let span = Span::new(pair[0], pair[1]);
            let active = self.annotations.active_at(span.start);
            runs.push(RenderSpan {
                span,
                kinds: active.iter().map(|a| a.kind).collect(),
                values: active.iter().filter_map(|a| a.value.clone()).collect(),
            });
        }
        runs
    }

    /// Character/word/line counts for the status bar
    pub fn status(&self) -> DocumentStatus {
        DocumentStatus {
            chars: self.buffer.len(),
            words: self.buffer.word_count(),
            lines: self.buffer.line_count(),
        }
    }

    /// The annotation store, read-only
    pub fn annotations(&self) -> &AnnotationStore {
        &self.annotations
    }

    /// The link registry, read-only
    pub fn links(&self) -> &LinkRegistry {
        &self.links
    }

    /// The active dictionary
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Swap the dictionary (e.g. after a collaborator loads a wordlist)
    pub fn set_dictionary(&mut self, dictionary: Dictionary) {
        self.dictionary = dictionary;
    }

    fn check_range(&self, span: Span) -> Result<(), EditorError> {
        if span.start > span.end || span.end > self.buffer.len() {
            return Err(EditorError::Range {
                start: span.start,
                end: span.end,
                len: self.buffer.len(),
            });
        }
        Ok(())
    }

    fn commit(&mut self) {
        self.history
            .commit(Snapshot::capture(&self.buffer, &self.annotations, &self.links));
    }

    fn apply_snapshot(&mut self, snapshot: Snapshot) {
        self.buffer = TextBuffer::from_str(&snapshot.text);
        self.annotations = snapshot.annotations;
        self.links = snapshot.links;
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
