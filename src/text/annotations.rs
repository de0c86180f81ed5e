//! Annotation layer for styling metadata on text
//!
//! Stores bold/italic/underline runs, colors, alignment, hyperlinks and
//! misspelling marks separately from text, linked by character spans.
//! Annotations automatically track position changes when text is edited.

use super::span::Span;
use crate::errors::EditorError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The annotation kinds understood by the core
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum AnnotationKind {
    Bold,
    Italic,
    Underline,
    Color,
    Alignment,
    Link,
    Misspelled,
}

impl AnnotationKind {
    /// Kinds driven by toggle-style formatting commands
    pub fn is_toggle(&self) -> bool {
        matches!(self, Self::Bold | Self::Italic | Self::Underline)
    }

    /// Kinds where at most one value may cover any character
    pub fn is_exclusive(&self) -> bool {
        matches!(self, Self::Color | Self::Alignment | Self::Link)
    }
}

/// Paragraph alignment values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// Kind-specific annotation payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnotationValue {
    /// Foreground color, e.g. "#ff0000"
    Color(String),
    Alignment(Alignment),
    /// Absolute link target
    Url(String),
}

/// A single styled run: kind, span, optional payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub kind: AnnotationKind,
    pub span: Span,
    pub value: Option<AnnotationValue>,
}

impl Annotation {
    pub fn new(kind: AnnotationKind, span: Span, value: Option<AnnotationValue>) -> Self {
        Self { kind, span, value }
    }
}

/// Annotation store for one document
///
/// Spans of one kind are kept sorted by start offset and coalesced: two
/// overlapping or touching spans with the same payload merge into one, so
/// no duplicate overlapping spans of a kind survive an add/remove cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationStore {
    spans: BTreeMap<AnnotationKind, Vec<Annotation>>,
}

impl AnnotationStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn check_span(span: Span, buffer_len: usize) -> Result<(), EditorError> {
        if span.start > span.end || span.end > buffer_len {
            return Err(EditorError::Range {
                start: span.start,
                end: span.end,
                len: buffer_len,
            });
        }
        Ok(())
    }

    /// Add an annotation over a span
    ///
    /// For exclusive kinds (color, alignment, link) any same-kind spans
    /// overlapping the target region are removed first. Empty spans are
    /// accepted and stored as nothing.
    pub fn add(
        &mut self,
        kind: AnnotationKind,
        span: Span,
        value: Option<AnnotationValue>,
        buffer_len: usize,
    ) -> Result<(), EditorError> {
        Self::check_span(span, buffer_len)?;
        if span.is_empty() {
            return Ok(());
        }
        if kind == AnnotationKind::Link {
            self.remove_overlapping(kind, span);
        } else if kind.is_exclusive() {
            self.remove(kind, span);
        }
        let entries = self.spans.entry(kind).or_default();
        entries.push(Annotation::new(kind, span, value));
        Self::coalesce(entries);
        Ok(())
    }

    /// Remove the overlapping portion of existing spans of `kind`
    ///
    /// A span strictly containing the removal range is split into two
    /// surviving spans on either side.
    pub fn remove(&mut self, kind: AnnotationKind, span: Span) {
        let Some(entries) = self.spans.get_mut(&kind) else {
            return;
        };
        let mut survivors = Vec::with_capacity(entries.len());
        for entry in entries.drain(..) {
            if !entry.span.overlaps(span) {
                survivors.push(entry);
                continue;
            }
            if entry.span.start < span.start {
                survivors.push(Annotation::new(
                    kind,
                    Span::new(entry.span.start, span.start),
                    entry.value.clone(),
                ));
            }
            if span.end < entry.span.end {
                survivors.push(Annotation::new(
                    kind,
                    Span::new(span.end, entry.span.end),
                    entry.value.clone(),
                ));
            }
        }
        *entries = survivors;
        Self::sort_entries(entries);
        // An empty entry list must not differ from an absent kind
        if entries.is_empty() {
            self.spans.remove(&kind);
        }
    }

    /// Remove every span of `kind` overlapping the range, whole spans only
    ///
    /// Links are atomic: a link either survives intact or is removed with
    /// its URL, so it never splits into fragments the registry cannot
    /// account for. Returns the number of spans removed.
    pub fn remove_overlapping(&mut self, kind: AnnotationKind, span: Span) -> usize {
        let Some(entries) = self.spans.get_mut(&kind) else {
            return 0;
        };
        let before = entries.len();
        entries.retain(|e| !e.span.overlaps(span));
        let removed = before - entries.len();
        if entries.is_empty() {
            self.spans.remove(&kind);
        }
        removed
    }

    /// Check if a single coalesced span of `kind` covers the whole range
    ///
    /// This is the predicate behind toggle semantics: toggle off only when
    /// the entire target range already carries the kind.
    pub fn covered(&self, kind: AnnotationKind, span: Span) -> bool {
        self.spans
            .get(&kind)
            .map(|entries| entries.iter().any(|e| e.span.covers(span)))
            .unwrap_or(false)
    }

    /// Spans of `kind` containing a character offset
    pub fn query_point(&self, kind: AnnotationKind, offset: usize) -> Vec<&Annotation> {
        self.spans
            .get(&kind)
            .map(|entries| entries.iter().filter(|e| e.span.contains(offset)).collect())
            .unwrap_or_default()
    }

    /// Spans of `kind` intersecting a range, ordered by start ascending,
    /// longer span first on ties
    pub fn query_range(&self, kind: AnnotationKind, span: Span) -> Vec<&Annotation> {
        self.spans
            .get(&kind)
            .map(|entries| entries.iter().filter(|e| e.span.overlaps(span)).collect())
            .unwrap_or_default()
    }

    /// All annotations (any kind) active at a character offset
    pub fn active_at(&self, offset: usize) -> Vec<&Annotation> {
        let mut active: Vec<&Annotation> = self
            .spans
            .values()
            .flatten()
            .filter(|e| e.span.contains(offset))
            .collect();
        active.sort_by(|a, b| {
            a.span
                .start
                .cmp(&b.span.start)
                .then(b.span.len().cmp(&a.span.len()))
                .then(a.kind.cmp(&b.kind))
        });
        active
    }

    /// Current misspelled-kind spans, side-effect free
    pub fn misspelled_spans(&self) -> Vec<Span> {
        self.spans
            .get(&AnnotationKind::Misspelled)
            .map(|entries| entries.iter().map(|e| e.span).collect())
            .unwrap_or_default()
    }

    /// Iterate over every annotation in the store
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.spans.values().flatten()
    }

    /// Total number of stored spans
    pub fn len(&self) -> usize {
        self.spans.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.values().all(Vec::is_empty)
    }

    /// Drop every span of one kind
    pub fn clear_kind(&mut self, kind: AnnotationKind) {
        self.spans.remove(&kind);
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.spans.clear();
    }

    /// Called after text is inserted at `offset`
    ///
    /// Spans starting at or after the offset shift right by `inserted`;
    /// spans straddling the offset extend their end.
    pub fn on_insert(&mut self, offset: usize, inserted: usize) {
        for entries in self.spans.values_mut() {
            for entry in entries.iter_mut() {
                if entry.span.start >= offset {
                    entry.span.start += inserted;
                    entry.span.end += inserted;
                } else if entry.span.end > offset {
                    entry.span.end += inserted;
                }
            }
        }
    }

    /// Called after the characters in `[start, end)` are deleted
    ///
    /// Spans fully inside the deleted range are removed, partial overlaps
    /// truncate at the deletion boundary, spans after it shift left.
    pub fn on_delete(&mut self, start: usize, end: usize) {
        let deleted = end - start;
        for entries in self.spans.values_mut() {
            entries.retain_mut(|entry| {
                entry.span.start = clip_offset(entry.span.start, start, end, deleted);
                entry.span.end = clip_offset(entry.span.end, start, end, deleted);
                entry.span.start < entry.span.end
            });
            // Deleting the gap between two runs can make them touch
            Self::coalesce(entries);
        }
        self.spans.retain(|_, entries| !entries.is_empty());
    }

    fn sort_entries(entries: &mut [Annotation]) {
        entries.sort_by(|a, b| {
            a.span
                .start
                .cmp(&b.span.start)
                .then(b.span.len().cmp(&a.span.len()))
        });
    }

    /// Merge overlapping or touching spans carrying the same payload
    fn coalesce(entries: &mut Vec<Annotation>) {
        Self::sort_entries(entries);
        let mut merged: Vec<Annotation> = Vec::with_capacity(entries.len());
        for entry in entries.drain(..) {
            match merged.last_mut() {
                Some(last) if last.span.end >= entry.span.start && last.value == entry.value => {
                    last.span.end = last.span.end.max(entry.span.end);
                }
                _ => merged.push(entry),
            }
        }
        *entries = merged;
    }
}

/// Map one offset across a deletion of `[start, end)`
fn clip_offset(offset: usize, start: usize, end: usize, deleted: usize) -> usize {
    if offset >= end {
        offset - deleted
    } else if offset >= start {
        start
    } else {
        offset
    }
}
