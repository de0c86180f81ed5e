//! End-to-end tests for the document command surface

use richtext_core::{
    AnnotationKind, Document, EditorError, Snapshot, Span,
};

#[test]
fn test_insert_shifts_bold_annotation() {
    let mut doc = Document::new();
    doc.load("World");
    doc.toggle_style(AnnotationKind::Bold, Span::new(0, 5)).unwrap();

    doc.insert(0, "Hello ").unwrap();

    assert_eq!(doc.serialize(), "Hello World");
    let spans = doc
        .annotations()
        .query_range(AnnotationKind::Bold, Span::new(0, 11));
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].span, Span::new(6, 11));
}

#[test]
fn test_undo_returns_prior_content_exactly() {
    let mut doc = Document::new();
    doc.load("base");
    doc.insert(4, " edit").unwrap();
    assert_eq!(doc.serialize(), "base edit");

    doc.undo().unwrap();
    assert_eq!(doc.serialize(), "base");

    doc.redo().unwrap();
    assert_eq!(doc.serialize(), "base edit");
}

#[test]
fn test_undo_restores_annotations_and_links() {
    let mut doc = Document::new();
    doc.load("styled text here");
    doc.toggle_style(AnnotationKind::Bold, Span::new(0, 6)).unwrap();
    doc.bind_link(Span::new(7, 11), "https://example.com").unwrap();

    doc.delete(0, 7).unwrap();
    assert_eq!(doc.resolve_link(2), Some("https://example.com"));

    doc.undo().unwrap();
    assert!(doc.annotations().covered(AnnotationKind::Bold, Span::new(0, 6)));
    assert_eq!(doc.resolve_link(8), Some("https://example.com"));

    doc.undo().unwrap();
    assert_eq!(doc.resolve_link(8), None);
    assert!(doc
        .annotations()
        .query_range(AnnotationKind::Link, Span::new(0, 16))
        .is_empty());
}

#[test]
fn test_commit_after_undo_discards_redo_targets() {
    let mut doc = Document::new();
    doc.load("");
    doc.insert(0, "a").unwrap();
    doc.insert(1, "b").unwrap();

    doc.undo().unwrap();
    assert!(doc.can_redo());

    // A new forward edit diverges from the undone history
    doc.insert(1, "c").unwrap();
    assert!(!doc.can_redo());
    assert_eq!(doc.redo(), Err(EditorError::NothingToRedo));
    assert_eq!(doc.serialize(), "ac");
}

#[test]
fn test_undo_stops_at_initial_snapshot() {
    let mut doc = Document::new();
    doc.load("initial");
    doc.insert(7, "!").unwrap();

    doc.undo().unwrap();
    assert_eq!(doc.undo(), Err(EditorError::NothingToUndo));
    assert_eq!(doc.serialize(), "initial");
}

#[test]
fn test_bind_resolve_unbind_link() {
    let mut doc = Document::new();
    doc.load("link text");

    doc.bind_link(Span::new(0, 4), "https://example.com").unwrap();
    assert_eq!(doc.resolve_link(2), Some("https://example.com"));

    doc.unbind_link(Span::new(0, 4)).unwrap();
    assert_eq!(doc.resolve_link(2), None);
    // Registry and annotation are removed together
    assert!(doc
        .annotations()
        .query_range(AnnotationKind::Link, Span::new(0, 9))
        .is_empty());
}

#[test]
fn test_rebinding_overlap_replaces_whole_link() {
    let mut doc = Document::new();
    doc.load("abcdefgh");
    doc.bind_link(Span::new(0, 6), "https://a.example").unwrap();
    doc.bind_link(Span::new(4, 8), "https://b.example").unwrap();

    // Annotation store and registry agree: one link, the new one
    let spans = doc
        .annotations()
        .query_range(AnnotationKind::Link, Span::new(0, 8));
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].span, Span::new(4, 8));
    assert_eq!(doc.links().entries().len(), 1);

    assert_eq!(doc.resolve_link(5), Some("https://b.example"));
    assert_eq!(doc.resolve_link(1), None);
    assert!(doc
        .annotations()
        .query_point(AnnotationKind::Link, 1)
        .is_empty());
}

#[test]
fn test_partial_unbind_removes_whole_link() {
    let mut doc = Document::new();
    doc.load("link text");
    doc.bind_link(Span::new(0, 6), "https://example.com").unwrap();

    doc.unbind_link(Span::new(2, 4)).unwrap();

    // No URL-less annotation fragments survive on either side
    assert!(doc
        .annotations()
        .query_range(AnnotationKind::Link, Span::new(0, 9))
        .is_empty());
    assert!(doc.links().is_empty());
    assert_eq!(doc.resolve_link(0), None);
    assert_eq!(doc.resolve_link(5), None);
}

#[test]
fn test_no_match_unbind_keeps_redo_targets() {
    let mut doc = Document::new();
    doc.load("hello world");
    doc.insert(5, "!").unwrap();
    doc.undo().unwrap();
    assert!(doc.can_redo());

    // Unbinding a range with no link is not an edit
    doc.unbind_link(Span::new(0, 3)).unwrap();
    assert!(doc.can_redo());
    doc.redo().unwrap();
    assert_eq!(doc.serialize(), "hello! world");
}

#[test]
fn test_bind_link_rejects_bad_urls() {
    let mut doc = Document::new();
    doc.load("some text");

    for bad in ["", "not a url", "example.com/path"] {
        let err = doc.bind_link(Span::new(0, 4), bad).unwrap_err();
        assert!(matches!(err, EditorError::Validation(_)), "url: {bad:?}");
    }
    assert!(doc.links().is_empty());
    assert!(!doc.can_undo());
}

#[test]
fn test_range_errors_leave_document_unchanged() {
    let mut doc = Document::new();
    doc.load("abc");

    assert!(matches!(
        doc.insert(4, "x").unwrap_err(),
        EditorError::Range { .. }
    ));
    assert!(matches!(
        doc.delete(2, 1).unwrap_err(),
        EditorError::Range { .. }
    ));
    assert!(matches!(
        doc.toggle_style(AnnotationKind::Bold, Span::new(0, 9)).unwrap_err(),
        EditorError::Range { .. }
    ));

    assert_eq!(doc.serialize(), "abc");
    assert_eq!(doc.read(0, 3).unwrap(), "abc");
    assert!(doc.annotations().is_empty());
    assert!(!doc.can_undo());
}

#[test]
fn test_snapshot_serializes_to_json() {
    let mut doc = Document::new();
    doc.load("persist me");
    doc.toggle_style(AnnotationKind::Italic, Span::new(0, 7)).unwrap();

    let snapshot = Snapshot::capture(
        &richtext_core::TextBuffer::from_str(doc.serialize()),
        doc.annotations(),
        doc.links(),
    );
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
}
