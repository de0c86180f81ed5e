//! Hyperlink registry
//!
//! Maps link-annotated spans to target URLs. The registry is kept in
//! lockstep with the `Link` annotations by the document: binding creates
//! both, unbinding removes both, and edits shift both, so an entry never
//! exists without its annotation.

use crate::errors::EditorError;
use crate::text::Span;
use serde::{Deserialize, Serialize};

/// One bound hyperlink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    pub span: Span,
    pub url: String,
}

/// Span-to-URL table for the document's hyperlinks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkRegistry {
    entries: Vec<LinkEntry>,
}

impl LinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a URL for a span. Entries overlapping the span are
    /// replaced, mirroring the exclusive-kind policy for `Link`
    /// annotations. The URL must already be validated.
    pub fn bind(&mut self, span: Span, url: String) {
        self.entries.retain(|e| !e.span.overlaps(span));
        self.entries.push(LinkEntry { span, url });
        self.entries.sort_by_key(|e| (e.span.start, e.span.end));
    }

    /// URL at a character offset, innermost (shortest) span winning
    pub fn resolve(&self, offset: usize) -> Option<&str> {
        self.entries
            .iter()
            .filter(|e| e.span.contains(offset))
            .min_by_key(|e| e.span.len())
            .map(|e| e.url.as_str())
    }

    /// Remove every entry overlapping a span
    ///
    /// Returns the number of entries removed.
    pub fn unbind(&mut self, span: Span) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !e.span.overlaps(span));
        before - self.entries.len()
    }

    pub fn entries(&self) -> &[LinkEntry] {
        self.entries.as_slice()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Called after text is inserted at `offset`; mirrors the annotation
    /// shifting rules so spans stay aligned with the `Link` annotations
    pub fn on_insert(&mut self, offset: usize, inserted: usize) {
        for entry in &mut self.entries {
            if entry.span.start >= offset {
                entry.span.start += inserted;
                entry.span.end += inserted;
            } else if entry.span.end > offset {
                entry.span.end += inserted;
            }
        }
    }

    /// Called after the characters in `[start, end)` are deleted
    pub fn on_delete(&mut self, start: usize, end: usize) {
        let deleted = end - start;
        self.entries.retain_mut(|entry| {
            entry.span.start = clip(entry.span.start, start, end, deleted);
            entry.span.end = clip(entry.span.end, start, end, deleted);
            entry.span.start < entry.span.end
        });
    }
}

fn clip(offset: usize, start: usize, end: usize, deleted: usize) -> usize {
    if offset >= end {
        offset - deleted
    } else if offset >= start {
        start
    } else {
        offset
    }
}

/// Validate a link target: non-empty and an absolute URL with a scheme
/// per RFC 3986 (`ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"`)
pub fn validate_url(url: &str) -> Result<(), EditorError> {
    if url.is_empty() {
        return Err(EditorError::Validation("empty URL".to_string()));
    }
    let Some((scheme, rest)) = url.split_once(':') else {
        return Err(EditorError::Validation(format!(
            "URL has no scheme: {url}"
        )));
    };
    let mut chars = scheme.chars();
    let valid_scheme = chars
        .next()
        .map(|c| c.is_ascii_alphabetic())
        .unwrap_or(false)
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid_scheme || rest.is_empty() {
        return Err(EditorError::Validation(format!("malformed URL: {url}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_and_resolve() {
        let mut registry = LinkRegistry::new();
        registry.bind(Span::new(0, 4), "https://example.com".to_string());

        assert_eq!(registry.resolve(2), Some("https://example.com"));
        assert_eq!(registry.resolve(4), None);
    }

    #[test]
    fn test_unbind_removes_entry() {
        let mut registry = LinkRegistry::new();
        registry.bind(Span::new(0, 4), "https://example.com".to_string());
        assert_eq!(registry.unbind(Span::new(0, 4)), 1);

        assert_eq!(registry.resolve(2), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unbind_reports_no_match() {
        let mut registry = LinkRegistry::new();
        registry.bind(Span::new(0, 4), "https://example.com".to_string());

        assert_eq!(registry.unbind(Span::new(6, 9)), 0);
        assert_eq!(registry.entries().len(), 1);
    }

    #[test]
    fn test_bind_replaces_overlapping_entry() {
        let mut registry = LinkRegistry::new();
        registry.bind(Span::new(0, 6), "https://a.example".to_string());
        registry.bind(Span::new(4, 8), "https://b.example".to_string());

        assert_eq!(registry.entries().len(), 1);
        assert_eq!(registry.resolve(5), Some("https://b.example"));
        assert_eq!(registry.resolve(1), None);
    }

    #[test]
    fn test_resolve_innermost_wins() {
        let mut registry = LinkRegistry::new();
        // Overlap should not occur under correct usage; shortest span wins
        registry.entries.push(LinkEntry {
            span: Span::new(0, 10),
            url: "https://outer.example".to_string(),
        });
        registry.entries.push(LinkEntry {
            span: Span::new(2, 5),
            url: "https://inner.example".to_string(),
        });

        assert_eq!(registry.resolve(3), Some("https://inner.example"));
    }

    #[test]
    fn test_edit_tracking_shifts_entries() {
        let mut registry = LinkRegistry::new();
        registry.bind(Span::new(5, 9), "https://example.com".to_string());

        registry.on_insert(0, 2);
        assert_eq!(registry.entries()[0].span, Span::new(7, 11));

        registry.on_delete(0, 2);
        assert_eq!(registry.entries()[0].span, Span::new(5, 9));

        registry.on_delete(4, 10);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("mailto:someone@example.com").is_ok());
        assert!(validate_url("").is_err());
        assert!(validate_url("example.com/path").is_err());
        assert!(validate_url("no scheme here").is_err());
        assert!(validate_url("1http://bad.scheme").is_err());
        assert!(validate_url("https:").is_err());
    }
}
