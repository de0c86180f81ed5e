//! Spell-check pass
//!
//! A pure scan over the buffer text: tokenize on word boundaries, test each
//! token against a dictionary, and report a span for every occurrence of an
//! unknown word. The document writes results back as `Misspelled`
//! annotations, fully replacing the previous set on each rescan.

use crate::text::Span;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Small built-in word set so a fresh document can flag obvious typos
/// without a collaborator-supplied wordlist.
static COMMON_WORDS: Lazy<HashSet<String>> = Lazy::new(|| {
    const WORDS: &[&str] = &[
        "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from",
        "had", "has", "have", "he", "her", "his", "i", "if", "in", "is", "it",
        "its", "me", "my", "no", "not", "of", "on", "or", "our", "she", "so",
        "that", "the", "their", "them", "then", "there", "they", "this", "to",
        "up", "was", "we", "were", "what", "when", "which", "who", "will",
        "with", "you", "your",
    ];
    WORDS.iter().map(|w| w.to_string()).collect()
});

/// Dictionary membership predicate
///
/// Lookup is case-sensitive as typed; collaborators that want
/// case-insensitive matching should seed the dictionary accordingly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Create an empty dictionary (every token is misspelled)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from an iterator of words
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a dictionary from whitespace-separated text (one word per
    /// line or space-separated), the format wordlist files use
    pub fn from_text(text: &str) -> Self {
        Self::from_words(text.split_whitespace())
    }

    /// Dictionary seeded with a small set of common English words
    pub fn common_english() -> Self {
        Self {
            words: COMMON_WORDS.clone(),
        }
    }

    /// Add a word
    pub fn insert(&mut self, word: &str) {
        self.words.insert(word.to_string());
    }

    /// Membership test, case-sensitive as typed
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// One occurrence of a word not found in the dictionary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MisspelledWord {
    pub word: String,
    pub span: Span,
}

/// Scan text for words missing from the dictionary
///
/// Tokens are maximal runs of alphanumeric characters; offsets are
/// character offsets. Deterministic given the same text and dictionary;
/// results are ordered by span start.
pub fn scan(text: &str, dictionary: &Dictionary) -> Vec<MisspelledWord> {
    let mut misspelled = Vec::new();
    let mut token = String::new();
    let mut token_start = 0;

    for (offset, ch) in text.chars().enumerate() {
        if ch.is_alphanumeric() {
            if token.is_empty() {
                token_start = offset;
            }
            token.push(ch);
        } else if !token.is_empty() {
            flush_token(&mut token, token_start, offset, dictionary, &mut misspelled);
        }
    }
    if !token.is_empty() {
        let end = text.chars().count();
        flush_token(&mut token, token_start, end, dictionary, &mut misspelled);
    }
    misspelled
}

fn flush_token(
    token: &mut String,
    start: usize,
    end: usize,
    dictionary: &Dictionary,
    out: &mut Vec<MisspelledWord>,
) {
    if !dictionary.contains(token) {
        out.push(MisspelledWord {
            word: std::mem::take(token),
            span: Span::new(start, end),
        });
    } else {
        token.clear();
    }
}
