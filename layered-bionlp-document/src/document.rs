//! Document-level abstractions for multi-sentence processing.
//!
//! The core `layered-bionlp` library operates on single sentences. This
//! module provides [`Document`], which owns the ordered sentences that
//! mentions point into via their sentence index.

use layered_bionlp::{Sentence, TokenInterval};
use serde::{Deserialize, Serialize};

/// A document composed of parsed sentences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: Option<String>,
    sentences: Vec<Sentence>,
}

impl Document {
    pub fn new(sentences: Vec<Sentence>) -> Self {
        Self {
            id: None,
            sentences,
        }
    }

    /// Create a document from raw text, one sentence per non-empty line,
    /// tokens split on whitespace.
    ///
    /// Meant for tests and fixtures; real input comes pre-tokenized and
    /// parsed from upstream tooling.
    pub fn from_text(text: &str) -> Self {
        let sentences = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| Sentence::new(line.split_whitespace()))
            .collect();
        Self::new(sentences)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn sentence(&self, index: usize) -> Option<&Sentence> {
        self.sentences.get(index)
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Surface text of a span; empty when the sentence does not exist.
    pub fn text(&self, sentence: usize, tokens: TokenInterval) -> String {
        self.sentence(sentence)
            .map(|s| s.text(tokens))
            .unwrap_or_default()
    }
}
