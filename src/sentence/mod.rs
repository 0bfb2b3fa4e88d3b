//! Tokenized, tagged and parsed sentences.
//!
//! Sentences are produced by external tooling and are read-only to the event
//! layers. Token positions are 0-based indexes into [`Sentence::words`].

pub(crate) mod dependency;

use serde::{Deserialize, Serialize};

use self::dependency::DependencyGraph;

/// A half-open token interval `[start, end)` within one sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenInterval {
    start: usize,
    end: usize,
}

impl TokenInterval {
    /// Create an interval. `end` is exclusive; an inverted pair is normalized.
    pub fn new(start: usize, end: usize) -> Self {
        if end < start {
            Self { start: end, end: start }
        } else {
            Self { start, end }
        }
    }

    /// Interval covering exactly one token.
    pub fn singleton(token: usize) -> Self {
        Self {
            start: token,
            end: token + 1,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, token: usize) -> bool {
        self.start <= token && token < self.end
    }

    /// Returns true if both intervals share at least one token.
    pub fn overlaps(&self, other: &TokenInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Smallest interval covering both.
    pub fn cover(&self, other: &TokenInterval) -> TokenInterval {
        TokenInterval {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Iterate over the token indexes of this interval.
    pub fn tokens(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// One sentence with its token-level annotations.
///
/// Lemmas default to the lowercased words when the tagger did not provide
/// them. The dependency graph is optional: queries against a sentence without
/// a graph behave as if no path exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    words: Vec<String>,
    lemmas: Vec<String>,
    tags: Vec<String>,
    dependencies: Option<DependencyGraph>,
}

impl Sentence {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        let lemmas = words.iter().map(|w| w.to_lowercase()).collect();
        Self {
            words,
            lemmas,
            tags: Vec::new(),
            dependencies: None,
        }
    }

    pub fn with_lemmas<I, S>(mut self, lemmas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lemmas = lemmas.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_dependencies(mut self, graph: DependencyGraph) -> Self {
        self.dependencies = Some(graph);
        self
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn lemmas(&self) -> &[String] {
        &self.lemmas
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn word(&self, token: usize) -> Option<&str> {
        self.words.get(token).map(String::as_str)
    }

    pub fn lemma(&self, token: usize) -> Option<&str> {
        self.lemmas.get(token).map(String::as_str)
    }

    pub fn tag(&self, token: usize) -> Option<&str> {
        self.tags.get(token).map(String::as_str)
    }

    pub fn dependencies(&self) -> Option<&DependencyGraph> {
        self.dependencies.as_ref()
    }

    /// Surface text of an interval, words joined by single spaces.
    ///
    /// Tokens past the end of the sentence are ignored.
    pub fn text(&self, interval: TokenInterval) -> String {
        let end = interval.end().min(self.words.len());
        let start = interval.start().min(end);
        self.words[start..end].join(" ")
    }
}
