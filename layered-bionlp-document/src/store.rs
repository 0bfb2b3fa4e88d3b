//! Per-document mention arena.
//!
//! Mentions reference each other by [`MentionId`]. The store is append-only
//! for mention structure; the only in-place writes are modification sets and
//! grounding, both of which need `&mut MentionStore`.

use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use layered_bionlp::Sentence;

use crate::{BioTaxonomy, Document, Grounding, Mention, MentionId, Taxonomy};

#[derive(Clone)]
pub struct MentionStore {
    document: Document,
    mentions: Vec<Mention>,
    taxonomy: Arc<dyn Taxonomy>,
    /// Set by the grounding collaborator once identifiers are attached
    grounded: bool,
}

impl fmt::Debug for MentionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MentionStore")
            .field("document", &self.document.id())
            .field("mention_count", &self.mentions.len())
            .field("grounded", &self.grounded)
            .finish()
    }
}

impl MentionStore {
    /// Create an empty store using the built-in [`BioTaxonomy`].
    pub fn new(document: Document) -> Self {
        Self::with_taxonomy(document, Arc::new(BioTaxonomy))
    }

    pub fn with_taxonomy(document: Document, taxonomy: Arc<dyn Taxonomy>) -> Self {
        Self {
            document,
            mentions: Vec::new(),
            taxonomy,
            grounded: false,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn sentence(&self, index: usize) -> Option<&Sentence> {
        self.document.sentence(index)
    }

    pub fn taxonomy(&self) -> &dyn Taxonomy {
        self.taxonomy.as_ref()
    }

    /// Full hypernym chain for a canonical label.
    pub fn labels_for(&self, label: &str) -> Vec<String> {
        self.taxonomy.hypernyms(label)
    }

    /// Append a mention and return its id.
    pub fn insert(&mut self, mention: Mention) -> MentionId {
        let id = MentionId::new(self.mentions.len());
        self.mentions.push(mention);
        id
    }

    pub fn get(&self, id: MentionId) -> Option<&Mention> {
        self.mentions.get(id.index())
    }

    pub fn get_mut(&mut self, id: MentionId) -> Option<&mut Mention> {
        self.mentions.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.mentions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mentions.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = MentionId> {
        (0..self.mentions.len()).map(MentionId::new)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MentionId, &Mention)> {
        self.mentions
            .iter()
            .enumerate()
            .map(|(index, mention)| (MentionId::new(index), mention))
    }

    /// Surface text of a mention.
    pub fn text(&self, id: MentionId) -> String {
        self.get(id)
            .map(|m| self.document.text(m.sentence(), m.tokens()))
            .unwrap_or_default()
    }

    /// Attach a grounding to a mention.
    pub fn set_grounding(&mut self, id: MentionId, grounding: Grounding) {
        if let Some(mention) = self.mentions.get_mut(id.index()) {
            mention.set_grounding(grounding);
        }
    }

    /// Record that the grounding collaborator has finished with this document.
    pub fn mark_grounded(&mut self) {
        self.grounded = true;
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Two mentions denote the same entity when they are the same mention or
    /// both carry equal groundings.
    pub fn same_entity(&self, a: MentionId, b: MentionId) -> bool {
        if a == b {
            return true;
        }
        match (
            self.get(a).and_then(Mention::grounding),
            self.get(b).and_then(Mention::grounding),
        ) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }

    /// Mentions among `candidates` in `sentence` whose span covers `token`
    /// and whose labels include `label`.
    pub fn covering<'a>(
        &'a self,
        candidates: &'a [MentionId],
        sentence: usize,
        token: usize,
        label: &'a str,
    ) -> impl Iterator<Item = MentionId> + 'a {
        candidates.iter().copied().filter(move |id| {
            self.get(*id).map_or(false, |m| {
                m.sentence() == sentence && m.tokens().contains(token) && m.matches(label)
            })
        })
    }
}

impl Index<MentionId> for MentionStore {
    type Output = Mention;

    /// # Panics
    ///
    /// Panics if `id` was not issued by this store.
    fn index(&self, id: MentionId) -> &Mention {
        &self.mentions[id.index()]
    }
}
