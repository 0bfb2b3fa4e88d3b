//! Mentions: typed spans produced by the rule engine or by the event layers.
//!
//! A mention is immutable once inserted into a [`MentionStore`](crate::MentionStore)
//! except for its [`ModificationSet`]. Structural changes (new labels, fewer
//! arguments) are expressed by cloning, adjusting with the `with_*` /
//! `without_*` builders and inserting the result as a new mention.

use std::collections::BTreeMap;
use std::fmt;

use layered_bionlp::TokenInterval;
use serde::{Deserialize, Serialize};

use crate::taxonomy::labels;
use crate::{Modification, ModificationSet};

/// Index of a mention inside its document's [`MentionStore`](crate::MentionStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MentionId(usize);

impl MentionId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for MentionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

/// Role name (e.g. "theme", "controller") to argument mentions.
pub type Arguments = BTreeMap<String, Vec<MentionId>>;

/// One dependency edge of a rule's syntactic path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyntacticEdge {
    pub head: usize,
    pub dependent: usize,
    pub relation: String,
}

impl SyntacticEdge {
    pub fn new(head: usize, dependent: usize, relation: impl Into<String>) -> Self {
        Self {
            head,
            dependent,
            relation: relation.into(),
        }
    }
}

/// Role -> argument -> path from the trigger to that argument.
pub type ArgumentPaths = BTreeMap<String, BTreeMap<MentionId, Vec<SyntacticEdge>>>;

/// Canonical identifier assigned by the grounding collaborator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Grounding {
    pub namespace: String,
    pub id: String,
}

impl Grounding {
    pub fn new(namespace: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            id: id.into(),
        }
    }

    /// `namespace:id`
    pub fn key(&self) -> String {
        format!("{}:{}", self.namespace, self.id)
    }
}

/// Structural variant of a mention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MentionKind {
    /// Plain token span: entities, sites, triggers, cues
    TextBound,
    /// Triggered event; the trigger is a `TextBound` mention
    Event { trigger: MentionId },
    /// Derived relation with no trigger (Regulation, Complex, PTM, ...)
    Relation,
}

/// Polarity carried by the head label of a complex event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Positive,
    Negative,
}

pub const POSITIVE_PREFIX: &str = "Positive_";
pub const NEGATIVE_PREFIX: &str = "Negative_";

/// The five shapes the entity normalizer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventShape {
    Entity,
    GenericEvent,
    Binding,
    SimpleEvent,
    ComplexEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mention {
    labels: Vec<String>,
    sentence: usize,
    tokens: TokenInterval,
    found_by: String,
    kind: MentionKind,
    arguments: Arguments,
    paths: ArgumentPaths,
    grounding: Option<Grounding>,
    modifications: ModificationSet,
}

impl Mention {
    /// # Panics
    ///
    /// Panics if `labels` is empty; every mention has a head label.
    pub fn new<I, S>(
        kind: MentionKind,
        labels: I,
        sentence: usize,
        tokens: TokenInterval,
        found_by: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        assert!(!labels.is_empty(), "a mention needs at least one label");
        Self {
            labels,
            sentence,
            tokens,
            found_by: found_by.into(),
            kind,
            arguments: Arguments::new(),
            paths: ArgumentPaths::new(),
            grounding: None,
            modifications: ModificationSet::new(),
        }
    }

    pub fn text_bound<I, S>(
        labels: I,
        sentence: usize,
        tokens: TokenInterval,
        found_by: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(MentionKind::TextBound, labels, sentence, tokens, found_by)
    }

    pub fn event<I, S>(
        labels: I,
        sentence: usize,
        tokens: TokenInterval,
        trigger: MentionId,
        found_by: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(MentionKind::Event { trigger }, labels, sentence, tokens, found_by)
    }

    pub fn relation<I, S>(
        labels: I,
        sentence: usize,
        tokens: TokenInterval,
        found_by: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(MentionKind::Relation, labels, sentence, tokens, found_by)
    }

    pub fn with_argument(mut self, role: impl Into<String>, arguments: Vec<MentionId>) -> Self {
        self.arguments.insert(role.into(), arguments);
        self
    }

    pub fn with_arguments(mut self, arguments: Arguments) -> Self {
        self.arguments = arguments;
        self
    }

    /// Drop a role together with its syntactic paths.
    pub fn without_argument(mut self, role: &str) -> Self {
        self.arguments.remove(role);
        self.paths.remove(role);
        self
    }

    pub fn with_path(
        mut self,
        role: impl Into<String>,
        argument: MentionId,
        edges: Vec<SyntacticEdge>,
    ) -> Self {
        self.paths.entry(role.into()).or_default().insert(argument, edges);
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if !labels.is_empty() {
            self.labels = labels;
        }
        self
    }

    pub fn with_kind(mut self, kind: MentionKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_tokens(mut self, tokens: TokenInterval) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn with_found_by(mut self, found_by: impl Into<String>) -> Self {
        self.found_by = found_by.into();
        self
    }

    pub fn with_grounding(mut self, grounding: Grounding) -> Self {
        self.grounding = Some(grounding);
        self
    }

    pub fn with_modification(mut self, modification: Modification) -> Self {
        self.modifications.insert(modification);
        self
    }

    pub fn with_modifications(mut self, modifications: ModificationSet) -> Self {
        self.modifications = modifications;
        self
    }

    /// Head (most specific) label.
    pub fn label(&self) -> &str {
        &self.labels[0]
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns true if `label` is anywhere in the hypernym chain.
    pub fn matches(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn sentence(&self) -> usize {
        self.sentence
    }

    pub fn tokens(&self) -> TokenInterval {
        self.tokens
    }

    pub fn found_by(&self) -> &str {
        &self.found_by
    }

    pub fn kind(&self) -> &MentionKind {
        &self.kind
    }

    pub fn trigger(&self) -> Option<MentionId> {
        match self.kind {
            MentionKind::Event { trigger } => Some(trigger),
            _ => None,
        }
    }

    pub fn is_text_bound(&self) -> bool {
        matches!(self.kind, MentionKind::TextBound)
    }

    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    /// Arguments filling `role`; empty when the role is absent.
    pub fn argument(&self, role: &str) -> &[MentionId] {
        self.arguments.get(role).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_argument(&self, role: &str) -> bool {
        self.arguments.contains_key(role)
    }

    /// All argument mentions across roles, in role order.
    pub fn all_arguments(&self) -> impl Iterator<Item = MentionId> + '_ {
        self.arguments.values().flatten().copied()
    }

    pub fn paths(&self) -> &ArgumentPaths {
        &self.paths
    }

    pub fn path(&self, role: &str, argument: MentionId) -> Option<&[SyntacticEdge]> {
        self.paths
            .get(role)
            .and_then(|paths| paths.get(&argument))
            .map(Vec::as_slice)
    }

    pub fn grounding(&self) -> Option<&Grounding> {
        self.grounding.as_ref()
    }

    pub(crate) fn set_grounding(&mut self, grounding: Grounding) {
        self.grounding = Some(grounding);
    }

    pub fn modifications(&self) -> &ModificationSet {
        &self.modifications
    }

    pub fn modifications_mut(&mut self) -> &mut ModificationSet {
        &mut self.modifications
    }

    /// Polarity of the head label, if it carries a polarity prefix.
    pub fn polarity(&self) -> Option<Polarity> {
        let label = self.label();
        if label.starts_with(POSITIVE_PREFIX) {
            Some(Polarity::Positive)
        } else if label.starts_with(NEGATIVE_PREFIX) {
            Some(Polarity::Negative)
        } else {
            None
        }
    }

    /// Classify into one of the five normalizer shapes. `None` for an
    /// event-labeled mention that fits none of them.
    pub fn shape(&self) -> Option<EventShape> {
        if self.matches(labels::GENERIC_EVENT) {
            Some(EventShape::GenericEvent)
        } else if self.matches(labels::BINDING) {
            Some(EventShape::Binding)
        } else if self.matches(labels::SIMPLE_EVENT) {
            Some(EventShape::SimpleEvent)
        } else if self.matches(labels::COMPLEX_EVENT) {
            Some(EventShape::ComplexEvent)
        } else if self.matches(labels::EVENT) {
            None
        } else {
            Some(EventShape::Entity)
        }
    }
}
