//! Negation and hedging detection on event triggers.
//!
//! Runs as plan-then-apply: [`ModalityDetector::plan`] reads the store and
//! proposes cues, [`ModalityDetector::apply`] inserts cue mentions and
//! attaches the modifications.

use layered_bionlp::TokenInterval;
use layered_bionlp_document::{labels, Mention, MentionId, MentionStore, Modification};

use crate::{vocabulary, SyntaxConventions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalityKind {
    Negation,
    Hypothesis,
}

/// A cue token proposed for an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalityCue {
    pub event: MentionId,
    pub kind: ModalityKind,
    pub sentence: usize,
    pub token: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ModalityDetector {
    syntax: SyntaxConventions,
}

impl ModalityDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_syntax(syntax: SyntaxConventions) -> Self {
        Self { syntax }
    }

    /// Detect and attach modality for every triggered event in `active`.
    /// Returns the number of modifications attached.
    pub fn detect(&self, store: &mut MentionStore, active: &[MentionId]) -> usize {
        let cues = self.plan(store, active);
        Self::apply(store, cues)
    }

    /// At most one cue of each kind per event: the first in token order.
    pub fn plan(&self, store: &MentionStore, active: &[MentionId]) -> Vec<ModalityCue> {
        let mut cues = Vec::new();
        for &id in active {
            let Some(trigger) = store
                .get(id)
                .and_then(|m| m.trigger())
                .and_then(|t| store.get(t))
            else {
                continue;
            };
            let sentence_idx = trigger.sentence();
            let Some(sentence) = store.sentence(sentence_idx) else {
                continue;
            };
            let Some(graph) = sentence.dependencies() else {
                continue;
            };

            let mut negation = None;
            let mut hypothesis = None;
            for token in trigger.tokens().tokens() {
                for (dependent, relation) in graph.outgoing_edges(token) {
                    let lemma = sentence.lemma(*dependent).unwrap_or_default();
                    if *relation == self.syntax.negation_relation
                        || vocabulary::is_negation_word(lemma)
                    {
                        negation = earliest(negation, *dependent);
                    }
                    if vocabulary::is_hedge_word(lemma) {
                        hypothesis = earliest(hypothesis, *dependent);
                    }
                }
                for (head, _) in graph.incoming_edges(token) {
                    let lemma = sentence.lemma(*head).unwrap_or_default();
                    if vocabulary::is_hedge_word(lemma) {
                        hypothesis = earliest(hypothesis, *head);
                    }
                }
            }

            let found = [
                (ModalityKind::Negation, negation),
                (ModalityKind::Hypothesis, hypothesis),
            ];
            for (kind, token) in found {
                if let Some(token) = token {
                    tracing::trace!(event = %id, ?kind, token, "modality cue");
                    cues.push(ModalityCue {
                        event: id,
                        kind,
                        sentence: sentence_idx,
                        token,
                    });
                }
            }
        }
        cues
    }

    pub fn apply(store: &mut MentionStore, cues: Vec<ModalityCue>) -> usize {
        let mut attached = 0;
        for cue in cues {
            let label = match cue.kind {
                ModalityKind::Negation => labels::NEGATION_CUE,
                ModalityKind::Hypothesis => labels::HYPOTHESIS_CUE,
            };
            let chain = store.labels_for(label);
            let evidence = store.insert(Mention::text_bound(
                chain,
                cue.sentence,
                TokenInterval::singleton(cue.token),
                "modality",
            ));
            let modification = match cue.kind {
                ModalityKind::Negation => Modification::Negation {
                    evidence: Some(evidence),
                },
                ModalityKind::Hypothesis => Modification::Hypothesis {
                    evidence: Some(evidence),
                },
            };
            if let Some(event) = store.get_mut(cue.event) {
                if event.modifications_mut().insert(modification) {
                    attached += 1;
                }
            }
        }
        attached
    }
}

fn earliest(current: Option<usize>, token: usize) -> Option<usize> {
    Some(current.map_or(token, |c| c.min(token)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use layered_bionlp::{DependencyGraph, Sentence};
    use layered_bionlp_document::Document;

    fn event_store(
        words: &[&str],
        edges: Vec<(usize, usize, &str)>,
        trigger: usize,
    ) -> (MentionStore, MentionId) {
        let graph = DependencyGraph::from_edges(words.len(), edges).unwrap();
        let sentence = Sentence::new(words.iter().copied()).with_dependencies(graph);
        let mut store = MentionStore::new(Document::new(vec![sentence]));

        let protein = store.labels_for(labels::GENE_OR_GENE_PRODUCT);
        let theme = store.insert(Mention::text_bound(
            protein,
            0,
            TokenInterval::singleton(words.len() - 1),
            "ner",
        ));
        let chain = store.labels_for("Phosphorylation");
        let trigger = store.insert(Mention::text_bound(
            chain.clone(),
            0,
            TokenInterval::singleton(trigger),
            "rule",
        ));
        let event = store.insert(
            Mention::event(chain, 0, TokenInterval::new(0, words.len()), trigger, "rule")
                .with_argument("theme", vec![theme]),
        );
        (store, event)
    }

    #[test]
    fn test_negation_edge() {
        let (mut store, event) = event_store(
            &["MEK", "does", "not", "phosphorylate", "ERK"],
            vec![(3, 0, "nsubj"), (3, 1, "aux"), (3, 2, "neg"), (3, 4, "dobj")],
            3,
        );

        assert_eq!(ModalityDetector::new().detect(&mut store, &[event]), 1);

        let modifications = store[event].modifications();
        assert!(modifications.has_negation());
        let evidence = modifications
            .iter()
            .find_map(|m| match m {
                Modification::Negation { evidence } => *evidence,
                _ => None,
            })
            .unwrap();
        assert_eq!(store.text(evidence), "not");
        assert_eq!(store[evidence].label(), labels::NEGATION_CUE);
    }

    #[test]
    fn test_hedge_governs_trigger() {
        // "MEK may phosphorylate ERK" with the modal as head
        let (mut store, event) = event_store(
            &["MEK", "may", "phosphorylate", "ERK"],
            vec![(1, 2, "xcomp"), (2, 0, "nsubj"), (2, 3, "dobj")],
            2,
        );

        let cues = ModalityDetector::new().plan(&store, &[event]);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].kind, ModalityKind::Hypothesis);
        assert_eq!(cues[0].token, 1);

        ModalityDetector::apply(&mut store, cues);
        assert!(!store[event].modifications().has_negation());
        assert_eq!(store[event].modifications().len(), 1);
    }

    #[test]
    fn test_plain_event_has_no_modality() {
        let (store, event) = event_store(
            &["MEK", "phosphorylates", "ERK"],
            vec![(1, 0, "nsubj"), (1, 2, "dobj")],
            1,
        );
        assert!(ModalityDetector::new().plan(&store, &[event]).is_empty());
    }
}
