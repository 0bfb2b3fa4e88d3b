//! Small-molecule argument validation.
//!
//! A chemical argument is implausible when the syntactic path from the
//! trigger to it runs through a protein: in "A binds B with GTP", GTP
//! belongs to B, not to the binding of A. The exception is a token
//! sandwiched between two prepositional edges, where attachment is
//! ambiguous anyway.

use layered_bionlp_document::{labels, MentionId, MentionStore};

use crate::SyntaxConventions;

#[derive(Debug, Clone, Default)]
pub struct ArgumentValidator {
    syntax: SyntaxConventions,
}

impl ArgumentValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_syntax(syntax: SyntaxConventions) -> Self {
        Self { syntax }
    }

    /// Keep the mentions of `active` that pass [`is_valid`](Self::is_valid).
    pub fn validate(&self, store: &MentionStore, active: &[MentionId]) -> Vec<MentionId> {
        active
            .iter()
            .copied()
            .filter(|id| {
                let valid = self.is_valid(store, *id, active);
                if !valid {
                    tracing::debug!(
                        mention = %id,
                        label = store[*id].label(),
                        "argument blocked by intervening protein"
                    );
                }
                valid
            })
            .collect()
    }

    /// Whether every small-molecule argument of an event is reachable from
    /// the trigger without crossing a protein in `active`.
    ///
    /// Text-bound and relation mentions always pass.
    pub fn is_valid(&self, store: &MentionStore, id: MentionId, active: &[MentionId]) -> bool {
        let Some(mention) = store.get(id) else {
            return false;
        };
        let Some(trigger) = mention.trigger().and_then(|t| store.get(t)) else {
            return true;
        };
        let Some(sentence) = store.sentence(trigger.sentence()) else {
            return true;
        };
        let Some(graph) = sentence.dependencies() else {
            return true;
        };

        for argument in mention.all_arguments() {
            let Some(chemical) = store.get(argument) else {
                continue;
            };
            if !chemical.matches(labels::SIMPLE_CHEMICAL)
                || chemical.sentence() != trigger.sentence()
            {
                continue;
            }

            let path = graph.shortest_path_between(trigger.tokens(), chemical.tokens(), true);
            if path.len() < 3 {
                continue;
            }

            for window in path.windows(3) {
                let (before, token, after) = (window[0], window[1], window[2]);
                let blocked = store
                    .covering(active, trigger.sentence(), token, labels::MACRO_MOLECULE)
                    .any(|blocker| blocker != argument && blocker != id);
                if !blocked {
                    continue;
                }

                let prepositions = |a: usize, b: usize| {
                    graph
                        .edges_between(a, b, true)
                        .into_iter()
                        .any(|relation| self.syntax.is_preposition(relation))
                };
                if !(prepositions(before, token) && prepositions(token, after)) {
                    tracing::trace!(mention = %id, token, ?path, "blocking token");
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layered_bionlp::{DependencyGraph, Sentence, TokenInterval};
    use layered_bionlp_document::{Document, Mention};

    struct Fixture {
        store: MentionStore,
        event: MentionId,
        active: Vec<MentionId>,
    }

    /// "Ras binds Raf with GTP"; the path from "binds" to GTP runs through Raf.
    fn fixture(to_raf: &str, from_raf: &str) -> Fixture {
        let graph = DependencyGraph::from_edges(
            5,
            vec![
                (1, 0, "nsubj"),
                (1, 2, to_raf),
                (2, 3, from_raf),
                (3, 4, "pobj"),
            ],
        )
        .unwrap();
        let sentence =
            Sentence::new(["Ras", "binds", "Raf", "with", "GTP"]).with_dependencies(graph);
        let mut store = MentionStore::new(Document::new(vec![sentence]));

        let protein = store.labels_for(labels::GENE_OR_GENE_PRODUCT);
        let ras = store.insert(Mention::text_bound(
            protein.clone(),
            0,
            TokenInterval::singleton(0),
            "ner",
        ));
        let raf = store.insert(Mention::text_bound(protein, 0, TokenInterval::singleton(2), "ner"));
        let chemical = store.labels_for(labels::SIMPLE_CHEMICAL);
        let gtp = store.insert(Mention::text_bound(chemical, 0, TokenInterval::singleton(4), "ner"));
        let binding = store.labels_for(labels::BINDING);
        let trigger = store.insert(Mention::text_bound(
            binding.clone(),
            0,
            TokenInterval::singleton(1),
            "rule",
        ));
        let event = store.insert(
            Mention::event(binding, 0, TokenInterval::new(0, 5), trigger, "rule")
                .with_argument("theme1", vec![ras])
                .with_argument("theme2", vec![gtp]),
        );

        Fixture {
            store,
            event,
            active: vec![ras, raf, gtp, event],
        }
    }

    #[test]
    fn test_protein_on_path_blocks() {
        let f = fixture("dobj", "nmod");
        let validator = ArgumentValidator::new();
        assert!(!validator.is_valid(&f.store, f.event, &f.active));
        assert_eq!(
            validator.validate(&f.store, &f.active),
            f.active[..3].to_vec()
        );
    }

    #[test]
    fn test_consecutive_prepositions_tolerated() {
        let f = fixture("prep_to", "prep_with");
        assert!(ArgumentValidator::new().is_valid(&f.store, f.event, &f.active));
    }

    #[test]
    fn test_single_preposition_still_blocks() {
        let f = fixture("dobj", "prep_with");
        assert!(!ArgumentValidator::new().is_valid(&f.store, f.event, &f.active));
    }

    #[test]
    fn test_protein_not_active_does_not_block() {
        let f = fixture("dobj", "nmod");
        let active: Vec<_> = f.active.iter().copied().filter(|id| id.index() != 1).collect();
        assert!(ArgumentValidator::new().is_valid(&f.store, f.event, &active));
    }

    #[test]
    fn test_chemical_in_another_sentence_is_never_blocked() {
        // The same blocking parse twice; GTP is taken from the second sentence
        let parse = || {
            let graph = DependencyGraph::from_edges(
                5,
                vec![(1, 0, "nsubj"), (1, 2, "dobj"), (2, 3, "nmod"), (3, 4, "pobj")],
            )
            .unwrap();
            Sentence::new(["Ras", "binds", "Raf", "with", "GTP"]).with_dependencies(graph)
        };
        let mut store = MentionStore::new(Document::new(vec![parse(), parse()]));

        let protein = store.labels_for(labels::GENE_OR_GENE_PRODUCT);
        let ras = store.insert(Mention::text_bound(
            protein.clone(),
            0,
            TokenInterval::singleton(0),
            "ner",
        ));
        let raf = store.insert(Mention::text_bound(protein, 0, TokenInterval::singleton(2), "ner"));
        let chemical = store.labels_for(labels::SIMPLE_CHEMICAL);
        let gtp = store.insert(Mention::text_bound(chemical, 1, TokenInterval::singleton(4), "ner"));
        let binding = store.labels_for(labels::BINDING);
        let trigger = store.insert(Mention::text_bound(
            binding.clone(),
            0,
            TokenInterval::singleton(1),
            "rule",
        ));
        let event = store.insert(
            Mention::event(binding, 0, TokenInterval::new(0, 5), trigger, "rule")
                .with_argument("theme1", vec![ras])
                .with_argument("theme2", vec![gtp]),
        );

        let active = vec![ras, raf, gtp, event];
        assert!(ArgumentValidator::new().is_valid(&store, event, &active));
    }

    #[test]
    fn test_text_bound_passes() {
        let f = fixture("dobj", "nmod");
        assert!(ArgumentValidator::new().is_valid(&f.store, f.active[0], &f.active));
    }
}
