//! Decomposition of raw events into canonical shapes.
//!
//! A raw "A phosphorylates B" match carries both `cause` and `theme`. The
//! canonical form is a cause-free Phosphorylation of B wrapped in a
//! Positive_regulation controlled by A. Negations describe the regulation,
//! so they move to the wrapper; every other modification stays put.

use layered_bionlp_document::{labels, Mention, MentionId, MentionKind, MentionStore};

use crate::BindingBuilder;

#[derive(Debug, Clone, Default)]
pub struct EventSplitter {
    bindings: BindingBuilder,
}

impl EventSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the split appropriate to each mention of `active`.
    ///
    /// Split events come before their regulations in the output.
    pub fn split(&self, store: &mut MentionStore, active: &[MentionId]) -> Vec<MentionId> {
        let mut output = Vec::with_capacity(active.len());
        for &id in active {
            let Some(mention) = store.get(id) else {
                continue;
            };
            if matches!(mention.kind(), MentionKind::TextBound) {
                output.push(id);
            } else if mention.matches(labels::BINDING) {
                output.extend(self.bindings.mk_binding(store, id));
            } else if mention.matches(labels::SIMPLE_EVENT) {
                if mention.matches(labels::UBIQUITINATION)
                    && self.bindings.mk_ubiquitination(store, id).is_none()
                {
                    continue;
                }
                if self.is_auto_event(store, id) {
                    output.extend(self.split_auto_event(store, id));
                } else {
                    output.extend(self.split_simple_events(store, id));
                }
            } else {
                output.push(id);
            }
        }
        output
    }

    /// An event whose every cause is the same entity as one of its themes
    /// ("ERK autophosphorylation").
    pub fn is_auto_event(&self, store: &MentionStore, id: MentionId) -> bool {
        let Some(mention) = store.get(id) else {
            return false;
        };
        let causes = mention.argument("cause");
        let themes = mention.argument("theme");
        !causes.is_empty()
            && !themes.is_empty()
            && causes
                .iter()
                .all(|cause| themes.iter().any(|theme| store.same_entity(*cause, *theme)))
    }

    /// Split an auto-event into a theme-only event and a regulation
    /// controlled by the removed cause. Returns `[event, regulation]`.
    pub fn split_auto_event(&self, store: &mut MentionStore, id: MentionId) -> Vec<MentionId> {
        let mention = store[id].clone();
        let causes = mention.argument("cause").to_vec();
        let (negations, others) = mention.modifications().partition_negations();

        let event = store.insert(
            mention
                .clone()
                .without_argument("cause")
                .with_modifications(others),
        );
        let regulation = regulation_of(store, &mention, causes, event).with_modifications(negations);
        let regulation = store.insert(regulation);
        tracing::debug!(mention = %id, %event, %regulation, "split auto-event");
        vec![event, regulation]
    }

    /// One theme-only event per theme, then one regulation per
    /// (event, cause) pair. A cause that is also an argument of the split
    /// event is skipped. Events without causes pass through unchanged.
    pub fn split_simple_events(&self, store: &mut MentionStore, id: MentionId) -> Vec<MentionId> {
        let mention = store[id].clone();
        let causes = mention.argument("cause").to_vec();
        let themes = mention.argument("theme").to_vec();
        if causes.is_empty() || themes.is_empty() {
            return vec![id];
        }
        let (negations, others) = mention.modifications().partition_negations();

        let events: Vec<MentionId> = themes
            .iter()
            .map(|&theme| {
                store.insert(
                    mention
                        .clone()
                        .without_argument("cause")
                        .with_argument("theme", vec![theme])
                        .with_modifications(others.clone()),
                )
            })
            .collect();

        let mut regulations = Vec::new();
        for &event in &events {
            for &cause in &causes {
                if store[event].all_arguments().any(|arg| arg == cause) {
                    tracing::debug!(mention = %id, %cause, "cause is also controlled");
                    continue;
                }
                let regulation = regulation_of(store, &mention, vec![cause], event)
                    .with_modifications(negations.clone());
                regulations.push(store.insert(regulation));
            }
        }

        tracing::debug!(
            mention = %id,
            events = events.len(),
            regulations = regulations.len(),
            "split cause and theme"
        );
        events.into_iter().chain(regulations).collect()
    }
}

/// A Positive_regulation relation over the span of `source`.
fn regulation_of(
    store: &MentionStore,
    source: &Mention,
    controllers: Vec<MentionId>,
    controlled: MentionId,
) -> Mention {
    Mention::relation(
        store.labels_for(labels::POSITIVE_REGULATION),
        source.sentence(),
        source.tokens(),
        source.found_by(),
    )
    .with_argument("controller", controllers)
    .with_argument("controlled", vec![controlled])
}

#[cfg(test)]
mod tests {
    use super::*;
    use layered_bionlp::TokenInterval;
    use layered_bionlp_document::{Document, Grounding, Modification, Ptm, PtmKind};

    fn protein(store: &mut MentionStore, token: usize) -> MentionId {
        let chain = store.labels_for(labels::GENE_OR_GENE_PRODUCT);
        store.insert(Mention::text_bound(chain, 0, TokenInterval::singleton(token), "ner"))
    }

    fn phosphorylation(
        store: &mut MentionStore,
        causes: Vec<MentionId>,
        themes: Vec<MentionId>,
    ) -> MentionId {
        let chain = store.labels_for("Phosphorylation");
        let trigger = store.insert(Mention::text_bound(
            chain.clone(),
            0,
            TokenInterval::singleton(1),
            "rule",
        ));
        store.insert(
            Mention::event(chain, 0, TokenInterval::new(0, 5), trigger, "rule")
                .with_argument("cause", causes)
                .with_argument("theme", themes)
                .with_modification(Modification::Negation { evidence: None })
                .with_modification(Modification::Ptm(Ptm::new(PtmKind::Acetylation))),
        )
    }

    #[test]
    fn test_general_split() {
        let mut store = MentionStore::new(Document::from_text("MEK phosphorylates ERK1 and ERK2"));
        let mek = protein(&mut store, 0);
        let erk1 = protein(&mut store, 2);
        let erk2 = protein(&mut store, 4);
        let event = phosphorylation(&mut store, vec![mek], vec![erk1, erk2]);

        let splitter = EventSplitter::new();
        assert!(!splitter.is_auto_event(&store, event));
        let output = splitter.split(&mut store, &[event]);

        assert_eq!(output.len(), 4);
        let (events, regulations) = output.split_at(2);
        assert_eq!(store[events[0]].argument("theme"), &[erk1]);
        assert_eq!(store[events[1]].argument("theme"), &[erk2]);
        for (regulation, event) in regulations.iter().zip(events) {
            let regulation = &store[*regulation];
            assert_eq!(regulation.label(), labels::POSITIVE_REGULATION);
            assert_eq!(regulation.argument("controller"), &[mek]);
            assert_eq!(regulation.argument("controlled"), &[*event]);
            assert!(regulation.modifications().has_negation());
        }
        for event in events {
            assert!(!store[*event].has_argument("cause"));
            assert!(!store[*event].modifications().has_negation());
            assert_eq!(store[*event].modifications().ptms().count(), 1);
        }
    }

    #[test]
    fn test_cause_among_themes_is_not_a_controller() {
        let mut store = MentionStore::new(Document::from_text("MEK phosphorylates MEK and ERK"));
        let mek = protein(&mut store, 0);
        let erk = protein(&mut store, 4);
        let event = phosphorylation(&mut store, vec![mek, erk], vec![mek, erk]);
        let output = EventSplitter::new().split_simple_events(&mut store, event);

        // two events, each regulated only by the other protein
        assert_eq!(output.len(), 4);
        assert_eq!(store[output[2]].argument("controller"), &[erk]);
        assert_eq!(store[output[3]].argument("controller"), &[mek]);
    }

    #[test]
    fn test_auto_event_needs_grounded_identity() {
        let mut store = MentionStore::new(Document::from_text("ERK autophosphorylates its ERK"));
        let erk = protein(&mut store, 0);
        let its = protein(&mut store, 4);
        let event = phosphorylation(&mut store, vec![erk], vec![its]);
        let splitter = EventSplitter::new();
        assert!(!splitter.is_auto_event(&store, event));

        store.set_grounding(erk, Grounding::new("uniprot", "P28482"));
        store.set_grounding(its, Grounding::new("uniprot", "P28482"));
        assert!(splitter.is_auto_event(&store, event));
    }

    #[test]
    fn test_event_without_cause_passes_through() {
        let mut store = MentionStore::new(Document::from_text("ERK phosphorylation"));
        let erk = protein(&mut store, 0);
        let event = phosphorylation(&mut store, vec![], vec![erk]);
        assert_eq!(EventSplitter::new().split(&mut store, &[erk, event]), vec![erk, event]);
    }
}
