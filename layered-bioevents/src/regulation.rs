//! Regulation and activation construction.
//!
//! Candidates come from the rule engine as triggered events carrying
//! `controller` and `controlled`. A candidate survives when:
//!
//! - both roles are filled
//! - the controller and controlled agree on being a BioProcess
//! - after polarity resolution, the two sides ground to disjoint identities
//!
//! Activations are additionally checked against the regulations built in
//! the same pass. Regulation relations emitted by the event splitter are
//! already canonical and pass through untouched.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use layered_bionlp::TokenInterval;
use layered_bionlp_document::{labels, MentionId, MentionKind, MentionStore};

use crate::{EventError, EventResult, PolarityResolver, SyntaxConventions};

const CONTROLLER: &str = "controller";
const CONTROLLED: &str = "controlled";
const DUMMY: &str = "dummy";

#[derive(Debug, Clone, Default)]
pub struct RegulationBuilder {
    polarity: PolarityResolver,
}

impl RegulationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_syntax(syntax: SyntaxConventions) -> Self {
        Self {
            polarity: PolarityResolver::with_syntax(syntax),
        }
    }

    /// Build regulations, then activations, from the triggered candidates
    /// of `active`. Other mentions keep their place ahead of the results.
    pub fn build(
        &self,
        store: &mut MentionStore,
        active: &[MentionId],
    ) -> EventResult<Vec<MentionId>> {
        let mut others = Vec::new();
        let mut regulations = Vec::new();
        let mut activations = Vec::new();
        for &id in active {
            let Some(mention) = store.get(id) else {
                continue;
            };
            let candidate = matches!(mention.kind(), MentionKind::Event { .. });
            if candidate && mention.matches(labels::REGULATION) {
                regulations.push(id);
            } else if candidate && mention.matches(labels::ACTIVATION) {
                activations.push(id);
            } else {
                others.push(id);
            }
        }

        let regulations = self.build_regulation(store, &regulations)?;
        let activations = self.build_activation(store, &activations, &regulations)?;
        others.extend(regulations);
        others.extend(activations);
        Ok(others)
    }

    pub fn build_regulation(
        &self,
        store: &mut MentionStore,
        candidates: &[MentionId],
    ) -> EventResult<Vec<MentionId>> {
        let mut built = Vec::new();
        for &id in candidates {
            if !has_both_roles(store, id) {
                tracing::debug!(mention = %id, "regulation without controller or controlled");
                continue;
            }
            if !is_bioprocess_legal(store, id) {
                tracing::debug!(mention = %id, "illegal BioProcess pairing");
                continue;
            }
            if let Some(id) = self.finish(store, id)? {
                built.push(id);
            }
        }
        Ok(built)
    }

    /// Like [`build_regulation`](Self::build_regulation), plus:
    ///
    /// - event controllers win over entity controllers on the same span
    /// - controller and controlled must not share their first syntactic edge
    /// - the controlled span must not already be regulated by `regulations`
    pub fn build_activation(
        &self,
        store: &mut MentionStore,
        candidates: &[MentionId],
        regulations: &[MentionId],
    ) -> EventResult<Vec<MentionId>> {
        let mut built = Vec::new();
        for id in prefer_event_controllers(store, candidates) {
            if !has_both_roles(store, id) {
                tracing::debug!(mention = %id, "activation without controller or controlled");
                continue;
            }
            if !is_bioprocess_legal(store, id) {
                tracing::debug!(mention = %id, "illegal BioProcess pairing");
                continue;
            }
            if has_syntactic_overlap(store, id) {
                tracing::debug!(mention = %id, "controller and controlled share an attachment");
                continue;
            }
            if let Some(regulation) = overlapping_regulation(store, id, regulations) {
                tracing::debug!(mention = %id, %regulation, "already a regulation");
                continue;
            }
            if let Some(id) = self.finish(store, id)? {
                built.push(id);
            }
        }
        Ok(built)
    }

    /// Polarity, dummy removal and distinctness, shared by both builders.
    fn finish(&self, store: &mut MentionStore, id: MentionId) -> EventResult<Option<MentionId>> {
        let id = self.polarity.resolve(store, id)?;
        let id = without_dummy(store, id);
        if !has_distinct_controller_controlled(store, id)? {
            tracing::debug!(mention = %id, "controller and controlled are the same entity");
            return Ok(None);
        }
        Ok(Some(id))
    }
}

fn has_both_roles(store: &MentionStore, id: MentionId) -> bool {
    store.get(id).map_or(false, |m| {
        !m.argument(CONTROLLER).is_empty() && !m.argument(CONTROLLED).is_empty()
    })
}

/// A BioProcess may only be regulated by a BioProcess, and may only regulate
/// one.
pub fn is_bioprocess_legal(store: &MentionStore, id: MentionId) -> bool {
    let Some(mention) = store.get(id) else {
        return false;
    };
    let is_process = |role: &str| {
        mention
            .argument(role)
            .iter()
            .any(|arg| store.get(*arg).map_or(false, |m| m.matches(labels::BIO_PROCESS)))
    };
    is_process(CONTROLLER) == is_process(CONTROLLED)
}

/// Whether controller and controlled ground to disjoint identifier sets.
/// A side without groundings is trivially distinct.
///
/// Errors when the store has not been through grounding yet.
pub fn has_distinct_controller_controlled(
    store: &MentionStore,
    id: MentionId,
) -> EventResult<bool> {
    if !store.is_grounded() {
        return Err(EventError::Ungrounded { mention: id });
    }
    let Some(mention) = store.get(id) else {
        return Ok(true);
    };
    let controller = grounding_keys(store, mention.argument(CONTROLLER));
    let controlled = grounding_keys(store, mention.argument(CONTROLLED));
    Ok(controller.is_disjoint(&controlled))
}

/// Grounding keys of `roots` and, for events and relations, of their
/// arguments. Sites do not count towards identity.
fn grounding_keys(store: &MentionStore, roots: &[MentionId]) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    let mut seen = HashSet::new();
    let mut stack: Vec<MentionId> = roots.to_vec();
    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        let Some(mention) = store.get(id) else {
            continue;
        };
        if mention.is_text_bound() {
            if let Some(grounding) = mention.grounding() {
                keys.insert(grounding.key());
            }
            continue;
        }
        for (role, arguments) in mention.arguments() {
            if role != "site" {
                stack.extend(arguments.iter().copied());
            }
        }
    }
    keys
}

/// Among candidates over the same span, drop those with only entity
/// controllers when another reading has an event controller.
pub fn prefer_event_controllers(store: &MentionStore, candidates: &[MentionId]) -> Vec<MentionId> {
    let has_event_controller = |id: MentionId| {
        store.get(id).map_or(false, |m| {
            m.argument(CONTROLLER)
                .iter()
                .any(|arg| store.get(*arg).map_or(false, |c| c.matches(labels::EVENT)))
        })
    };

    let mut spans: BTreeMap<(usize, TokenInterval), bool> = BTreeMap::new();
    for &id in candidates {
        if let Some(mention) = store.get(id) {
            let entry = spans.entry((mention.sentence(), mention.tokens())).or_default();
            *entry |= has_event_controller(id);
        }
    }

    candidates
        .iter()
        .copied()
        .filter(|&id| {
            let Some(mention) = store.get(id) else {
                return false;
            };
            let event_reading = spans
                .get(&(mention.sentence(), mention.tokens()))
                .copied()
                .unwrap_or(false);
            let keep = !event_reading || has_event_controller(id);
            if !keep {
                tracing::debug!(mention = %id, "entity controller loses to event controller");
            }
            keep
        })
        .collect()
}

/// Controller and controlled reached through the same first edge from the
/// trigger.
pub fn has_syntactic_overlap(store: &MentionStore, id: MentionId) -> bool {
    let Some(mention) = store.get(id) else {
        return false;
    };
    let first_edges = |role: &str| {
        mention
            .argument(role)
            .iter()
            .filter_map(|arg| mention.path(role, *arg).and_then(|edges| edges.first()))
            .collect::<Vec<_>>()
    };
    let controllers = first_edges(CONTROLLER);
    first_edges(CONTROLLED)
        .into_iter()
        .any(|edge| controllers.contains(&edge))
}

/// A regulation among `regulations` whose controlled span overlaps the
/// controlled span of `id`.
fn overlapping_regulation(
    store: &MentionStore,
    id: MentionId,
    regulations: &[MentionId],
) -> Option<MentionId> {
    let mention = store.get(id)?;
    let spans = |ids: &[MentionId]| {
        ids.iter()
            .filter_map(|arg| store.get(*arg))
            .map(|m| (m.sentence(), m.tokens()))
            .collect::<Vec<_>>()
    };
    let controlled = spans(mention.argument(CONTROLLED));

    regulations.iter().copied().find(|&regulation| {
        store.get(regulation).map_or(false, |r| {
            r.sentence() == mention.sentence()
                && spans(r.argument(CONTROLLED)).iter().any(|(sentence, tokens)| {
                    controlled
                        .iter()
                        .any(|(s, t)| s == sentence && t.overlaps(tokens))
                })
        })
    })
}

/// Rebuild without the rule engine's placeholder argument, if it has one.
fn without_dummy(store: &mut MentionStore, id: MentionId) -> MentionId {
    match store.get(id) {
        Some(mention) if mention.has_argument(DUMMY) => {
            let cleaned = mention.clone().without_argument(DUMMY);
            store.insert(cleaned)
        }
        _ => id,
    }
}
