//! PTM, EventSite and Mutant attachment actions.
//!
//! These actions never emit mentions. Each consumed relation is turned into
//! modifications on its entities, and later stages see those entities with
//! the new modifications. The work is split into [`AttachmentStore::plan`]
//! over `&MentionStore` and [`AttachmentStore::apply`] over
//! `&mut MentionStore`; run later stages only after `apply` returns.

use layered_bionlp_document::{labels, MentionId, MentionStore, Modification, Ptm};

use crate::vocabulary;

/// A modification proposed for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub target: MentionId,
    pub modification: Modification,
}

#[derive(Debug, Clone, Default)]
pub struct AttachmentStore;

impl AttachmentStore {
    pub fn new() -> Self {
        Self
    }

    /// Attach every PTM/EventSite/Mutant relation in `active` and return the
    /// remaining mentions; the consumed relations are not re-emitted.
    pub fn run(&self, store: &mut MentionStore, active: &[MentionId]) -> Vec<MentionId> {
        let (attachments, remaining) = self.plan(store, active);
        Self::apply(store, attachments);
        remaining
    }

    /// Proposed attachments plus the mentions that are not attachment
    /// relations.
    pub fn plan(
        &self,
        store: &MentionStore,
        active: &[MentionId],
    ) -> (Vec<Attachment>, Vec<MentionId>) {
        let mut attachments = Vec::new();
        let mut remaining = Vec::new();
        for &id in active {
            let Some(mention) = store.get(id) else {
                continue;
            };
            if mention.is_text_bound() {
                remaining.push(id);
            } else if mention.matches(labels::PTM) {
                attachments.extend(store_ptm(store, id));
            } else if mention.matches(labels::EVENT_SITE) {
                attachments.extend(store_event_site(store, id));
            } else if mention.matches(labels::MUTANT) {
                attachments.extend(store_mutants(store, id));
            } else {
                remaining.push(id);
            }
        }
        (attachments, remaining)
    }

    /// Commit proposed attachments. Returns how many changed a set.
    pub fn apply(store: &mut MentionStore, attachments: Vec<Attachment>) -> usize {
        let mut changed = 0;
        for Attachment {
            target,
            modification,
        } in attachments
        {
            if let Some(entity) = store.get_mut(target) {
                if entity.modifications_mut().insert(modification) {
                    changed += 1;
                }
            }
        }
        changed
    }
}

/// PTM relation (`entity`, `mod`, optional `site`) to an unnegated PTM on
/// each entity. Nothing is attached when the `mod` text names no known
/// modification.
pub fn store_ptm(store: &MentionStore, id: MentionId) -> Vec<Attachment> {
    let Some(mention) = store.get(id) else {
        return Vec::new();
    };
    let Some(&evidence) = mention.argument("mod").first() else {
        tracing::debug!(mention = %id, "PTM relation without mod argument");
        return Vec::new();
    };
    let text = store.text(evidence);
    let Some(kind) = vocabulary::ptm_kind_from_text(&text) else {
        tracing::debug!(mention = %id, text = %text, "unknown modification");
        return Vec::new();
    };
    let site = mention.argument("site").first().copied();

    mention
        .argument("entity")
        .iter()
        .map(|&target| Attachment {
            target,
            modification: Modification::Ptm(
                Ptm::new(kind.clone()).with_evidence(evidence).with_site(site),
            ),
        })
        .collect()
}

/// EventSite relation (`entity`, `site`) to one EventSite per entity and site.
pub fn store_event_site(store: &MentionStore, id: MentionId) -> Vec<Attachment> {
    let Some(mention) = store.get(id) else {
        return Vec::new();
    };
    let sites = mention.argument("site");
    mention
        .argument("entity")
        .iter()
        .flat_map(|&target| {
            sites.iter().map(move |&site| Attachment {
                target,
                modification: Modification::EventSite { site },
            })
        })
        .collect()
}

/// Mutant relation (`entity`, `mutant`) to a Mutant on each entity.
pub fn store_mutants(store: &MentionStore, id: MentionId) -> Vec<Attachment> {
    let Some(mention) = store.get(id) else {
        return Vec::new();
    };
    let found_by = mention.found_by();
    mention
        .argument("entity")
        .iter()
        .flat_map(|&target| {
            mention
                .argument("mutant")
                .iter()
                .map(move |&evidence| Attachment {
                    target,
                    modification: Modification::Mutant {
                        evidence,
                        found_by: found_by.to_string(),
                    },
                })
        })
        .collect()
}
