//! Collapse of events into entity-equivalent mentions.
//!
//! Downstream consumers sometimes need "the thing this event produces" (or
//! "the thing that causes it") as an entity: a Positive_regulation of ERK
//! phosphorylation collapses to ERK carrying a Phosphorylation PTM. The
//! walk follows `controlled` (output view) or `controller` (input view)
//! through nested complex events. A Negative_ step anywhere on the way marks
//! the resulting PTM as negated.

use std::borrow::Cow;

use layered_bionlp_document::{labels, EventShape, Mention, MentionId, MentionStore, Polarity, Ptm};

use crate::{vocabulary, EventError, EventResult};

/// Pure reader over a [`MentionStore`]; safe to share across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityNormalizer;

impl EntityNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Entity-shaped view of `id`.
    ///
    /// | shape          | result                                          |
    /// |----------------|-------------------------------------------------|
    /// | entity         | the mention itself                              |
    /// | generic event  | the mention itself                              |
    /// | binding        | a Complex relation over the same arguments      |
    /// | simple event   | its theme plus a PTM for the event              |
    /// | complex event  | continue with `controlled` / `controller`       |
    pub fn convert_event_to_entity<'a>(
        &self,
        store: &'a MentionStore,
        id: MentionId,
        as_output: bool,
        negated: bool,
    ) -> EventResult<Cow<'a, Mention>> {
        let mut current = id;
        let mut negated = negated;
        // Each step descends one argument; more steps than mentions is a cycle.
        for _ in 0..=store.len() {
            let mention = store.get(current).ok_or_else(|| EventError::Unnormalizable {
                mention: current,
                label: String::new(),
                reason: "unknown mention".to_string(),
            })?;

            match mention.shape() {
                Some(EventShape::Entity) | Some(EventShape::GenericEvent) => {
                    return Ok(Cow::Borrowed(mention));
                }
                Some(EventShape::Binding) => {
                    let complex = Mention::relation(
                        store.labels_for(labels::COMPLEX),
                        mention.sentence(),
                        mention.tokens(),
                        mention.found_by(),
                    )
                    .with_arguments(mention.arguments().clone())
                    .with_modifications(mention.modifications().clone());
                    return Ok(Cow::Owned(complex));
                }
                Some(EventShape::SimpleEvent) => {
                    return self
                        .entity_with_ptm(store, current, mention, negated)
                        .map(Cow::Owned);
                }
                Some(EventShape::ComplexEvent) => {
                    if mention.polarity() == Some(Polarity::Negative) {
                        negated = true;
                    }
                    let role = if as_output { "controlled" } else { "controller" };
                    current = *mention
                        .argument(role)
                        .first()
                        .ok_or_else(|| unnormalizable(current, mention, &format!("no {}", role)))?;
                }
                None => {
                    return Err(unnormalizable(current, mention, "not a known event shape"));
                }
            }
        }
        Err(EventError::Unnormalizable {
            mention: id,
            label: store.get(id).map(|m| m.label().to_string()).unwrap_or_default(),
            reason: "cyclic arguments".to_string(),
        })
    }

    fn entity_with_ptm(
        &self,
        store: &MentionStore,
        id: MentionId,
        event: &Mention,
        negated: bool,
    ) -> EventResult<Mention> {
        let theme = event
            .argument("theme")
            .first()
            .and_then(|theme| store.get(*theme))
            .ok_or_else(|| unnormalizable(id, event, "simple event without theme"))?;

        let mut ptm = Ptm::new(vocabulary::ptm_kind_for_label(event.label()))
            .with_site(event.argument("site").first().copied())
            .negated(negated);
        if let Some(trigger) = event.trigger() {
            ptm = ptm.with_evidence(trigger);
        }

        let mut entity = theme.clone();
        entity.modifications_mut().replace_ptm(ptm);
        Ok(entity)
    }
}

fn unnormalizable(id: MentionId, mention: &Mention, reason: &str) -> EventError {
    EventError::Unnormalizable {
        mention: id,
        label: mention.label().to_string(),
        reason: reason.to_string(),
    }
}
