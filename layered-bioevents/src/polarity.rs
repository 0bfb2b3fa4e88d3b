//! Polarity resolution for regulations and activations.
//!
//! Each semantic-negative lemma between a trigger and its arguments reverses
//! the sense of the event once: "decreased X increases Y" is a negative
//! regulation of Y even though the trigger reads positive.

use std::collections::BTreeSet;

use layered_bionlp_document::{
    labels, Mention, MentionId, MentionKind, MentionStore, NEGATIVE_PREFIX, POSITIVE_PREFIX,
};

use crate::{vocabulary, EventError, EventResult, SyntaxConventions};

/// Swap the `Positive_` / `Negative_` prefix of a label.
pub fn flip_label(label: &str) -> EventResult<String> {
    if let Some(rest) = label.strip_prefix(POSITIVE_PREFIX) {
        Ok(format!("{}{}", NEGATIVE_PREFIX, rest))
    } else if let Some(rest) = label.strip_prefix(NEGATIVE_PREFIX) {
        Ok(format!("{}{}", POSITIVE_PREFIX, rest))
    } else {
        Err(EventError::MalformedLabel {
            label: label.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct PolarityResolver {
    syntax: SyntaxConventions,
}

impl PolarityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_syntax(syntax: SyntaxConventions) -> Self {
        Self { syntax }
    }

    /// Number of semantic-negative tokens between the trigger of `id` and
    /// its arguments, summed over arguments.
    ///
    /// Zero for mentions without a trigger, for arguments in another
    /// sentence and for sentences without a dependency graph.
    pub fn negative_count(&self, store: &MentionStore, id: MentionId) -> usize {
        let Some(mention) = store.get(id) else {
            return 0;
        };
        let Some(trigger) = mention.trigger().and_then(|t| store.get(t)) else {
            return 0;
        };
        let Some(sentence) = store.sentence(trigger.sentence()) else {
            return 0;
        };
        let Some(graph) = sentence.dependencies() else {
            return 0;
        };

        let mut total = 0;
        for argument in mention.all_arguments() {
            let Some(target) = store.get(argument) else {
                continue;
            };
            if target.sentence() != trigger.sentence() {
                continue;
            }

            let path = graph.shortest_path_between(
                trigger.tokens(),
                target.tokens(),
                self.syntax.ignore_direction,
            );
            let expanded = graph.expand_with(&path, &self.syntax.modifier_relation);

            let negatives = expanded
                .into_iter()
                .filter(|token| !trigger.tokens().contains(*token))
                .collect::<BTreeSet<_>>()
                .into_iter()
                .filter(|token| {
                    sentence
                        .lemma(*token)
                        .map_or(false, vocabulary::is_semantic_negative)
                })
                .count();

            tracing::trace!(
                mention = %id,
                argument = %argument,
                ?path,
                negatives,
                "polarity path"
            );
            total += negatives;
        }
        total
    }

    /// Resolve the polarity of a complex event.
    ///
    /// Returns `id` unchanged when the negative count is even or the mention
    /// is not a triggered complex event. Otherwise a new trigger and a new
    /// event carrying the flipped label are inserted and the new event id is
    /// returned; the original is left untouched.
    pub fn resolve(&self, store: &mut MentionStore, id: MentionId) -> EventResult<MentionId> {
        let Some(mention) = store.get(id) else {
            return Ok(id);
        };
        if !mention.matches(labels::COMPLEX_EVENT) {
            return Ok(id);
        }
        let Some(trigger_id) = mention.trigger() else {
            return Ok(id);
        };

        let negatives = self.negative_count(store, id);
        if negatives % 2 == 0 {
            return Ok(id);
        }

        let flipped = flip_label(mention.label())?;
        let labels = flipped_chain(store, mention, &flipped);
        tracing::debug!(
            mention = %id,
            from = mention.label(),
            to = %flipped,
            negatives,
            "flipping polarity"
        );

        let event = mention.clone();
        let trigger = store[trigger_id].clone().with_labels(labels.clone());
        let trigger = store.insert(trigger);
        let event = event
            .with_labels(labels)
            .with_kind(MentionKind::Event { trigger });
        Ok(store.insert(event))
    }
}

/// Hypernym chain for a flipped label. Labels unknown to the taxonomy keep
/// the old chain with only the head replaced.
fn flipped_chain(store: &MentionStore, mention: &Mention, flipped: &str) -> Vec<String> {
    let chain = store.labels_for(flipped);
    if chain.len() > 1 {
        return chain;
    }
    let mut labels = mention.labels().to_vec();
    labels[0] = flipped.to_string();
    labels
}
