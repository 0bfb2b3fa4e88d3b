//! Binding decomposition and the ubiquitination filter.

use layered_bionlp_document::{labels, Mention, MentionId, MentionStore};

use crate::vocabulary;

#[derive(Debug, Clone, Default)]
pub struct BindingBuilder;

impl BindingBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Split a Binding with `theme1` / `theme2` lists into pairwise Bindings.
    ///
    /// - one side with two or more members and the other empty: every
    ///   unordered pair from that side
    /// - one side holding a single generic entity ("the complex") and the
    ///   other empty: one Binding with that theme
    /// - otherwise: the cross product of the two sides
    ///
    /// Pairs of the same grounded entity are dropped. A pair containing
    /// "ubiquitin" becomes a Ubiquitination of the partner, unless the
    /// partner is ubiquitin too. A plain `theme` role is read as `theme1`.
    pub fn mk_binding(&self, store: &mut MentionStore, id: MentionId) -> Vec<MentionId> {
        let Some(mention) = store.get(id) else {
            return Vec::new();
        };
        let template = mention
            .clone()
            .without_argument("theme")
            .without_argument("theme1")
            .without_argument("theme2");

        let mut theme1: Vec<MentionId> = mention.argument("theme1").to_vec();
        for &theme in mention.argument("theme") {
            if !theme1.contains(&theme) {
                theme1.push(theme);
            }
        }
        let theme2 = mention.argument("theme2").to_vec();

        let is_generic = |theme: MentionId| {
            store
                .get(theme)
                .map_or(false, |m| m.matches(labels::GENERIC_ENTITY))
        };

        let groups: Vec<Vec<MentionId>> = match (theme1.len(), theme2.len()) {
            (n, 0) if n >= 2 => pairs(&theme1),
            (0, n) if n >= 2 => pairs(&theme2),
            (1, 0) if is_generic(theme1[0]) => vec![theme1.clone()],
            (0, 1) if is_generic(theme2[0]) => vec![theme2.clone()],
            _ => theme1
                .iter()
                .flat_map(|&a| theme2.iter().map(move |&b| vec![a, b]))
                .collect(),
        };

        let ubiquitination = store.labels_for(labels::UBIQUITINATION);
        let mut output = Vec::new();
        for group in groups {
            if let [a, b] = group.as_slice() {
                if store.same_entity(*a, *b) {
                    tracing::debug!(binding = %id, %a, %b, "binding of an entity to itself");
                    continue;
                }
            }

            let partners: Vec<MentionId> = group
                .iter()
                .copied()
                .filter(|theme| store.text(*theme) != "ubiquitin")
                .collect();
            let built = if partners.len() < group.len() {
                if partners.is_empty() {
                    continue;
                }
                if partners
                    .iter()
                    .any(|theme| vocabulary::is_ubiquitin(&store.text(*theme)))
                {
                    tracing::debug!(binding = %id, "ubiquitination of ubiquitin");
                    continue;
                }
                template
                    .clone()
                    .with_labels(ubiquitination.clone())
                    .with_argument("theme", partners)
            } else {
                template.clone().with_argument("theme", group)
            };
            output.push(store.insert(built));
        }

        if output.is_empty() {
            tracing::debug!(binding = %id, "no resolvable theme pair");
        }
        output
    }

    /// `None` when a theme or cause is ubiquitin itself; ubiquitin is not
    /// ubiquitinated.
    pub fn mk_ubiquitination(&self, store: &MentionStore, id: MentionId) -> Option<MentionId> {
        let mention = store.get(id)?;
        let ubiquitin = mention
            .argument("theme")
            .iter()
            .chain(mention.argument("cause"))
            .any(|arg| vocabulary::is_ubiquitin(&store.text(*arg)));
        if ubiquitin {
            tracing::debug!(mention = %id, "ubiquitination of ubiquitin");
            return None;
        }
        Some(id)
    }
}

/// Unordered pairs in input order.
fn pairs(themes: &[MentionId]) -> Vec<Vec<MentionId>> {
    let mut out = Vec::new();
    for (i, &a) in themes.iter().enumerate() {
        for &b in &themes[i + 1..] {
            out.push(vec![a, b]);
        }
    }
    out
}
