//! Promotion of entity sites onto events.
//!
//! "Phosphorylation of ERK at T202 and Y204" yields one event per site.
//! Every discovered site is attributed to the event as a whole, so an event
//! with several arguments may receive sites that belong to only one of them.
//! This is a known approximation kept for compatibility.

use layered_bionlp_document::{labels, MentionId, MentionStore};

#[derive(Debug, Clone, Default)]
pub struct SiteSniffer;

/// Sites found for one event and the arguments they were taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePlan {
    pub event: MentionId,
    pub sites: Vec<MentionId>,
    pub donors: Vec<MentionId>,
}

impl SiteSniffer {
    pub fn new() -> Self {
        Self
    }

    /// Returns `active` with every SimpleEvent that has sites replaced by one
    /// new event per distinct site.
    pub fn sniff(&self, store: &mut MentionStore, active: &[MentionId]) -> Vec<MentionId> {
        let mut output = Vec::with_capacity(active.len());
        for &id in active {
            // Planned one event at a time: an argument shared by two events
            // gives up its sites to the first one.
            match Self::plan(store, id) {
                Some(plan) => output.extend(Self::apply(store, plan)),
                None => output.push(id),
            }
        }
        output
    }

    /// `None` when `id` is not a triggered SimpleEvent or has no sites.
    pub fn plan(store: &MentionStore, id: MentionId) -> Option<SitePlan> {
        let mention = store.get(id)?;
        if mention.trigger().is_none() || !mention.matches(labels::SIMPLE_EVENT) {
            return None;
        }

        let mut sites: Vec<MentionId> = Vec::new();
        let mut donors = Vec::new();
        for argument in mention.all_arguments() {
            let promoted = store
                .get(argument)
                .map(|arg| arg.modifications().event_sites())
                .unwrap_or_default();
            if !promoted.is_empty() && !donors.contains(&argument) {
                donors.push(argument);
            }
            for site in promoted {
                if !sites.contains(&site) {
                    sites.push(site);
                }
            }
        }
        for &site in mention.argument("site") {
            if !sites.contains(&site) {
                sites.push(site);
            }
        }

        if sites.is_empty() {
            return None;
        }
        Some(SitePlan {
            event: id,
            sites,
            donors,
        })
    }

    /// Remove the promoted sites from the donors and insert one event per
    /// site. Returns the new event ids.
    pub fn apply(store: &mut MentionStore, plan: SitePlan) -> Vec<MentionId> {
        for donor in &plan.donors {
            if let Some(mention) = store.get_mut(*donor) {
                mention.modifications_mut().take_event_sites();
            }
        }

        let event = store[plan.event].clone().without_argument("site");
        tracing::debug!(
            event = %plan.event,
            sites = plan.sites.len(),
            "one event per promoted site"
        );
        plan.sites
            .into_iter()
            .map(|site| store.insert(event.clone().with_argument("site", vec![site])))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layered_bionlp::TokenInterval;
    use layered_bionlp_document::{Document, Mention, Modification};

    #[test]
    fn test_no_sites_passes_through() {
        let mut store = MentionStore::new(Document::from_text("ERK phosphorylation"));
        let protein = store.labels_for(labels::GENE_OR_GENE_PRODUCT);
        let erk = store.insert(Mention::text_bound(protein, 0, TokenInterval::singleton(0), "ner"));
        let chain = store.labels_for("Phosphorylation");
        let trigger = store.insert(Mention::text_bound(
            chain.clone(),
            0,
            TokenInterval::singleton(1),
            "rule",
        ));
        let event = store.insert(
            Mention::event(chain, 0, TokenInterval::new(0, 2), trigger, "rule")
                .with_argument("theme", vec![erk]),
        );

        assert_eq!(SiteSniffer::new().sniff(&mut store, &[erk, event]), vec![erk, event]);
    }

    #[test]
    fn test_explicit_site_argument_is_kept_once() {
        let mut store = MentionStore::new(Document::from_text("ERK phosphorylation at T202"));
        let protein = store.labels_for(labels::GENE_OR_GENE_PRODUCT);
        let site_chain = store.labels_for(labels::SITE);
        let t202 = store.insert(Mention::text_bound(site_chain, 0, TokenInterval::singleton(3), "ner"));
        let erk = store.insert(
            Mention::text_bound(protein, 0, TokenInterval::singleton(0), "ner")
                .with_modification(Modification::EventSite { site: t202 }),
        );
        let chain = store.labels_for("Phosphorylation");
        let trigger = store.insert(Mention::text_bound(
            chain.clone(),
            0,
            TokenInterval::singleton(1),
            "rule",
        ));
        let event = store.insert(
            Mention::event(chain, 0, TokenInterval::new(0, 4), trigger, "rule")
                .with_argument("theme", vec![erk])
                .with_argument("site", vec![t202]),
        );

        let output = SiteSniffer::new().sniff(&mut store, &[event]);

        assert_eq!(output.len(), 1);
        assert_eq!(store[output[0]].argument("site"), &[t202]);
        assert!(store[erk].modifications().event_sites().is_empty());
    }
}
