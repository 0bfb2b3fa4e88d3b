//! Modifications attached to mentions.
//!
//! A [`ModificationSet`] is owned by its mention and is the only piece of
//! mention state that may change after construction. Writers go through
//! `&mut MentionStore`, so at most one stage mutates a document at a time.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::MentionId;

/// Kind of a post-translational modification.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PtmKind {
    Acetylation,
    Deacetylation,
    Farnesylation,
    Defarnesylation,
    Glycosylation,
    Deglycosylation,
    Hydrolysis,
    Dehydrolysis,
    Hydroxylation,
    Dehydroxylation,
    Methylation,
    Demethylation,
    Phosphorylation,
    Dephosphorylation,
    Ribosylation,
    Deribosylation,
    Sumoylation,
    Desumoylation,
    Ubiquitination,
    Deubiquitination,
    /// Event label outside the modification vocabulary (e.g. "Translocation").
    Other(String),
}

impl PtmKind {
    pub fn label(&self) -> &str {
        match self {
            Self::Acetylation => "Acetylation",
            Self::Deacetylation => "Deacetylation",
            Self::Farnesylation => "Farnesylation",
            Self::Defarnesylation => "Defarnesylation",
            Self::Glycosylation => "Glycosylation",
            Self::Deglycosylation => "Deglycosylation",
            Self::Hydrolysis => "Hydrolysis",
            Self::Dehydrolysis => "Dehydrolysis",
            Self::Hydroxylation => "Hydroxylation",
            Self::Dehydroxylation => "Dehydroxylation",
            Self::Methylation => "Methylation",
            Self::Demethylation => "Demethylation",
            Self::Phosphorylation => "Phosphorylation",
            Self::Dephosphorylation => "Dephosphorylation",
            Self::Ribosylation => "Ribosylation",
            Self::Deribosylation => "Deribosylation",
            Self::Sumoylation => "Sumoylation",
            Self::Desumoylation => "Desumoylation",
            Self::Ubiquitination => "Ubiquitination",
            Self::Deubiquitination => "Deubiquitination",
            Self::Other(label) => label.as_str(),
        }
    }
}

impl fmt::Display for PtmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A post-translational modification of an entity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ptm {
    pub kind: PtmKind,
    /// Text that evidences the modification (a trigger or a "mod" span)
    pub evidence: Option<MentionId>,
    pub site: Option<MentionId>,
    pub negated: bool,
}

impl Ptm {
    pub fn new(kind: PtmKind) -> Self {
        Self {
            kind,
            evidence: None,
            site: None,
            negated: false,
        }
    }

    pub fn with_evidence(mut self, evidence: MentionId) -> Self {
        self.evidence = Some(evidence);
        self
    }

    pub fn with_site(mut self, site: Option<MentionId>) -> Self {
        self.site = site;
        self
    }

    pub fn negated(mut self, negated: bool) -> Self {
        self.negated = negated;
        self
    }
}

/// Tagged annotation attached to a mention.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Modification {
    Ptm(Ptm),
    /// A site waiting to be promoted onto the event that uses this entity
    EventSite { site: MentionId },
    Mutant { evidence: MentionId, found_by: String },
    Negation { evidence: Option<MentionId> },
    Hypothesis { evidence: Option<MentionId> },
}

impl Modification {
    pub fn is_negation(&self) -> bool {
        matches!(self, Self::Negation { .. })
    }

    pub fn as_ptm(&self) -> Option<&Ptm> {
        match self {
            Self::Ptm(ptm) => Some(ptm),
            _ => None,
        }
    }

    pub fn event_site(&self) -> Option<MentionId> {
        match self {
            Self::EventSite { site } => Some(*site),
            _ => None,
        }
    }

    /// Short tag used by text displays.
    pub fn tag(&self) -> String {
        match self {
            Self::Ptm(ptm) if ptm.negated => format!("-{}", ptm.kind),
            Self::Ptm(ptm) => format!("+{}", ptm.kind),
            Self::EventSite { .. } => "+site".to_string(),
            Self::Mutant { .. } => "+mutant".to_string(),
            Self::Negation { .. } => "+neg".to_string(),
            Self::Hypothesis { .. } => "+hyp".to_string(),
        }
    }
}

/// Set of modifications with one extra rule: at most one PTM per
/// `(kind, site)` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModificationSet(BTreeSet<Modification>);

impl ModificationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a modification. Returns false if it (or a PTM with the same
    /// kind and site) was already present.
    pub fn insert(&mut self, modification: Modification) -> bool {
        if let Modification::Ptm(new) = &modification {
            let duplicate = self
                .ptms()
                .any(|ptm| ptm.kind == new.kind && ptm.site == new.site);
            if duplicate {
                return false;
            }
        }
        self.0.insert(modification)
    }

    /// Insert `ptm`, evicting any PTM with the same kind and site.
    pub fn replace_ptm(&mut self, ptm: Ptm) {
        self.0.retain(|m| {
            m.as_ptm()
                .map_or(true, |old| old.kind != ptm.kind || old.site != ptm.site)
        });
        self.0.insert(Modification::Ptm(ptm));
    }

    pub fn remove(&mut self, modification: &Modification) -> bool {
        self.0.remove(modification)
    }

    pub fn contains(&self, modification: &Modification) -> bool {
        self.0.contains(modification)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modification> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ptms(&self) -> impl Iterator<Item = &Ptm> {
        self.0.iter().filter_map(Modification::as_ptm)
    }

    pub fn has_negation(&self) -> bool {
        self.0.iter().any(Modification::is_negation)
    }

    /// Sites of all `EventSite` modifications, in set order.
    pub fn event_sites(&self) -> Vec<MentionId> {
        self.0.iter().filter_map(Modification::event_site).collect()
    }

    /// Remove every `EventSite` modification, returning their sites.
    pub fn take_event_sites(&mut self) -> Vec<MentionId> {
        let sites = self.event_sites();
        self.0.retain(|m| m.event_site().is_none());
        sites
    }

    /// Split into `(negations, everything else)`.
    pub fn partition_negations(&self) -> (ModificationSet, ModificationSet) {
        let (negations, others): (BTreeSet<_>, BTreeSet<_>) =
            self.0.iter().cloned().partition(Modification::is_negation);
        (ModificationSet(negations), ModificationSet(others))
    }
}

impl Extend<Modification> for ModificationSet {
    fn extend<I: IntoIterator<Item = Modification>>(&mut self, iter: I) {
        for modification in iter {
            self.insert(modification);
        }
    }
}

impl FromIterator<Modification> for ModificationSet {
    fn from_iter<I: IntoIterator<Item = Modification>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a ModificationSet {
    type Item = &'a Modification;
    type IntoIter = std::collections::btree_set::Iter<'a, Modification>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
