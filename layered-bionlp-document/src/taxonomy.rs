//! Label hierarchy lookups.
//!
//! Every mention carries its full hypernym chain (most specific label first),
//! so "is this a SimpleEvent?" is a membership test on that chain. The chain
//! itself comes from a [`Taxonomy`]; [`BioTaxonomy`] is the built-in table.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Label names used by the event layers.
pub mod labels {
    pub const ENTITY: &str = "Entity";
    pub const BIO_ENTITY: &str = "BioEntity";
    pub const MACRO_MOLECULE: &str = "MacroMolecule";
    pub const GENE_OR_GENE_PRODUCT: &str = "Gene_or_gene_product";
    pub const COMPLEX: &str = "Complex";
    pub const GENERIC_ENTITY: &str = "GenericEntity";
    pub const SIMPLE_CHEMICAL: &str = "Simple_chemical";
    pub const BIO_PROCESS: &str = "BioProcess";
    pub const SITE: &str = "Site";

    pub const EVENT: &str = "Event";
    pub const GENERIC_EVENT: &str = "Generic_event";
    pub const SIMPLE_EVENT: &str = "SimpleEvent";
    pub const BINDING: &str = "Binding";
    pub const UBIQUITINATION: &str = "Ubiquitination";
    pub const COMPLEX_EVENT: &str = "ComplexEvent";
    pub const REGULATION: &str = "Regulation";
    pub const POSITIVE_REGULATION: &str = "Positive_regulation";
    pub const NEGATIVE_REGULATION: &str = "Negative_regulation";
    pub const ACTIVATION: &str = "ActivationEvent";
    pub const POSITIVE_ACTIVATION: &str = "Positive_activation";
    pub const NEGATIVE_ACTIVATION: &str = "Negative_activation";

    pub const PTM: &str = "PTM";
    pub const EVENT_SITE: &str = "EventSite";
    pub const MUTANT: &str = "Mutant";

    pub const CUE: &str = "Cue";
    pub const NEGATION_CUE: &str = "NegationCue";
    pub const HYPOTHESIS_CUE: &str = "HypothesisCue";
}

/// Source of hypernym chains, normally backed by the knowledge base.
pub trait Taxonomy: Send + Sync {
    /// Ordered hypernym chain for `label`, most specific first and `label`
    /// itself included. Unknown labels yield a single-element chain.
    fn hypernyms(&self, label: &str) -> Vec<String>;

    fn is_a(&self, label: &str, ancestor: &str) -> bool {
        self.hypernyms(label).iter().any(|l| l == ancestor)
    }
}

/// `(child, parent)` pairs of the built-in hierarchy.
const HIERARCHY: &[(&str, &str)] = &[
    ("BioEntity", "Entity"),
    ("MacroMolecule", "BioEntity"),
    ("Gene_or_gene_product", "MacroMolecule"),
    ("Complex", "MacroMolecule"),
    ("GenericEntity", "MacroMolecule"),
    ("Simple_chemical", "BioEntity"),
    ("BioProcess", "BioEntity"),
    ("Cellular_component", "BioEntity"),
    ("Species", "BioEntity"),
    ("CellType", "BioEntity"),
    ("CellLine", "BioEntity"),
    ("Organ", "BioEntity"),
    ("TissueType", "BioEntity"),
    ("Site", "Entity"),
    ("SimpleEvent", "Event"),
    ("ComplexEvent", "Event"),
    ("Generic_event", "Event"),
    ("Binding", "SimpleEvent"),
    ("Translocation", "SimpleEvent"),
    ("Transcription", "SimpleEvent"),
    ("ModificationEvent", "SimpleEvent"),
    ("Acetylation", "ModificationEvent"),
    ("Deacetylation", "ModificationEvent"),
    ("Farnesylation", "ModificationEvent"),
    ("Defarnesylation", "ModificationEvent"),
    ("Glycosylation", "ModificationEvent"),
    ("Deglycosylation", "ModificationEvent"),
    ("Hydrolysis", "ModificationEvent"),
    ("Dehydrolysis", "ModificationEvent"),
    ("Hydroxylation", "ModificationEvent"),
    ("Dehydroxylation", "ModificationEvent"),
    ("Methylation", "ModificationEvent"),
    ("Demethylation", "ModificationEvent"),
    ("Phosphorylation", "ModificationEvent"),
    ("Dephosphorylation", "ModificationEvent"),
    ("Ribosylation", "ModificationEvent"),
    ("Deribosylation", "ModificationEvent"),
    ("Sumoylation", "ModificationEvent"),
    ("Desumoylation", "ModificationEvent"),
    ("Ubiquitination", "ModificationEvent"),
    ("Deubiquitination", "ModificationEvent"),
    ("Regulation", "ComplexEvent"),
    ("Positive_regulation", "Regulation"),
    ("Negative_regulation", "Regulation"),
    ("ActivationEvent", "ComplexEvent"),
    ("Positive_activation", "ActivationEvent"),
    ("Negative_activation", "ActivationEvent"),
    ("PTM", "Attachment"),
    ("EventSite", "Attachment"),
    ("Mutant", "Attachment"),
    ("NegationCue", "Cue"),
    ("HypothesisCue", "Cue"),
];

static PARENTS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| HIERARCHY.iter().copied().collect());

/// The built-in biomedical label hierarchy.
#[derive(Debug, Clone, Copy, Default)]
pub struct BioTaxonomy;

impl BioTaxonomy {
    pub fn new() -> Self {
        Self
    }

    /// Returns true if the label appears anywhere in the table.
    pub fn contains(&self, label: &str) -> bool {
        PARENTS.contains_key(label) || PARENTS.values().any(|parent| *parent == label)
    }
}

impl Taxonomy for BioTaxonomy {
    fn hypernyms(&self, label: &str) -> Vec<String> {
        let mut chain = vec![label.to_string()];
        let mut current = label;
        // The table is acyclic; the bound only guards hand-edited tables.
        while let Some(parent) = PARENTS.get(current) {
            if chain.len() > HIERARCHY.len() {
                break;
            }
            chain.push(parent.to_string());
            current = *parent;
        }
        chain
    }
}
