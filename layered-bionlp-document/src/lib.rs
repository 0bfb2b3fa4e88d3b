//! Document-level abstractions for layered-bionlp.
//!
//! This crate provides the shared mention model that the event layers read
//! and transform: documents, mentions, modifications and the label taxonomy.
//!
//! ## Core Types
//!
//! - [`Document`] - Ordered, parsed sentences
//! - [`Mention`] / [`MentionKind`] - Text-bound spans, triggered events and relations
//! - [`Modification`] / [`ModificationSet`] - PTMs, sites, mutants, negation, hedging
//! - [`MentionStore`] - Per-document arena that owns the mentions
//! - [`Taxonomy`] / [`BioTaxonomy`] - Label hypernym chains
//! - [`StoreDisplay`] - Text rendering for snapshot tests
//!
//! ## Example
//!
//! ```
//! use layered_bionlp::TokenInterval;
//! use layered_bionlp_document::{labels, Document, Mention, MentionStore};
//!
//! let mut store = MentionStore::new(Document::from_text("MEK phosphorylates ERK"));
//! let chain = store.labels_for(labels::GENE_OR_GENE_PRODUCT);
//! let erk = store.insert(Mention::text_bound(chain, 0, TokenInterval::singleton(2), "ner"));
//!
//! assert_eq!(store.text(erk), "ERK");
//! assert!(store[erk].matches(labels::MACRO_MOLECULE));
//! ```

mod display;
mod document;
mod mention;
mod modification;
mod store;
mod taxonomy;

pub use display::StoreDisplay;
pub use document::Document;
pub use mention::{
    ArgumentPaths, Arguments, EventShape, Grounding, Mention, MentionId, MentionKind, Polarity,
    SyntacticEdge, NEGATIVE_PREFIX, POSITIVE_PREFIX,
};
pub use modification::{Modification, ModificationSet, Ptm, PtmKind};
pub use store::MentionStore;
pub use taxonomy::{labels, BioTaxonomy, Taxonomy};
