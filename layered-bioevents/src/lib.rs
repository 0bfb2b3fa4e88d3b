#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Biomedical event normalization plugin for layered-bionlp.
//!
//! Sits between raw rule matches and the final event set. Every stage reads
//! and extends a per-document [`MentionStore`](layered_bionlp_document::MentionStore).
//!
//! ## Stages
//!
//! - [`ArgumentValidator`] - Drops events whose chemical arguments are blocked by a protein
//! - [`AttachmentStore`] - Turns PTM/EventSite/Mutant relations into entity modifications
//! - [`ModalityDetector`] - Attaches negation and hedging to event triggers
//! - [`SiteSniffer`] - Promotes entity sites onto events, one event per site
//! - [`EventSplitter`] / [`BindingBuilder`] - Auto-event, cause+theme and binding decomposition
//! - [`RegulationBuilder`] - Regulation and activation construction
//!
//! ## On Demand
//!
//! - [`PolarityResolver`] - Semantic-negative counting and label flipping
//! - [`EntityNormalizer`] - Collapses an event into an entity-with-PTM view
//!
//! ## Example
//!
//! ```
//! use layered_bionlp::TokenInterval;
//! use layered_bionlp_document::{labels, Document, Mention, MentionStore};
//! use layered_bioevents::EventPipeline;
//!
//! let mut store = MentionStore::new(Document::from_text("MEK phosphorylates ERK"));
//! let protein = store.labels_for(labels::GENE_OR_GENE_PRODUCT);
//! let mek = store.insert(Mention::text_bound(protein.clone(), 0, TokenInterval::singleton(0), "ner"));
//! let erk = store.insert(Mention::text_bound(protein, 0, TokenInterval::singleton(2), "ner"));
//! let phospho = store.labels_for("Phosphorylation");
//! let trigger = store.insert(Mention::text_bound(phospho.clone(), 0, TokenInterval::singleton(1), "rule"));
//! let event = store.insert(
//!     Mention::event(phospho, 0, TokenInterval::new(0, 3), trigger, "rule")
//!         .with_argument("cause", vec![mek])
//!         .with_argument("theme", vec![erk]),
//! );
//! store.mark_grounded();
//!
//! let output = EventPipeline::standard().run(&mut store, &[mek, erk, event]).unwrap();
//!
//! // MEK, ERK, the cause-free phosphorylation and its regulation
//! assert_eq!(output.len(), 4);
//! assert_eq!(store[output[3]].label(), labels::POSITIVE_REGULATION);
//! ```

mod argument_validator;
mod attachments;
mod binding;
mod config;
mod entity_normalizer;
mod errors;
mod event_splitter;
mod modality;
mod polarity;
mod regulation;
mod site_sniffer;
pub mod vocabulary;

// Pipeline presets for running stages in dependency order
pub mod pipeline;

pub use argument_validator::ArgumentValidator;
pub use attachments::{store_event_site, store_mutants, store_ptm, Attachment, AttachmentStore};
pub use binding::BindingBuilder;
pub use config::{PipelineConfig, Stage, SyntaxConventions};
pub use entity_normalizer::EntityNormalizer;
pub use errors::{EventError, EventResult};
pub use event_splitter::EventSplitter;
pub use modality::{ModalityCue, ModalityDetector, ModalityKind};
pub use pipeline::EventPipeline;
pub use polarity::{flip_label, PolarityResolver};
pub use regulation::{
    has_distinct_controller_controlled, has_syntactic_overlap, is_bioprocess_legal,
    prefer_event_controllers, RegulationBuilder,
};
pub use site_sniffer::{SitePlan, SiteSniffer};

#[cfg(test)]
mod tests {
    mod binding;
    mod entity_normalizer;
    mod pipeline;
    mod polarity;
    mod regulation;
    mod site_sniffer;
}
