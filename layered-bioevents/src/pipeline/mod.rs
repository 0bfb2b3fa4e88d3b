//! Pipeline for running the event stages in the correct order.
//!
//! Stages mutate the shared [`MentionStore`], so they run strictly one
//! after another on a document. Independent documents may be processed on
//! separate threads, each with its own store.

use layered_bionlp_document::{MentionId, MentionStore};

use crate::{
    ArgumentValidator, AttachmentStore, EventResult, EventSplitter, ModalityDetector,
    PipelineConfig, RegulationBuilder, SiteSniffer, Stage,
};

/// Stage sequence plus the configured components.
///
/// Provides preset configurations:
/// - `attachments_only()` - PTM/site/mutant attachment only
/// - `standard()` - every stage
#[derive(Debug, Clone)]
pub struct EventPipeline {
    stages: Vec<Stage>,
    validator: ArgumentValidator,
    attachments: AttachmentStore,
    modality: ModalityDetector,
    sniffer: SiteSniffer,
    splitter: EventSplitter,
    regulations: RegulationBuilder,
}

impl Default for EventPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl EventPipeline {
    pub fn from_config(config: &PipelineConfig) -> Self {
        let syntax = config.syntax.clone();
        Self {
            stages: config.stages.clone(),
            validator: ArgumentValidator::with_syntax(syntax.clone()),
            attachments: AttachmentStore::new(),
            modality: ModalityDetector::with_syntax(syntax.clone()),
            sniffer: SiteSniffer::new(),
            splitter: EventSplitter::new(),
            regulations: RegulationBuilder::with_syntax(syntax),
        }
    }

    /// Full analysis with proper stage ordering.
    ///
    /// 1. ValidateArguments - drop blocked small-molecule arguments
    /// 2. StoreAttachments - PTM/EventSite/Mutant onto entities
    /// 3. DetectModality - negation and hedging on triggers
    /// 4. SniffSites - needs EventSite attachments
    /// 5. SplitEvents - needs promoted sites and negations
    /// 6. BuildRegulations - needs split events; requires grounding
    pub fn standard() -> Self {
        Self::from_config(&PipelineConfig::standard())
    }

    pub fn attachments_only() -> Self {
        Self::from_config(&PipelineConfig::attachments_only())
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Run every stage over `raw` and return the final active mentions.
    pub fn run(
        &self,
        store: &mut MentionStore,
        raw: &[MentionId],
    ) -> EventResult<Vec<MentionId>> {
        let mut active = raw.to_vec();

        for stage in &self.stages {
            let before = active.len();
            active = match stage {
                Stage::ValidateArguments => self.validator.validate(store, &active),
                Stage::StoreAttachments => self.attachments.run(store, &active),
                Stage::DetectModality => {
                    self.modality.detect(store, &active);
                    active
                }
                Stage::SniffSites => self.sniffer.sniff(store, &active),
                Stage::SplitEvents => self.splitter.split(store, &active),
                Stage::BuildRegulations => self.regulations.build(store, &active)?,
            };
            tracing::debug!(?stage, before, after = active.len(), "stage finished");
        }

        Ok(active)
    }
}
