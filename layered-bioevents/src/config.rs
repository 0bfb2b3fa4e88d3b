//! Pipeline configuration loaded from TOML.
//!
//! ```toml
//! stages = ["validate_arguments", "store_attachments", "build_regulations"]
//!
//! [syntax]
//! modifier_relation = "amod"
//! preposition_prefix = "prep"
//! ```

use std::fs;
use std::path::Path;

use layered_bionlp::DEFAULT_MODIFIER_RELATION;
use serde::{Deserialize, Serialize};

use crate::{EventError, EventResult};

/// One step of the event pipeline. Stages run in the listed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Drop events whose small-molecule arguments are blocked by a protein
    ValidateArguments,
    /// Attach PTM, EventSite and Mutant relations to their entities
    StoreAttachments,
    /// Attach negation and hedging modifications to event triggers
    DetectModality,
    /// Promote entity sites onto the events that use them
    SniffSites,
    /// Auto-event, cause+theme and binding decomposition
    SplitEvents,
    /// Regulation and activation construction
    BuildRegulations,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::ValidateArguments,
        Stage::StoreAttachments,
        Stage::DetectModality,
        Stage::SniffSites,
        Stage::SplitEvents,
        Stage::BuildRegulations,
    ];
}

/// Dependency label conventions of the upstream parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxConventions {
    /// Relation followed when expanding paths with modifiers
    pub modifier_relation: String,
    /// Prefix shared by prepositional relations ("prep", "prep_of", ...)
    pub preposition_prefix: String,
    /// Relation attaching a negation word to its head
    pub negation_relation: String,
    /// Search paths as if the graph were undirected
    pub ignore_direction: bool,
}

impl Default for SyntaxConventions {
    fn default() -> Self {
        Self {
            modifier_relation: DEFAULT_MODIFIER_RELATION.to_string(),
            preposition_prefix: "prep".to_string(),
            negation_relation: "neg".to_string(),
            ignore_direction: true,
        }
    }
}

impl SyntaxConventions {
    pub fn is_preposition(&self, relation: &str) -> bool {
        relation.starts_with(&self.preposition_prefix)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub stages: Vec<Stage>,
    pub syntax: SyntaxConventions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl PipelineConfig {
    /// Every stage, in dependency order.
    pub fn standard() -> Self {
        Self {
            stages: Stage::ALL.to_vec(),
            syntax: SyntaxConventions::default(),
        }
    }

    /// Only the side-effecting attachment actions; no mention is rebuilt.
    pub fn attachments_only() -> Self {
        Self {
            stages: vec![Stage::StoreAttachments],
            syntax: SyntaxConventions::default(),
        }
    }

    pub fn with_stages(mut self, stages: Vec<Stage>) -> Self {
        self.stages = stages;
        self
    }

    /// Load from a TOML file. A missing file yields the standard config.
    pub fn load(path: &Path) -> EventResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| EventError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            EventError::Config { message, .. } => EventError::Config {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    pub fn from_toml(content: &str) -> EventResult<Self> {
        toml::from_str(content).map_err(|e| EventError::Config {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }
}
