//! Error types for the event layers.
//!
//! Only contract violations are errors. Recoverable conditions (missing
//! arguments, unknown modification text, cross-sentence paths) drop the
//! mention and are logged instead.

use layered_bionlp_document::MentionId;
use thiserror::Error;

/// Fatal conditions that stop processing of the current document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// A polarity flip was attempted on a label without a polarity prefix.
    #[error("label {label:?} has no Positive_/Negative_ prefix")]
    MalformedLabel { label: String },

    /// Distinctness was checked before the grounding pass ran.
    #[error("distinctness check on {mention} before grounding")]
    Ungrounded { mention: MentionId },

    /// The entity normalizer reached a mention it cannot collapse.
    #[error("cannot normalize {mention} ({label}): {reason}")]
    Unnormalizable {
        mention: MentionId,
        label: String,
        reason: String,
    },

    /// Pipeline configuration could not be read or parsed.
    #[error("failed to load config: {path}: {message}")]
    Config { path: String, message: String },
}

/// Result type for event operations.
pub type EventResult<T> = Result<T, EventError>;
