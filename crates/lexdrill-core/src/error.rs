//! Drill error types.
//!
//! One taxonomy for everything that can go wrong between loading word lists
//! and running a turn. Most variants are recovered from locally; callers use
//! [`DrillError::is_fatal`] to decide whether a session can still be built.

use thiserror::Error;

/// Errors raised by the dataset, conjugation and session layers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrillError {
    /// A source failed to deliver a document (network, timeout, malformed).
    #[error("data retrieval failed: {0}")]
    DataRetrievalFailure(String),

    /// A language needs padding but no fallback list is registered for it.
    #[error("no fallback word list available for language '{language}'")]
    NoFallbackAvailable { language: String },

    /// No language delivered a non-empty word list.
    #[error("no usable language data")]
    NoUsableLanguageData,

    /// Target and reference language were the same.
    #[error("target and reference language are both '{language}'")]
    SameLanguageSelected { language: String },

    /// A verb was offered for conjugation without a table for the tense.
    #[error("verb '{word}' has no conjugation forms for tense '{tense}'")]
    MalformedVerbEntry { word: String, tense: String },

    /// A language code that is not part of the loaded dataset.
    #[error("language '{0}' is not loaded")]
    UnknownLanguage(String),
}

impl DrillError {
    /// Returns `true` if no playable session can be constructed.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DrillError::NoFallbackAvailable { .. } | DrillError::NoUsableLanguageData
        )
    }

    /// Returns `true` if the engine recovers from this error on its own.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DrillError::DataRetrievalFailure(_)
                | DrillError::SameLanguageSelected { .. }
                | DrillError::MalformedVerbEntry { .. }
        )
    }
}
