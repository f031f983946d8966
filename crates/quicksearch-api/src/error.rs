//! Error types for providers and keybindings.

use quicksearch_core::ActionPath;
use thiserror::Error;

use crate::provider::ProviderId;

/// Errors raised when activating a search result.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("No action at path {0}")]
    ActionNotFound(ActionPath),

    #[error("Action '{0}' has no handler")]
    NotInvocable(String),

    #[error("Action '{0}' is not available for the current selection")]
    Unavailable(String),

    #[error("Provider {0} is not registered")]
    ProviderNotFound(ProviderId),
}

/// Errors raised while parsing a chord.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeymapError {
    #[error("Empty chord")]
    EmptyChord,

    #[error("Unknown modifier '{modifier}' in chord '{chord}'")]
    UnknownModifier { chord: String, modifier: String },

    #[error("Chord '{0}' has no key")]
    MissingKey(String),
}

/// Result alias for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
