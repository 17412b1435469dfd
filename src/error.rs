//! Unison Error Types
//!
//! Centralized error handling for the dispatcher and its collaborators.

use thiserror::Error;

/// Central error type for Unison
#[derive(Error, Debug)]
pub enum UnisonError {
    #[error("Listener error: {0}")]
    Listener(String),

    /// The speech source has no more input (e.g. stdin reached EOF)
    #[error("Input closed")]
    InputClosed,

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Reasons a module can be refused by the switch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Module '{0}' is already registered")]
    DuplicateModule(String),

    #[error("Verb '{verb}' of module '{incoming}' is already owned by '{owner}'")]
    VerbCollision {
        verb: String,
        owner: String,
        incoming: String,
    },

    #[error("Module '{0}' declares no verbs")]
    NoVerbs(String),
}

/// Result type alias for Unison operations
pub type UnisonResult<T> = Result<T, UnisonError>;
