//! Error types for the Trawl bulk operations engine.

use thiserror::Error;

/// Selection key codec errors.
///
/// Per-key at the submission boundary: a malformed key is skipped with a
/// diagnostic, the rest of the request proceeds.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    /// The token does not split into 2 or 3 non-empty fields.
    #[error("malformed selection key '{0}'")]
    Malformed(String),

    /// A field to encode contains the delimiter.
    #[error("selection key {field} may not contain the delimiter")]
    ReservedDelimiter { field: &'static str },

    /// A field to encode is empty.
    #[error("selection key {field} may not be empty")]
    EmptyField { field: &'static str },
}

/// Request-level errors - abort the submission and surface to the actor.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// No keys were selected; checked before anything is resolved.
    #[error("No items selected.")]
    EmptySelection,

    /// The chosen action identifier matches nothing in the catalog.
    #[error("unknown action '{0}'")]
    UnknownAction(String),

    /// The action implementation failed during synchronous execution.
    #[error("action '{action}' failed: {source}")]
    ActionFault {
        action: String,
        #[source]
        source: ActionError,
    },
}

/// Fault raised by an action implementation during `execute`.
///
/// Fatal to the current unit in batched mode, to the whole submission in
/// synchronous mode.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ActionError {
    pub message: String,
}

impl ActionError {
    /// Create a fault with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config directory found.
    #[error("Config directory not found")]
    NoConfigDir,

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),
}
