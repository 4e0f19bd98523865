//! Error types for selection state management.

use thiserror::Error;

/// Error type for invalid values at the untyped host boundary.
#[derive(Debug, Clone, Error)]
pub enum SelectionError {
    /// The supplied value was not a proper identifier collection.
    #[error("invalid selection argument: {0}")]
    InvalidArgument(String),
}

pub(crate) const NO_PROVIDER_MSG: &str =
    "no enclosing SelectionProvider in scope; wrap the consumer in a provider or pass one explicitly";

/// Error raised when a consumer is used outside any enclosing provider.
///
/// Carries its full message so callers can substitute their own diagnostic
/// text for the default.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct MissingProviderError {
    /// Error message
    pub message: String,
}

impl MissingProviderError {
    /// Create an error with a caller-supplied message, replacing the default.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for MissingProviderError {
    fn default() -> Self {
        Self::new(NO_PROVIDER_MSG)
    }
}
