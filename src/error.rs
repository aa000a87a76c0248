//! Error taxonomy for loading pipelines.
//!
//! Every pipeline failure ends up as a [`LoadError`], which the list
//! controller stores in `LoadingState::Error` when no cells are shown.

use thiserror::Error;

/// Errors that can terminate a loading pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The intent could not be translated into requests.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A store failed to answer a request.
    #[error("Fetch from {store} failed for '{key}': {message}")]
    Fetch {
        store: String,
        key: String,
        message: String,
    },

    /// A store answered, but the payload did not match the request's output type.
    #[error("Failed to decode '{key}': {message}")]
    Decode { key: String, message: String },

    /// Section merge was invoked while no load was in flight.
    #[error("Invariant violation: {message}")]
    InvariantViolation { message: String },
}

impl LoadError {
    pub fn configuration(message: impl Into<String>) -> Self {
        LoadError::Configuration {
            message: message.into(),
        }
    }

    pub fn fetch(
        store: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LoadError::Fetch {
            store: store.into(),
            key: key.into(),
            message: message.into(),
        }
    }

    /// Short machine-readable kind, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::Configuration { .. } => "configuration",
            LoadError::Fetch { .. } => "fetch",
            LoadError::Decode { .. } => "decode",
            LoadError::InvariantViolation { .. } => "invariant_violation",
        }
    }
}
