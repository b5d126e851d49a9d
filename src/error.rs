//! Error types for Hydra document synthesis
//!
//! Failures local to one field or one fragment are logged and absorbed by
//! the builders; only the variants below ever reach a caller.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HydraError {
    #[error("Class '{class}' carries no hypermedia metadata")]
    MetadataMissing { class: String },

    #[error("API documentation is unavailable: root fragment could not be read")]
    VocabularyUnavailable,

    #[error("Failed to read resource {name}: {reason}")]
    ResourceRead { name: String, reason: String },

    #[error("Invalid JSON in fragment {name}: {source}")]
    InvalidFragment {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {field} '{value}': {reason}")]
    InvalidAddress {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HydraError {
    /// Whether this failure means "nothing could be produced"
    ///
    /// Interceptors map these to a not-found style response; everything
    /// else is a server-side fault.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::MetadataMissing { .. } | Self::VocabularyUnavailable
        )
    }
}
