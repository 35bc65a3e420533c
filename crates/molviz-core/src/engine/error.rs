use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::sdf::ParseError;
use crate::core::validation::ValidationError;

/// Failure of a lookup against the compound directory.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("No compound found for '{name}'")]
    NotFound { name: String },

    #[error("Lookup service unreachable: {reason}")]
    ServiceUnreachable { reason: String },
}

/// Failure of the translation service. Never surfaced past the lookup
/// workflow, which falls back to local names instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Translation failed: {0}")]
pub struct TranslationError(pub String);

#[derive(Debug, Error)]
pub enum VisualizeError {
    #[error("Could not read structure: {source}")]
    Parse {
        #[from]
        source: ParseError,
    },

    #[error("Invalid structure: {source}")]
    Validation {
        #[from]
        source: ValidationError,
    },

    #[error("Invalid JSON input: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("Invalid geometry settings: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Molecule name is empty")]
    EmptyQuery,

    #[error("Submission #{ticket} was superseded by a newer one")]
    Superseded { ticket: u64 },
}

impl VisualizeError {
    /// Whether the failure came from the lookup service rather than the data.
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup(_))
    }
}
