//! Error types.

use thiserror::Error;

/// Failures while resolving or applying a score transformation.
///
/// All of these are lookup failures: the caller asked for a kind or a
/// parameter that does not exist. Arithmetic faults inside a formula are
/// never reported here, they are contained per element.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransformationError {
    #[error("missing parameter 'transformation_type'")]
    MissingTransformationType,

    #[error("unknown transformation type '{0}'")]
    UnknownTransformationType(String),

    #[error("transformation '{kind}' requires parameter '{name}'")]
    MissingParameter { kind: &'static str, name: &'static str },

    #[error("parameter '{name}' must be a {expected}")]
    InvalidParameterType {
        name: String,
        expected: &'static str,
    },

    #[error("invalid parameter configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for TransformationError {
    fn from(e: serde_json::Error) -> Self {
        TransformationError::Config(e.to_string())
    }
}

/// Failures of vocabulary lookups and vocabulary file I/O.
#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("unknown token: {0}")]
    UnknownToken(String),

    #[error("unknown token id: {0}")]
    UnknownId(u32),

    #[error("file I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid vocabulary file '{path}': {reason}")]
    InvalidFile { path: String, reason: String },
}
