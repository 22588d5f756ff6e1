//! Error types for woordjes-core.

use thiserror::Error;

/// Result type alias using ValidationError.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Input that the matcher or quiz builder refuses to work with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("at least one reference answer is required")]
    EmptyReferences,

    #[error("missing language tag for side {side}")]
    MissingLanguage { side: &'static str },

    #[error("invalid language tag for side {side}: {value}")]
    InvalidLanguage { side: &'static str, value: String },

    #[error("item {index} has an empty term")]
    EmptyTerm { index: usize },

    #[error("item {index} has no translations")]
    EmptyTranslations { index: usize },

    #[error("word list contains no items")]
    EmptyWordList,
}

/// Errors that can occur while reading a word list out of model output.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no JSON object found in model output")]
    NoJsonObject,

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid word list: {0}")]
    Invalid(#[from] ValidationError),
}
