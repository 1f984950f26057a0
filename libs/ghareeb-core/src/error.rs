//! Error types for ghareeb-core.

use thiserror::Error;

/// Result type alias using LexiconError.
pub type Result<T> = std::result::Result<T, LexiconError>;

/// Errors that can occur while ingesting a lexicon.
///
/// Alignment and speech matching never fail; only the ingestion boundary
/// rejects input.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("invalid lexicon JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing field `{field}` in entry {index}")]
    MissingField { index: usize, field: &'static str },

    #[error("duplicate ID {id} in entry {index}")]
    DuplicateId { id: i64, index: usize },

    #[error("no ID left to assign to entry {index}")]
    IdOverflow { index: usize },
}
