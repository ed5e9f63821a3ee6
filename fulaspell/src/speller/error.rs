//! Error types for spell-checking operations.

/// Errors that can occur during spell-checking operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SpellerError {
    /// The number of requested suggestions must be at least one
    #[error("Invalid number of suggestions requested: {0}")]
    InvalidSuggestionCount(usize),
}
