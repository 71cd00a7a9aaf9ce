//! Error types for puzzle construction and the command line front end.
//!
//! Searching never fails: every check happens when a [`WordSearch`] is
//! built, so the only errors a caller sees come from construction or from
//! reading the puzzle input.
//!
//! [`WordSearch`]: crate::search::WordSearch

/// Result type for word search operations
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a board and word list are rejected at construction time
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid board or words array")]
    InvalidInput,

    #[error("The words searched for must all be unique")]
    DuplicateWords,

    #[error("Board needs to have m x n dimension. Ensure all rows are of equal length.")]
    NonRectangular,

    #[error("Invalid word, is null or empty")]
    EmptyWord,

    #[error("Word must only contain lowercase letters")]
    InvalidCharacters,
}

/// Errors surfaced by the CLI
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error parsing puzzle JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Must provide either a file path or --stdin")]
    MissingInput,
}
