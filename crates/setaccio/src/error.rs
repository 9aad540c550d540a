//! Library error types.

use thiserror::Error;

/// Errors surfaced while building a filtered query.
///
/// Filtering itself is permissive (unknown keys, empty values, and
/// unknown sort columns are silently skipped); only caller and
/// configuration mistakes are reported.
#[derive(Debug, Error)]
pub enum Error {
    #[error("table not found: {0}")]
    UnknownTable(String),

    #[error("database error")]
    Database(#[from] sqlx::Error),
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
