//! Validation errors raised at the record boundary.

use thiserror::Error;

/// Reasons a raw record is rejected during validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A required field was absent or null.
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// An identifier was negative or not an integer.
    #[error("invalid identifier in `{field}`: {value}")]
    InvalidId { field: &'static str, value: i64 },

    /// A timestamp could not be parsed as ISO-8601.
    #[error("invalid timestamp `{0}`")]
    InvalidTimestamp(String),

    /// A URL was empty or not a syntactically valid URI.
    #[error("invalid url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A name was empty after trimming.
    #[error("empty name")]
    EmptyName,

    /// Another record with the same identifier appeared earlier.
    #[error("duplicate identifier {0}")]
    DuplicateId(u64),
}
