//! # Error Types
//!
//! Errors raised while parsing or validating core values. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! The `Display` text of [`CoreError::InvalidDirection`] is part of the wire
//! protocol: it is returned verbatim in the vote failure envelope.

use thiserror::Error;

/// Top-level error type for core parsing and validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The vote direction token is not one of `up`, `down`, `clear`.
    #[error("'{0}' is not a valid vote type.")]
    InvalidDirection(String),

    /// The content-type tag or numeric id does not name a known kind.
    #[error("unknown content type: {0}")]
    UnknownContentKind(String),

    /// An identifier could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// The verb table is unusable.
    #[error("invalid verb table: {0}")]
    InvalidVerbTable(String),
}
