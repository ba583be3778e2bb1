//! Store error types.

use likes_core::{ContentKind, Lookup};

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from collaborator stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A slug lookup matched more than one object.
    #[error("more than one {kind} matches {lookup}")]
    Ambiguous { kind: ContentKind, lookup: Lookup },

    /// The backing service could not be reached or rejected the call.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A fixture file could not be read.
    #[error("failed to read fixture {path}: {source}")]
    FixtureIo {
        path: String,
        source: std::io::Error,
    },

    /// A fixture file could not be parsed.
    #[error("invalid fixture: {0}")]
    FixtureFormat(String),
}
