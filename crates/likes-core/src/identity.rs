//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers. Users and content objects are
//! keyed by integer primary keys assigned by the external stores; activity
//! entries are keyed by UUIDs minted when they are sent.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::CoreError;

/// Implements the shared surface of an integer-keyed identifier:
/// construction, access, `Display`, `FromStr` and `From<u64>`.
macro_rules! integer_id {
    ($(#[$meta:meta])* $ty:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
        )]
        #[serde(transparent)]
        pub struct $ty(u64);

        impl $ty {
            /// Wrap a raw primary key.
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Access the raw primary key.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $ty {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $ty {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| CoreError::InvalidIdentifier(format!("{}: {:?}", $label, s)))
            }
        }
    };
}

integer_id!(
    /// Primary key of a user account. Users are both voters and owners of
    /// votable content.
    UserId,
    "user id"
);

integer_id!(
    /// Primary key of a votable content object, unique within its
    /// [`ContentKind`](crate::ContentKind).
    ObjectId,
    "object id"
);

/// Identifier of an activity-stream entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ActivityId(Uuid);

impl ActivityId {
    /// Create a new random activity identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ActivityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ActivityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_parses_and_displays() {
        let id: UserId = "42".parse().unwrap();
        assert_eq!(id, UserId::new(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn object_id_rejects_non_numeric() {
        let err = "abc".parse::<ObjectId>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidIdentifier(_)));
        assert!("-3".parse::<ObjectId>().is_err());
    }

    #[test]
    fn ids_serialize_as_bare_integers() {
        let json = serde_json::to_string(&ObjectId::new(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn activity_ids_are_unique() {
        assert_ne!(ActivityId::new(), ActivityId::new());
    }
}
