//! # Votes and Scores
//!
//! Vote directions, aggregated scores, object lookups, and the owner
//! counter adjustments each direction implies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::CoreError;
use crate::identity::ObjectId;

/// Vote intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Like (+1).
    Up,
    /// Dislike (-1).
    Down,
    /// Withdraw any existing vote (0).
    Clear,
}

impl Direction {
    /// Value stored in the vote record.
    pub fn value(&self) -> i8 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
            Self::Clear => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Clear => "clear",
        }
    }

    /// Adjustment applied to the voted object's owner after a vote that
    /// changed the score.
    ///
    /// Clearing takes a like back but never touches dislikes, and a down
    /// vote never takes a like back. Both asymmetries are observed
    /// production behavior.
    pub fn owner_counter_delta(&self) -> CounterDelta {
        match self {
            Self::Up => CounterDelta {
                likes: 1,
                dislikes: 0,
            },
            Self::Down => CounterDelta {
                likes: 0,
                dislikes: 1,
            },
            Self::Clear => CounterDelta {
                likes: -1,
                dislikes: 0,
            },
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Direction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "clear" => Ok(Self::Clear),
            other => Err(CoreError::InvalidDirection(other.to_string())),
        }
    }
}

/// Signed change to an owner's `num_likes` / `num_dislikes` counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterDelta {
    pub likes: i64,
    pub dislikes: i64,
}

impl CounterDelta {
    pub fn is_zero(&self) -> bool {
        self.likes == 0 && self.dislikes == 0
    }
}

/// Aggregated vote state of one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct Score {
    /// Sum of all vote values.
    pub score: i64,
    /// Number of votes cast.
    pub num_votes: u64,
}

/// How to find the object being voted on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// By primary key.
    Id(ObjectId),
    /// By the value of a slug-like field.
    Slug { field: String, value: String },
}

impl Lookup {
    /// Build a lookup from optional request parameters.
    ///
    /// A present `object_id` wins. Otherwise both `slug` and `slug_field`
    /// must be present and non-empty. Returns `None` when neither form is
    /// usable, including a non-numeric `object_id`.
    pub fn from_params(
        object_id: Option<&str>,
        slug: Option<&str>,
        slug_field: Option<&str>,
    ) -> Option<Self> {
        if let Some(raw) = object_id.filter(|s| !s.trim().is_empty()) {
            return raw.parse::<ObjectId>().ok().map(Self::Id);
        }
        match (slug, slug_field) {
            (Some(value), Some(field)) if !value.is_empty() && !field.is_empty() => {
                Some(Self::Slug {
                    field: field.to_string(),
                    value: value.to_string(),
                })
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Lookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id={id}"),
            Self::Slug { field, value } => write!(f, "{field}={value:?}"),
        }
    }
}
