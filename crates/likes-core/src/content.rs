//! # Content Kinds
//!
//! The closed set of persisted models the service knows about, and the
//! `(kind, id)` reference used everywhere an object is named.
//!
//! Each kind has three spellings:
//!
//! | Spelling        | Used by                                  |
//! |-----------------|------------------------------------------|
//! | tag             | vote URLs, JSON, config (`"album"`)      |
//! | content-type id | voter-listing URLs (`2`)                 |
//! | verbose name    | "not found" messages (`"album"`)         |

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::CoreError;
use crate::identity::ObjectId;

/// A persisted model that can be voted on, commented on, or act as an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// A user account. Actors of every activity entry.
    User,
    /// A photo gallery.
    Album,
    /// A single photo.
    Image,
    /// A blog post; the only valid parent of a likeable review.
    BlogPost,
    /// A review, itself a comment on another object.
    Review,
    /// A threaded comment on any object.
    ThreadedComment,
    /// A post-style wish.
    GenericWish,
    /// A broadcast wish.
    BroadcastWish,
    /// A broadcast deal.
    BroadcastDeal,
}

impl ContentKind {
    /// Every kind, in content-type id order.
    pub const ALL: [ContentKind; 9] = [
        Self::User,
        Self::Album,
        Self::Image,
        Self::BlogPost,
        Self::Review,
        Self::ThreadedComment,
        Self::GenericWish,
        Self::BroadcastWish,
        Self::BroadcastDeal,
    ];

    /// URL/JSON tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Album => "album",
            Self::Image => "image",
            Self::BlogPost => "blogpost",
            Self::Review => "review",
            Self::ThreadedComment => "threadedcomment",
            Self::GenericWish => "genericwish",
            Self::BroadcastWish => "broadcastwish",
            Self::BroadcastDeal => "broadcastdeal",
        }
    }

    /// Human-readable name used in error messages.
    pub fn verbose_name(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Album => "album",
            Self::Image => "image",
            Self::BlogPost => "blog post",
            Self::Review => "review",
            Self::ThreadedComment => "comment",
            Self::GenericWish => "wish",
            Self::BroadcastWish => "broadcast wish",
            Self::BroadcastDeal => "broadcast deal",
        }
    }

    /// Stable numeric content-type id.
    pub fn content_type_id(&self) -> u32 {
        match self {
            Self::User => 1,
            Self::Album => 2,
            Self::Image => 3,
            Self::BlogPost => 4,
            Self::Review => 5,
            Self::ThreadedComment => 6,
            Self::GenericWish => 7,
            Self::BroadcastWish => 8,
            Self::BroadcastDeal => 9,
        }
    }

    /// Look a kind up by its numeric content-type id.
    pub fn from_content_type_id(id: u32) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|k| k.content_type_id() == id)
            .ok_or_else(|| CoreError::UnknownContentKind(id.to_string()))
    }

    /// Whether objects of this kind are comments with a parent object.
    pub fn is_comment(&self) -> bool {
        matches!(self, Self::Review | Self::ThreadedComment)
    }

    /// Whether this kind is a wish or deal post.
    pub fn is_wish_or_deal(&self) -> bool {
        matches!(
            self,
            Self::GenericWish | Self::BroadcastWish | Self::BroadcastDeal
        )
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentKind {
    type Err = CoreError;

    /// Parse a tag. Matching is case-insensitive so model names such as
    /// `ThreadedComment` are accepted as well.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == lowered)
            .ok_or_else(|| CoreError::UnknownContentKind(s.to_string()))
    }
}

/// A reference to one persisted object: its kind plus primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
pub struct ObjectRef {
    pub kind: ContentKind,
    pub id: ObjectId,
}

impl ObjectRef {
    pub fn new(kind: ContentKind, id: u64) -> Self {
        Self {
            kind,
            id: ObjectId::new(id),
        }
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}
