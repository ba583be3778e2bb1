//! # Verb Table
//!
//! Display verbs written into activity entries, keyed by [`VerbKey`].
//!
//! The table is process-wide configuration: built-in defaults, optionally
//! overridden key by key from the config file, loaded once at start-up and
//! shared read-only afterwards. Retraction matches on the verb string, so
//! every key must map to a distinct, non-empty verb.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One activity verb per (voted kind, parent kind) rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerbKey {
    AlbumLike,
    PhotoLike,
    ReviewLike,
    PostLike,
    WishLike,
    DealLike,
    ReviewCommentLike,
    AlbumCommentLike,
    ImageCommentLike,
    PostCommentLike,
    WishCommentLike,
    DealCommentLike,
}

impl VerbKey {
    pub const ALL: [VerbKey; 12] = [
        Self::AlbumLike,
        Self::PhotoLike,
        Self::ReviewLike,
        Self::PostLike,
        Self::WishLike,
        Self::DealLike,
        Self::ReviewCommentLike,
        Self::AlbumCommentLike,
        Self::ImageCommentLike,
        Self::PostCommentLike,
        Self::WishCommentLike,
        Self::DealCommentLike,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlbumLike => "album_like",
            Self::PhotoLike => "photo_like",
            Self::ReviewLike => "review_like",
            Self::PostLike => "post_like",
            Self::WishLike => "wish_like",
            Self::DealLike => "deal_like",
            Self::ReviewCommentLike => "review_comment_like",
            Self::AlbumCommentLike => "album_comment_like",
            Self::ImageCommentLike => "image_comment_like",
            Self::PostCommentLike => "post_comment_like",
            Self::WishCommentLike => "wish_comment_like",
            Self::DealCommentLike => "deal_comment_like",
        }
    }

    /// Built-in display verb.
    pub fn default_verb(&self) -> &'static str {
        match self {
            Self::AlbumLike => "liked the album",
            Self::PhotoLike => "liked the photo",
            Self::ReviewLike => "liked the review",
            Self::PostLike => "liked the post",
            Self::WishLike => "liked the wish",
            Self::DealLike => "liked the deal",
            Self::ReviewCommentLike => "liked the comment on the review",
            Self::AlbumCommentLike => "liked the comment on the album",
            Self::ImageCommentLike => "liked the comment on the photo",
            Self::PostCommentLike => "liked the comment on the post",
            Self::WishCommentLike => "liked the comment on the wish",
            Self::DealCommentLike => "liked the comment on the deal",
        }
    }
}

impl std::fmt::Display for VerbKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete mapping from [`VerbKey`] to display verb.
///
/// Deserializes from a partial map: keys absent from the input keep their
/// default verb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<VerbKey, String>", into = "BTreeMap<VerbKey, String>")]
pub struct VerbTable {
    verbs: BTreeMap<VerbKey, String>,
}

impl VerbTable {
    /// The table with every key mapped to its default verb.
    pub fn defaults() -> Self {
        Self {
            verbs: VerbKey::ALL
                .into_iter()
                .map(|k| (k, k.default_verb().to_string()))
                .collect(),
        }
    }

    /// Defaults with the given keys replaced.
    pub fn with_overrides(overrides: BTreeMap<VerbKey, String>) -> Self {
        let mut table = Self::defaults();
        table.verbs.extend(overrides);
        table
    }

    /// Display verb for `key`.
    pub fn verb(&self, key: VerbKey) -> &str {
        self.verbs
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.default_verb())
    }

    /// Iterate `(key, verb)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (VerbKey, &str)> {
        self.verbs.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Reject empty verbs and verbs shared by two keys.
    ///
    /// Two keys with the same verb and the same target kind would let
    /// retracting one like delete the other's entry.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut seen: BTreeMap<&str, VerbKey> = BTreeMap::new();
        for (key, verb) in self.iter() {
            if verb.trim().is_empty() {
                return Err(CoreError::InvalidVerbTable(format!(
                    "verb for {key} must not be empty"
                )));
            }
            if let Some(previous) = seen.insert(verb, key) {
                return Err(CoreError::InvalidVerbTable(format!(
                    "{previous} and {key} share the verb {verb:?}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for VerbTable {
    fn default() -> Self {
        Self::defaults()
    }
}

impl From<BTreeMap<VerbKey, String>> for VerbTable {
    fn from(overrides: BTreeMap<VerbKey, String>) -> Self {
        Self::with_overrides(overrides)
    }
}

impl From<VerbTable> for BTreeMap<VerbKey, String> {
    fn from(table: VerbTable) -> Self {
        table.verbs
    }
}
