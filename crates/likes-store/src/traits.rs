//! # Store Traits
//!
//! One trait per external collaborator. Implementations must be `Send +
//! Sync`; the API shares them across request tasks behind `Arc`.
//!
//! Calls are synchronous. A vote request performs a handful of keyed
//! lookups and writes, none of which outlive the request.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use likes_core::{
    ActivityEntry, ActivityFilter, ContentKind, CounterDelta, Direction, Follow, Lookup,
    NewActivity, ObjectRef, Score, UserId,
};

use crate::error::StoreResult;

/// A content object as the resolver returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    pub object: ObjectRef,
    /// User whose like/dislike counters move when this object is voted on.
    #[serde(default)]
    pub owner: Option<UserId>,
    /// Lookup fields such as `slug`.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

/// A user account with its denormalized vote counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub num_likes: i64,
    #[serde(default)]
    pub num_dislikes: i64,
}

/// Content lookup.
pub trait ObjectResolver: Send + Sync {
    /// Find an object of `kind` by id or slug field.
    fn resolve(&self, kind: ContentKind, lookup: &Lookup) -> StoreResult<Option<StoredObject>>;

    /// Fetch an object by reference.
    fn get(&self, object: ObjectRef) -> StoreResult<Option<StoredObject>>;
}

/// Comment threading.
pub trait CommentStore: Send + Sync {
    /// The object `comment` was posted on, if it is a known comment.
    fn commented_object(&self, comment: ObjectRef) -> StoreResult<Option<ObjectRef>>;
}

/// Vote records. At most one vote per (user, object).
pub trait VoteStore: Send + Sync {
    /// Create, change, or (for [`Direction::Clear`]) delete the user's vote.
    fn record_vote(&self, object: ObjectRef, user: UserId, direction: Direction)
        -> StoreResult<()>;

    fn get_score(&self, object: ObjectRef) -> StoreResult<Score>;

    /// All voters, in the order their votes were first cast.
    fn get_voters(&self, object: ObjectRef) -> StoreResult<Vec<UserId>>;

    /// Voters `[offset, offset + limit)` of [`VoteStore::get_voters`].
    fn get_voters_inc(
        &self,
        object: ObjectRef,
        offset: usize,
        limit: usize,
    ) -> StoreResult<Vec<UserId>>;
}

/// Activity feed and stream subscriptions.
pub trait ActivityStream: Send + Sync {
    fn send(&self, activity: NewActivity) -> StoreResult<ActivityEntry>;

    /// Subscribe `actor` to `object` without emitting a follow entry.
    fn follow(&self, actor: UserId, object: ObjectRef) -> StoreResult<()>;

    fn unfollow(&self, actor: UserId, object: ObjectRef) -> StoreResult<()>;

    /// Delete every entry matching `filter`; returns how many were removed.
    fn delete_matching(&self, filter: &ActivityFilter) -> StoreResult<usize>;
}

/// Follow relationships.
pub trait FollowStore: Send + Sync {
    /// Returns the follow and whether it was created by this call.
    fn get_or_create(&self, user: UserId, object: ObjectRef) -> StoreResult<(Follow, bool)>;

    fn get_follows(&self, object: ObjectRef) -> StoreResult<Vec<Follow>>;

    /// Remove the user's follow of `object`; returns whether one existed.
    fn remove(&self, user: UserId, object: ObjectRef) -> StoreResult<bool>;
}

/// User records.
pub trait UserDirectory: Send + Sync {
    fn get_user(&self, id: UserId) -> StoreResult<Option<UserRecord>>;

    /// Apply a counter adjustment. Unknown users are ignored.
    fn adjust_counters(&self, id: UserId, delta: CounterDelta) -> StoreResult<()>;
}

/// Bearer session tokens.
pub trait SessionStore: Send + Sync {
    fn authenticate(&self, token: &str) -> StoreResult<Option<UserId>>;
}
