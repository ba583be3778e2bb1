//! In-memory storage backend using DashMap.
//!
//! Each collaborator gets its own map. Activity entries keep insertion
//! order in a `parking_lot::RwLock<Vec<_>>` so filtered deletes and feed
//! reads see them oldest first.

mod objects;
mod stream;
mod users;
mod votes;

use dashmap::{DashMap, DashSet};
use parking_lot::RwLock;

use likes_core::{ActivityEntry, Follow, ObjectRef, UserId};

use crate::traits::{StoredObject, UserRecord};

/// A user's vote on one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct VoteRecord {
    user: UserId,
    value: i8,
}

/// All collaborator stores in one process.
#[derive(Default)]
pub struct MemoryStore {
    objects: DashMap<ObjectRef, StoredObject>,
    parents: DashMap<ObjectRef, ObjectRef>,
    votes: DashMap<ObjectRef, Vec<VoteRecord>>,
    activities: RwLock<Vec<ActivityEntry>>,
    stream_follows: DashSet<(UserId, ObjectRef)>,
    follows: DashMap<(UserId, ObjectRef), Follow>,
    users: DashMap<UserId, UserRecord>,
    sessions: DashMap<String, UserId>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user.
    pub fn insert_user(&self, user: UserRecord) {
        self.users.insert(user.id, user);
    }

    /// Bind a bearer token to a user.
    pub fn insert_session(&self, token: impl Into<String>, user: UserId) {
        self.sessions.insert(token.into(), user);
    }

    /// Insert or replace a content object.
    pub fn insert_object(&self, object: StoredObject) {
        self.objects.insert(object.object, object);
    }

    /// Insert a comment together with the object it was posted on.
    pub fn insert_comment(&self, comment: StoredObject, parent: ObjectRef) {
        self.parents.insert(comment.object, parent);
        self.insert_object(comment);
    }

    /// Snapshot of every activity entry, oldest first.
    pub fn activities(&self) -> Vec<ActivityEntry> {
        self.activities.read().clone()
    }

    /// Whether `user` is subscribed to `object` in the activity stream.
    pub fn is_stream_following(&self, user: UserId, object: ObjectRef) -> bool {
        self.stream_follows.contains(&(user, object))
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("objects", &self.objects.len())
            .field("users", &self.users.len())
            .field("activities", &self.activities.read().len())
            .field("follows", &self.follows.len())
            .finish()
    }
}
