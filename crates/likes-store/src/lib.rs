//! # likes-store — Collaborator Stores
//!
//! The vote service never owns persistence. Everything it reads or writes
//! lives behind one of the traits in [`traits`]:
//!
//! | Trait              | Collaborator                                   |
//! |--------------------|------------------------------------------------|
//! | [`ObjectResolver`] | content lookup by id or slug                   |
//! | [`CommentStore`]   | a comment's commented-on object                |
//! | [`VoteStore`]      | vote records, scores, voter lists              |
//! | [`ActivityStream`] | activity entries and stream subscriptions      |
//! | [`FollowStore`]    | follow relationships                           |
//! | [`UserDirectory`]  | user records and like/dislike counters         |
//! | [`SessionStore`]   | bearer session tokens                          |
//!
//! [`MemoryStore`] implements all of them on `DashMap`s for development and
//! tests. [`Stores`] bundles one `Arc<dyn Trait>` per collaborator so the API
//! layer can be wired to any mix of implementations.
//!
//! Storage is in-memory with no persistence; data is lost on restart.
//! [`fixture`] seeds it from a YAML file.

pub mod error;
pub mod fixture;
pub mod memory;
pub mod traits;

use std::sync::Arc;

pub use error::{StoreError, StoreResult};
pub use fixture::Fixture;
pub use memory::MemoryStore;
pub use traits::{
    ActivityStream, CommentStore, FollowStore, ObjectResolver, SessionStore, StoredObject,
    UserDirectory, UserRecord, VoteStore,
};

/// One handle per collaborator.
#[derive(Clone)]
pub struct Stores {
    pub objects: Arc<dyn ObjectResolver>,
    pub comments: Arc<dyn CommentStore>,
    pub votes: Arc<dyn VoteStore>,
    pub stream: Arc<dyn ActivityStream>,
    pub follows: Arc<dyn FollowStore>,
    pub users: Arc<dyn UserDirectory>,
    pub sessions: Arc<dyn SessionStore>,
}

impl Stores {
    /// Wire every collaborator to the same in-memory store.
    pub fn in_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            objects: store.clone(),
            comments: store.clone(),
            votes: store.clone(),
            stream: store.clone(),
            follows: store.clone(),
            users: store.clone(),
            sessions: store,
        }
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}
