use chrono::Utc;

use likes_core::{ActivityEntry, ActivityFilter, Follow, NewActivity, ObjectRef, UserId};

use super::MemoryStore;
use crate::error::StoreResult;
use crate::traits::{ActivityStream, FollowStore};

impl ActivityStream for MemoryStore {
    fn send(&self, activity: NewActivity) -> StoreResult<ActivityEntry> {
        let entry = ActivityEntry::from_new(activity);
        self.activities.write().push(entry.clone());
        tracing::debug!(activity_id = %entry.id, verb = %entry.verb, "activity stored");
        Ok(entry)
    }

    fn follow(&self, actor: UserId, object: ObjectRef) -> StoreResult<()> {
        self.stream_follows.insert((actor, object));
        Ok(())
    }

    fn unfollow(&self, actor: UserId, object: ObjectRef) -> StoreResult<()> {
        self.stream_follows.remove(&(actor, object));
        Ok(())
    }

    fn delete_matching(&self, filter: &ActivityFilter) -> StoreResult<usize> {
        let mut entries = self.activities.write();
        let before = entries.len();
        entries.retain(|e| !filter.matches(e));
        Ok(before - entries.len())
    }
}

impl FollowStore for MemoryStore {
    fn get_or_create(&self, user: UserId, object: ObjectRef) -> StoreResult<(Follow, bool)> {
        let mut created = false;
        let follow = self
            .follows
            .entry((user, object))
            .or_insert_with(|| {
                created = true;
                Follow {
                    user,
                    object,
                    created_at: Utc::now(),
                }
            })
            .clone();
        Ok((follow, created))
    }

    fn get_follows(&self, object: ObjectRef) -> StoreResult<Vec<Follow>> {
        let mut follows: Vec<Follow> = self
            .follows
            .iter()
            .filter(|e| e.key().1 == object)
            .map(|e| e.value().clone())
            .collect();
        follows.sort_by_key(|f| f.created_at);
        Ok(follows)
    }

    fn remove(&self, user: UserId, object: ObjectRef) -> StoreResult<bool> {
        Ok(self.follows.remove(&(user, object)).is_some())
    }
}
