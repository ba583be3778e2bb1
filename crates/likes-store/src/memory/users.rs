use likes_core::{CounterDelta, UserId};

use super::MemoryStore;
use crate::error::StoreResult;
use crate::traits::{SessionStore, UserDirectory, UserRecord};

impl UserDirectory for MemoryStore {
    fn get_user(&self, id: UserId) -> StoreResult<Option<UserRecord>> {
        Ok(self.users.get(&id).map(|e| e.value().clone()))
    }

    fn adjust_counters(&self, id: UserId, delta: CounterDelta) -> StoreResult<()> {
        match self.users.get_mut(&id) {
            Some(mut user) => {
                user.num_likes += delta.likes;
                user.num_dislikes += delta.dislikes;
            }
            None => tracing::debug!(user = %id, "counter adjustment for unknown user ignored"),
        }
        Ok(())
    }
}

impl SessionStore for MemoryStore {
    fn authenticate(&self, token: &str) -> StoreResult<Option<UserId>> {
        Ok(self.sessions.get(token).map(|e| *e.value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> UserRecord {
        UserRecord {
            id: UserId::new(1),
            username: "alice".to_string(),
            num_likes: 0,
            num_dislikes: 0,
        }
    }

    #[test]
    fn counters_move_by_delta_and_may_go_negative() {
        let store = MemoryStore::new();
        store.insert_user(alice());

        store
            .adjust_counters(
                UserId::new(1),
                CounterDelta {
                    likes: -1,
                    dislikes: 2,
                },
            )
            .unwrap();
        let user = store.get_user(UserId::new(1)).unwrap().unwrap();
        assert_eq!(user.num_likes, -1);
        assert_eq!(user.num_dislikes, 2);
    }

    #[test]
    fn unknown_user_adjustment_is_ignored() {
        let store = MemoryStore::new();
        store
            .adjust_counters(
                UserId::new(99),
                CounterDelta {
                    likes: 1,
                    dislikes: 0,
                },
            )
            .unwrap();
        assert!(store.get_user(UserId::new(99)).unwrap().is_none());
    }

    #[test]
    fn sessions_resolve_tokens() {
        let store = MemoryStore::new();
        store.insert_session("secret-token", UserId::new(1));
        assert_eq!(
            store.authenticate("secret-token").unwrap(),
            Some(UserId::new(1))
        );
        assert_eq!(store.authenticate("other").unwrap(), None);
    }
}
