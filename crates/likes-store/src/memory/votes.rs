use likes_core::{Direction, ObjectRef, Score, UserId};

use super::{MemoryStore, VoteRecord};
use crate::error::StoreResult;
use crate::traits::VoteStore;

impl VoteStore for MemoryStore {
    fn record_vote(
        &self,
        object: ObjectRef,
        user: UserId,
        direction: Direction,
    ) -> StoreResult<()> {
        let mut votes = self.votes.entry(object).or_default();
        let existing = votes.iter().position(|v| v.user == user);
        match (direction, existing) {
            (Direction::Clear, Some(idx)) => {
                votes.remove(idx);
            }
            (Direction::Clear, None) => {}
            (_, Some(idx)) => votes[idx].value = direction.value(),
            (_, None) => votes.push(VoteRecord {
                user,
                value: direction.value(),
            }),
        }
        Ok(())
    }

    fn get_score(&self, object: ObjectRef) -> StoreResult<Score> {
        Ok(self
            .votes
            .get(&object)
            .map(|votes| Score {
                score: votes.iter().map(|v| i64::from(v.value)).sum(),
                num_votes: votes.len() as u64,
            })
            .unwrap_or_default())
    }

    fn get_voters(&self, object: ObjectRef) -> StoreResult<Vec<UserId>> {
        Ok(self
            .votes
            .get(&object)
            .map(|votes| votes.iter().map(|v| v.user).collect())
            .unwrap_or_default())
    }

    fn get_voters_inc(
        &self,
        object: ObjectRef,
        offset: usize,
        limit: usize,
    ) -> StoreResult<Vec<UserId>> {
        Ok(self
            .votes
            .get(&object)
            .map(|votes| {
                votes
                    .iter()
                    .skip(offset)
                    .take(limit)
                    .map(|v| v.user)
                    .collect()
            })
            .unwrap_or_default())
    }
}
