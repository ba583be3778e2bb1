//! # Vote Orchestration
//!
//! Executes a vote against the collaborator stores:
//!
//! 1. Read the score, record the vote, read the score again.
//! 2. If the score changed, plan the side effects with
//!    [`likes_core::plan`] and execute them in order.
//! 3. Adjust the owner's like/dislike counters.
//! 4. Return the score as it stands after the side effects.
//!
//! The whole sequence runs under the voted object's gate in
//! [`AppState::vote_gates`]; votes on other objects proceed in parallel.
//! Vote-store failures abort the request. Side-effect and counter failures
//! are logged and skipped; the vote itself has already been recorded by then.

use likes_core::{plan, Direction, Effect, ObjectRef, Score, UserId, VoteSubject};
use likes_store::{
    ActivityStream, CommentStore, FollowStore, StoreError, StoredObject, UserDirectory,
    VoteStore,
};

use crate::error::AppError;
use crate::state::AppState;

/// Record `actor`'s vote on `object` and run the resulting side effects.
pub fn cast_vote(
    state: &AppState,
    actor: UserId,
    object: &StoredObject,
    direction: Direction,
) -> Result<Score, AppError> {
    let target = object.object;
    let votes = &state.stores.votes;

    let gate = state.vote_gates.gate(target);
    let _held = gate.lock();

    let before = votes.get_score(target)?;
    votes.record_vote(target, actor, direction)?;
    state.metrics.record_vote(direction);
    let after = votes.get_score(target)?;

    if before != after {
        let subject = resolve_subject(state, target);
        let effects = plan(
            actor,
            direction,
            &subject,
            &state.verbs,
            state.config.batching(),
        );
        tracing::debug!(
            user = %actor,
            object = %target,
            %direction,
            effects = effects.len(),
            "score changed, applying side effects"
        );
        for effect in effects {
            if let Err(e) = apply_effect(state, &effect) {
                tracing::warn!(error = %e, ?effect, "vote side effect failed");
            }
        }
        if let Some(owner) = object.owner {
            adjust_owner_counters(state, owner, direction);
        }
    } else {
        tracing::debug!(user = %actor, object = %target, %direction, "score unchanged");
    }

    Ok(votes.get_score(target)?)
}

/// The voted object plus, for comments, the object it was posted on.
///
/// A comment whose parent cannot be looked up is treated as parentless,
/// which makes its side-effect plan empty.
pub fn resolve_subject(state: &AppState, object: ObjectRef) -> VoteSubject {
    let parent = if object.kind.is_comment() {
        match state.stores.comments.commented_object(object) {
            Ok(parent) => parent,
            Err(e) => {
                tracing::warn!(error = %e, comment = %object, "commented object lookup failed");
                None
            }
        }
    } else {
        None
    };
    VoteSubject { object, parent }
}

fn apply_effect(state: &AppState, effect: &Effect) -> Result<(), StoreError> {
    let stores = &state.stores;
    let metrics = &state.metrics;

    match effect {
        Effect::SendActivity(activity) => {
            let entry = stores.stream.send(activity.clone())?;
            metrics.record_activity_sent();
            tracing::info!(
                activity_id = %entry.id,
                actor = %entry.actor,
                verb = %entry.verb,
                "activity sent"
            );
        }
        Effect::StreamFollow { actor, object } => {
            stores.stream.follow(*actor, *object)?;
            metrics.record_follow_op("stream_follow");
        }
        Effect::CreateFollow { user, object } => {
            let (_, created) = stores.follows.get_or_create(*user, *object)?;
            if created {
                metrics.record_follow_op("create");
                tracing::info!(user = %user, object = %object, "follow created");
            }
        }
        Effect::RetractActivity(filter) => {
            let removed = stores.stream.delete_matching(filter)?;
            metrics.record_activities_retracted(removed);
            tracing::info!(
                actor = %filter.actor,
                verb = %filter.verb,
                target = %filter.target,
                removed,
                "activities retracted"
            );
        }
        Effect::StreamUnfollow { actor, object } => {
            stores.stream.unfollow(*actor, *object)?;
            metrics.record_follow_op("stream_unfollow");
        }
        Effect::RemoveFollow { user, object } => {
            if stores.follows.remove(*user, *object)? {
                metrics.record_follow_op("remove");
                tracing::info!(user = %user, object = %object, "follow removed");
            }
        }
    }
    Ok(())
}

fn adjust_owner_counters(state: &AppState, owner: UserId, direction: Direction) {
    let delta = direction.owner_counter_delta();
    if delta.is_zero() {
        return;
    }
    if let Err(e) = state.stores.users.adjust_counters(owner, delta) {
        tracing::warn!(error = %e, owner = %owner, "owner counter adjustment failed");
    }
}
