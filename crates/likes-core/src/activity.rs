//! # Activity Entries and Follows
//!
//! An activity entry records "actor did verb (via action object) to
//! target". Entries created by a like are later retracted through an
//! [`ActivityFilter`] built from the same keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::content::ObjectRef;
use crate::identity::{ActivityId, UserId};

/// Feed batching metadata attached to every entry sent by a like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batching {
    pub batch_time_minutes: u32,
    pub is_batchable: bool,
}

impl Default for Batching {
    fn default() -> Self {
        Self {
            batch_time_minutes: 30,
            is_batchable: true,
        }
    }
}

/// An activity entry about to be sent to the stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewActivity {
    pub actor: UserId,
    pub verb: String,
    pub action_object: Option<ObjectRef>,
    pub target: Option<ObjectRef>,
    pub batching: Batching,
}

/// A stored activity entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActivityEntry {
    pub id: ActivityId,
    pub actor: UserId,
    pub verb: String,
    pub action_object: Option<ObjectRef>,
    pub target: Option<ObjectRef>,
    pub timestamp: DateTime<Utc>,
    pub batch_time_minutes: u32,
    pub is_batchable: bool,
}

impl ActivityEntry {
    /// Stamp a new activity with an id and the current time.
    pub fn from_new(new: NewActivity) -> Self {
        Self {
            id: ActivityId::new(),
            actor: new.actor,
            verb: new.verb,
            action_object: new.action_object,
            target: new.target,
            timestamp: Utc::now(),
            batch_time_minutes: new.batching.batch_time_minutes,
            is_batchable: new.batching.is_batchable,
        }
    }
}

/// Selects activity entries to retract.
///
/// `actor`, `verb` and `target` must match exactly. When `action_object`
/// is `None` the filter does not constrain the action object, which is how
/// entries created without one are addressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityFilter {
    pub actor: UserId,
    pub verb: String,
    pub action_object: Option<ObjectRef>,
    pub target: ObjectRef,
}

impl ActivityFilter {
    pub fn matches(&self, entry: &ActivityEntry) -> bool {
        entry.actor == self.actor
            && entry.verb == self.verb
            && entry.target == Some(self.target)
            && match self.action_object {
                Some(ao) => entry.action_object == Some(ao),
                None => true,
            }
    }
}

/// A follow relationship in the follow store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Follow {
    pub user: UserId,
    pub object: ObjectRef,
    pub created_at: DateTime<Utc>,
}
