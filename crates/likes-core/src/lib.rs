//! # likes-core — Foundational Types for Like/Unlike Voting
//!
//! This crate defines the vocabulary shared by every other crate in the
//! workspace: who votes, what they vote on, which direction, and what the
//! activity feed and follow graph look like afterwards. It depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `UserId`, `ObjectId` and
//!    `ActivityId` are distinct types. A user id cannot be passed where an
//!    object id is expected.
//!
//! 2. **Closed content-kind set.** [`ContentKind`] enumerates every votable
//!    model. Adding a kind forces every `match` in the dispatch table to
//!    handle it.
//!
//! 3. **Dispatch is data.** [`dispatch::rule_for`] maps a (voted kind,
//!    parent kind) pair to a [`LikeRule`]. The like plan and the unlike plan
//!    are both derived from the same rule, so the filter that retracts an
//!    activity is built from the same keys that created it.
//!
//! 4. **No I/O.** Planning returns a list of [`Effect`]s; executing them
//!    against stores is the caller's job.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `likes-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod activity;
pub mod content;
pub mod dispatch;
pub mod error;
pub mod identity;
pub mod verbs;
pub mod vote;

// Re-export primary types for ergonomic imports.
pub use activity::{ActivityEntry, ActivityFilter, Batching, Follow, NewActivity};
pub use content::{ContentKind, ObjectRef};
pub use dispatch::{plan, rule_for, Effect, LikeRule, Shape, VoteSubject};
pub use error::CoreError;
pub use identity::{ActivityId, ObjectId, UserId};
pub use verbs::{VerbKey, VerbTable};
pub use vote::{CounterDelta, Direction, Lookup, Score};
