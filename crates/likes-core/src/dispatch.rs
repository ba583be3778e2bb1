//! # Like/Unlike Dispatch
//!
//! Turns a vote that changed an object's score into the ordered list of
//! activity-stream and follow side effects it implies.
//!
//! ## Rule Table
//!
//! | voted kind      | parent kind     | verb key              | shape    | follows |
//! |-----------------|-----------------|-----------------------|----------|---------|
//! | album           | –               | `album_like`          | direct   | no      |
//! | image           | –               | `photo_like`          | direct   | no      |
//! | review          | blogpost (like) | `review_like`         | direct   | no      |
//! | genericwish     | –               | `post_like`           | direct   | yes     |
//! | broadcastwish   | –               | `wish_like`           | direct   | yes     |
//! | broadcastdeal   | –               | `deal_like`           | direct   | yes     |
//! | threadedcomment | review          | `review_comment_like` | onparent | no      |
//! | threadedcomment | album           | `album_comment_like`  | onparent | no      |
//! | threadedcomment | image           | `image_comment_like`  | onparent | no      |
//! | threadedcomment | genericwish     | `post_comment_like`   | onparent | yes     |
//! | threadedcomment | broadcastwish   | `wish_comment_like`   | onparent | yes     |
//! | threadedcomment | broadcastdeal   | `deal_comment_like`   | onparent | yes     |
//!
//! A *direct* rule targets the voted object. An *on-parent* rule uses the
//! voted comment as action object and the comment's parent as target. A
//! rule that follows subscribes the voter to the activity target.
//!
//! Anything not in the table (users, blog posts, comments on unknown
//! parents) plans no effects.
//!
//! ## Symmetry
//!
//! [`plan`] derives both directions from one [`LikeRule`]: the retraction
//! filter is built from the verb, actor, target and action object the like
//! path sends, and every follow the like path creates is removed by the
//! unlike path.

use serde::{Deserialize, Serialize};

use crate::activity::{ActivityFilter, Batching, NewActivity};
use crate::content::{ContentKind, ObjectRef};
use crate::identity::UserId;
use crate::verbs::{VerbKey, VerbTable};
use crate::vote::Direction;

/// How the activity entry of a rule is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// `target` is the voted object; no action object.
    Direct,
    /// `action_object` is the voted comment; `target` is its parent.
    OnParent,
}

/// Dispatch configuration for one (voted kind, parent kind) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeRule {
    pub verb: VerbKey,
    pub shape: Shape,
    /// Whether liking subscribes the voter to the activity target.
    pub follows_target: bool,
    /// Parent kind the voted object must have for a like to send an entry.
    /// Retraction is not gated.
    pub requires_parent: Option<ContentKind>,
}

impl LikeRule {
    const fn direct(verb: VerbKey, follows_target: bool) -> Self {
        Self {
            verb,
            shape: Shape::Direct,
            follows_target,
            requires_parent: None,
        }
    }

    const fn on_parent(verb: VerbKey, follows_target: bool) -> Self {
        Self {
            verb,
            shape: Shape::OnParent,
            follows_target,
            requires_parent: None,
        }
    }

    /// Activity target for `subject`, or `None` when an on-parent rule has
    /// no resolved parent.
    pub fn target(&self, subject: &VoteSubject) -> Option<ObjectRef> {
        match self.shape {
            Shape::Direct => Some(subject.object),
            Shape::OnParent => subject.parent,
        }
    }

    /// Action object for `subject`.
    pub fn action_object(&self, subject: &VoteSubject) -> Option<ObjectRef> {
        match self.shape {
            Shape::Direct => None,
            Shape::OnParent => Some(subject.object),
        }
    }
}

/// Rule for a voted kind, given the kind of its parent when it is a comment.
///
/// A rule follows its activity target exactly when the target is a wish or
/// deal.
pub fn rule_for(voted: ContentKind, parent: Option<ContentKind>) -> Option<LikeRule> {
    use ContentKind as K;

    let direct = |verb| Some(LikeRule::direct(verb, voted.is_wish_or_deal()));
    let on_parent = |verb, parent: ContentKind| {
        Some(LikeRule::on_parent(verb, parent.is_wish_or_deal()))
    };

    match (voted, parent) {
        (K::Album, _) => direct(VerbKey::AlbumLike),
        (K::Image, _) => direct(VerbKey::PhotoLike),
        (K::Review, _) => Some(LikeRule {
            requires_parent: Some(K::BlogPost),
            ..LikeRule::direct(VerbKey::ReviewLike, false)
        }),
        (K::GenericWish, _) => direct(VerbKey::PostLike),
        (K::BroadcastWish, _) => direct(VerbKey::WishLike),
        (K::BroadcastDeal, _) => direct(VerbKey::DealLike),
        (K::ThreadedComment, Some(p @ K::Review)) => on_parent(VerbKey::ReviewCommentLike, p),
        (K::ThreadedComment, Some(p @ K::Album)) => on_parent(VerbKey::AlbumCommentLike, p),
        (K::ThreadedComment, Some(p @ K::Image)) => on_parent(VerbKey::ImageCommentLike, p),
        (K::ThreadedComment, Some(p @ K::GenericWish)) => on_parent(VerbKey::PostCommentLike, p),
        (K::ThreadedComment, Some(p @ K::BroadcastWish)) => {
            on_parent(VerbKey::WishCommentLike, p)
        }
        (K::ThreadedComment, Some(p @ K::BroadcastDeal)) => {
            on_parent(VerbKey::DealCommentLike, p)
        }
        (K::ThreadedComment, _) | (K::User, _) | (K::BlogPost, _) => None,
    }
}

/// One row of the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub voted: ContentKind,
    pub parent: Option<ContentKind>,
    pub rule: LikeRule,
}

/// Every rule, one row per distinct (voted kind, parent kind) pairing.
pub fn table() -> Vec<TableRow> {
    let mut rows = Vec::new();
    for voted in ContentKind::ALL {
        if voted == ContentKind::ThreadedComment {
            for parent in ContentKind::ALL {
                if let Some(rule) = rule_for(voted, Some(parent)) {
                    rows.push(TableRow {
                        voted,
                        parent: Some(parent),
                        rule,
                    });
                }
            }
        } else if let Some(rule) = rule_for(voted, None) {
            rows.push(TableRow {
                voted,
                parent: rule.requires_parent,
                rule,
            });
        }
    }
    rows
}

/// The object voted on plus, for comments, the object it comments on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteSubject {
    pub object: ObjectRef,
    pub parent: Option<ObjectRef>,
}

/// A side effect to execute against the stores, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Effect {
    /// Send an activity entry to the stream.
    SendActivity(NewActivity),
    /// Subscribe `actor` to `object` in the activity stream without
    /// emitting a follow action.
    StreamFollow { actor: UserId, object: ObjectRef },
    /// Create the follow relationship if absent.
    CreateFollow { user: UserId, object: ObjectRef },
    /// Delete every activity entry matching the filter.
    RetractActivity(ActivityFilter),
    /// Remove the stream subscription of `actor` to `object`.
    StreamUnfollow { actor: UserId, object: ObjectRef },
    /// Remove the follow relationship if present.
    RemoveFollow { user: UserId, object: ObjectRef },
}

/// Side effects of a vote by `actor` that changed the score of `subject`.
///
/// `Up` plans the like path; `Down` and `Clear` plan the unlike path.
pub fn plan(
    actor: UserId,
    direction: Direction,
    subject: &VoteSubject,
    verbs: &VerbTable,
    batching: Batching,
) -> Vec<Effect> {
    let Some(rule) = rule_for(subject.object.kind, subject.parent.map(|p| p.kind)) else {
        return Vec::new();
    };
    let Some(target) = rule.target(subject) else {
        return Vec::new();
    };
    let verb = verbs.verb(rule.verb).to_string();
    let action_object = rule.action_object(subject);

    let mut effects = Vec::with_capacity(3);
    match direction {
        Direction::Up => {
            if let Some(required) = rule.requires_parent {
                if subject.parent.map(|p| p.kind) != Some(required) {
                    return Vec::new();
                }
            }
            effects.push(Effect::SendActivity(NewActivity {
                actor,
                verb,
                action_object,
                target: Some(target),
                batching,
            }));
            if rule.follows_target {
                effects.push(Effect::StreamFollow {
                    actor,
                    object: target,
                });
                effects.push(Effect::CreateFollow {
                    user: actor,
                    object: target,
                });
            }
        }
        Direction::Down | Direction::Clear => {
            effects.push(Effect::RetractActivity(ActivityFilter {
                actor,
                verb,
                action_object,
                target,
            }));
            if rule.follows_target {
                effects.push(Effect::StreamUnfollow {
                    actor,
                    object: target,
                });
                effects.push(Effect::RemoveFollow {
                    user: actor,
                    object: target,
                });
            }
        }
    }
    effects
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;
    use crate::activity::ActivityEntry;

    /// Applies effects to plain collections the way the stores would.
    #[derive(Default)]
    struct Ledger {
        entries: Vec<ActivityEntry>,
        stream_follows: BTreeSet<(UserId, ObjectRef)>,
        follows: BTreeSet<(UserId, ObjectRef)>,
    }

    impl Ledger {
        fn apply(&mut self, effects: Vec<Effect>) {
            for effect in effects {
                match effect {
                    Effect::SendActivity(new) => self.entries.push(ActivityEntry::from_new(new)),
                    Effect::StreamFollow { actor, object } => {
                        self.stream_follows.insert((actor, object));
                    }
                    Effect::CreateFollow { user, object } => {
                        self.follows.insert((user, object));
                    }
                    Effect::RetractActivity(filter) => self.entries.retain(|e| !filter.matches(e)),
                    Effect::StreamUnfollow { actor, object } => {
                        self.stream_follows.remove(&(actor, object));
                    }
                    Effect::RemoveFollow { user, object } => {
                        self.follows.remove(&(user, object));
                    }
                }
            }
        }
    }

    fn subject(voted: ContentKind, id: u64, parent: Option<(ContentKind, u64)>) -> VoteSubject {
        VoteSubject {
            object: ObjectRef::new(voted, id),
            parent: parent.map(|(k, pid)| ObjectRef::new(k, pid)),
        }
    }

    fn like(actor: u64, s: &VoteSubject) -> Vec<Effect> {
        plan(
            UserId::new(actor),
            Direction::Up,
            s,
            &VerbTable::defaults(),
            Batching::default(),
        )
    }

    fn unlike(actor: u64, direction: Direction, s: &VoteSubject) -> Vec<Effect> {
        plan(
            UserId::new(actor),
            direction,
            s,
            &VerbTable::defaults(),
            Batching::default(),
        )
    }

    #[test]
    fn album_like_targets_album_without_action_object() {
        let s = subject(ContentKind::Album, 4, None);
        let effects = like(1, &s);
        assert_eq!(effects.len(), 1);
        match &effects[0] {
            Effect::SendActivity(a) => {
                assert_eq!(a.verb, "liked the album");
                assert_eq!(a.target, Some(s.object));
                assert_eq!(a.action_object, None);
                assert_eq!(a.batching, Batching::default());
            }
            other => panic!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn comment_on_photo_uses_comment_as_action_object() {
        let s = subject(ContentKind::ThreadedComment, 9, Some((ContentKind::Image, 3)));
        let effects = like(1, &s);
        assert_eq!(effects.len(), 1);
        match &effects[0] {
            Effect::SendActivity(a) => {
                assert_eq!(a.verb, "liked the comment on the photo");
                assert_eq!(a.action_object, Some(ObjectRef::new(ContentKind::ThreadedComment, 9)));
                assert_eq!(a.target, Some(ObjectRef::new(ContentKind::Image, 3)));
            }
            other => panic!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn wish_like_follows_the_wish() {
        let s = subject(ContentKind::BroadcastWish, 2, None);
        let effects = like(5, &s);
        assert_eq!(effects.len(), 3);
        assert!(effects.contains(&Effect::StreamFollow {
            actor: UserId::new(5),
            object: s.object
        }));
        assert!(effects.contains(&Effect::CreateFollow {
            user: UserId::new(5),
            object: s.object
        }));
    }

    #[test]
    fn generic_wish_uses_post_verb() {
        let s = subject(ContentKind::GenericWish, 2, None);
        match &like(5, &s)[0] {
            Effect::SendActivity(a) => assert_eq!(a.verb, "liked the post"),
            other => panic!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn comment_on_deal_follows_the_deal_not_the_comment() {
        let s = subject(ContentKind::ThreadedComment, 9, Some((ContentKind::BroadcastDeal, 8)));
        let effects = like(5, &s);
        assert!(effects.contains(&Effect::CreateFollow {
            user: UserId::new(5),
            object: ObjectRef::new(ContentKind::BroadcastDeal, 8)
        }));
    }

    #[test]
    fn comment_on_album_does_not_follow() {
        let s = subject(ContentKind::ThreadedComment, 9, Some((ContentKind::Album, 8)));
        let effects = like(5, &s);
        assert_eq!(effects.len(), 1);
        let effects = unlike(5, Direction::Clear, &s);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn review_like_requires_blog_post_parent() {
        let on_post = subject(ContentKind::Review, 6, Some((ContentKind::BlogPost, 1)));
        assert_eq!(like(1, &on_post).len(), 1);

        let on_album = subject(ContentKind::Review, 6, Some((ContentKind::Album, 1)));
        assert!(like(1, &on_album).is_empty());
        // Retraction is not gated on the parent kind.
        assert_eq!(unlike(1, Direction::Down, &on_album).len(), 1);
    }

    #[test]
    fn comment_on_unrecognized_parent_is_a_no_op() {
        let on_user = subject(ContentKind::ThreadedComment, 9, Some((ContentKind::User, 1)));
        assert!(like(1, &on_user).is_empty());
        assert!(unlike(1, Direction::Clear, &on_user).is_empty());

        let orphan = subject(ContentKind::ThreadedComment, 9, None);
        assert!(like(1, &orphan).is_empty());
    }

    #[test]
    fn users_and_blog_posts_have_no_rule() {
        assert!(rule_for(ContentKind::User, None).is_none());
        assert!(rule_for(ContentKind::BlogPost, None).is_none());
    }

    #[test]
    fn down_and_clear_plan_the_same_retraction() {
        let s = subject(ContentKind::ThreadedComment, 9, Some((ContentKind::GenericWish, 2)));
        assert_eq!(
            unlike(1, Direction::Down, &s),
            unlike(1, Direction::Clear, &s)
        );
    }

    #[test]
    fn configured_verbs_flow_into_both_paths() {
        let mut overrides = std::collections::BTreeMap::new();
        overrides.insert(VerbKey::PhotoLike, "hearted".to_string());
        let verbs = VerbTable::with_overrides(overrides);
        let s = subject(ContentKind::Image, 3, None);

        let up = plan(UserId::new(1), Direction::Up, &s, &verbs, Batching::default());
        let down = plan(UserId::new(1), Direction::Down, &s, &verbs, Batching::default());
        assert!(matches!(&up[0], Effect::SendActivity(a) if a.verb == "hearted"));
        assert!(matches!(&down[0], Effect::RetractActivity(f) if f.verb == "hearted"));
    }

    #[test]
    fn table_has_one_row_per_rule() {
        let rows = table();
        assert_eq!(rows.len(), 12);
        let verbs: BTreeSet<VerbKey> = rows.iter().map(|r| r.rule.verb).collect();
        assert_eq!(verbs.len(), VerbKey::ALL.len());
    }

    #[test]
    fn liking_one_rule_does_not_retract_another_on_same_target() {
        let album = (ContentKind::Album, 4);
        let direct = subject(ContentKind::Album, 4, None);
        let comment = subject(ContentKind::ThreadedComment, 9, Some(album));

        let mut ledger = Ledger::default();
        ledger.apply(like(1, &direct));
        ledger.apply(like(1, &comment));
        assert_eq!(ledger.entries.len(), 2);

        ledger.apply(unlike(1, Direction::Clear, &direct));
        assert_eq!(ledger.entries.len(), 1);
        assert_eq!(
            ledger.entries[0].action_object,
            Some(ObjectRef::new(ContentKind::ThreadedComment, 9))
        );
    }

    #[test]
    fn exactly_wish_and_deal_targets_are_followed() {
        for row in table() {
            let target_kind = match row.rule.shape {
                Shape::Direct => row.voted,
                Shape::OnParent => row.parent.expect("on-parent rows name a parent"),
            };
            assert_eq!(
                row.rule.follows_target,
                target_kind.is_wish_or_deal(),
                "{} on {:?}",
                row.voted,
                row.parent
            );
        }
    }

    fn row_strategy() -> impl Strategy<Value = TableRow> {
        let rows = table();
        (0..rows.len()).prop_map(move |i| rows[i])
    }

    proptest! {
        #[test]
        fn unlike_retracts_exactly_what_like_created(
            row in row_strategy(),
            actor in 1u64..1000,
            other_actor in 1u64..1000,
            object_id in 1u64..1000,
            parent_id in 1u64..1000,
            clear in any::<bool>(),
        ) {
            prop_assume!(actor != other_actor);
            let s = VoteSubject {
                object: ObjectRef::new(row.voted, object_id),
                parent: row.parent.map(|k| ObjectRef::new(k, parent_id)),
            };

            let mut ledger = Ledger::default();
            // Another user's like of the same object must survive.
            ledger.apply(like(other_actor, &s));
            let baseline_entries = ledger.entries.clone();
            let baseline_follows = ledger.follows.clone();
            let baseline_stream = ledger.stream_follows.clone();

            ledger.apply(like(actor, &s));
            prop_assert_eq!(ledger.entries.len(), baseline_entries.len() + 1);
            if row.rule.follows_target {
                prop_assert_eq!(ledger.follows.len(), baseline_follows.len() + 1);
            }

            let direction = if clear { Direction::Clear } else { Direction::Down };
            ledger.apply(unlike(actor, direction, &s));
            prop_assert_eq!(&ledger.entries, &baseline_entries);
            prop_assert_eq!(&ledger.follows, &baseline_follows);
            prop_assert_eq!(&ledger.stream_follows, &baseline_stream);
        }
    }
}
