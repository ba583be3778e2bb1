//! # YAML Fixtures
//!
//! Seeds a [`MemoryStore`] with users, sessions and content for local
//! development.
//!
//! ```yaml
//! users:
//!   - id: 1
//!     username: alice
//!     token: alice-dev-token
//! objects:
//!   - kind: image
//!     id: 3
//!     owner: 1
//!     fields: { slug: sunset }
//!   - kind: threadedcomment
//!     id: 9
//!     owner: 2
//!     parent: { kind: image, id: 3 }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use likes_core::{ContentKind, ObjectId, ObjectRef, UserId};

use crate::error::{StoreError, StoreResult};
use crate::memory::MemoryStore;
use crate::traits::{StoredObject, UserRecord};

/// Seed data for the in-memory store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
    #[serde(default)]
    pub users: Vec<FixtureUser>,
    #[serde(default)]
    pub objects: Vec<FixtureObject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureUser {
    pub id: UserId,
    pub username: String,
    /// Bearer token that authenticates as this user.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub num_likes: i64,
    #[serde(default)]
    pub num_dislikes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureObject {
    pub kind: ContentKind,
    pub id: ObjectId,
    #[serde(default)]
    pub owner: Option<UserId>,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    /// Commented-on object; only valid for comment kinds.
    #[serde(default)]
    pub parent: Option<ObjectRef>,
}

impl Fixture {
    pub fn from_yaml_str(yaml: &str) -> StoreResult<Self> {
        let fixture: Self =
            serde_yaml::from_str(yaml).map_err(|e| StoreError::FixtureFormat(e.to_string()))?;
        fixture.validate()?;
        Ok(fixture)
    }

    pub fn load(path: &Path) -> StoreResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| StoreError::FixtureIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    fn validate(&self) -> StoreResult<()> {
        for obj in &self.objects {
            if obj.parent.is_some() && !obj.kind.is_comment() {
                return Err(StoreError::FixtureFormat(format!(
                    "{}:{} has a parent but {} is not a comment kind",
                    obj.kind, obj.id, obj.kind
                )));
            }
        }
        Ok(())
    }

    /// Insert everything into `store`.
    pub fn apply(&self, store: &MemoryStore) {
        for user in &self.users {
            store.insert_user(UserRecord {
                id: user.id,
                username: user.username.clone(),
                num_likes: user.num_likes,
                num_dislikes: user.num_dislikes,
            });
            if let Some(token) = &user.token {
                store.insert_session(token.clone(), user.id);
            }
        }
        for obj in &self.objects {
            let stored = StoredObject {
                object: ObjectRef {
                    kind: obj.kind,
                    id: obj.id,
                },
                owner: obj.owner,
                fields: obj.fields.clone(),
            };
            match obj.parent {
                Some(parent) => store.insert_comment(stored, parent),
                None => store.insert_object(stored),
            }
        }
        tracing::info!(
            users = self.users.len(),
            objects = self.objects.len(),
            "fixture applied"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use likes_core::Lookup;

    use super::*;
    use crate::traits::{CommentStore, ObjectResolver, SessionStore, UserDirectory};

    const SAMPLE: &str = r#"
users:
  - id: 1
    username: alice
    token: alice-token
  - id: 2
    username: bob
objects:
  - kind: image
    id: 3
    owner: 1
    fields: { slug: sunset }
  - kind: threadedcomment
    id: 9
    owner: 2
    parent: { kind: image, id: 3 }
"#;

    #[test]
    fn parses_and_applies_sample() {
        let fixture = Fixture::from_yaml_str(SAMPLE).unwrap();
        let store = MemoryStore::new();
        fixture.apply(&store);

        assert_eq!(store.user_count(), 2);
        assert_eq!(store.object_count(), 2);
        assert_eq!(
            store.authenticate("alice-token").unwrap(),
            Some(UserId::new(1))
        );
        assert_eq!(
            store.get_user(UserId::new(2)).unwrap().unwrap().username,
            "bob"
        );

        let by_slug = store
            .resolve(
                ContentKind::Image,
                &Lookup::Slug {
                    field: "slug".to_string(),
                    value: "sunset".to_string(),
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(by_slug.owner, Some(UserId::new(1)));

        assert_eq!(
            store
                .commented_object(ObjectRef::new(ContentKind::ThreadedComment, 9))
                .unwrap(),
            Some(ObjectRef::new(ContentKind::Image, 3))
        );
    }

    #[test]
    fn parent_on_non_comment_is_rejected() {
        let yaml = r#"
objects:
  - kind: album
    id: 1
    parent: { kind: image, id: 3 }
"#;
        let err = Fixture::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, StoreError::FixtureFormat(_)));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Fixture::from_yaml_str("widgets: []\n").unwrap_err();
        assert!(matches!(err, StoreError::FixtureFormat(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let fixture = Fixture::load(file.path()).unwrap();
        assert_eq!(fixture.users.len(), 2);
        assert_eq!(fixture.objects.len(), 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Fixture::load(Path::new("/nonexistent/fixture.yaml")).unwrap_err();
        assert!(matches!(err, StoreError::FixtureIo { .. }));
    }
}
