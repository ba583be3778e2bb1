//! # Application State
//!
//! Shared state passed to every handler via the `State` extractor.
//!
//! AppState holds handles, not data: the votes, activity feed, follows and
//! users all live behind the collaborator traits in `likes-store`. Cloning
//! is cheap.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;

use likes_core::{ObjectRef, VerbTable};
use likes_store::{Fixture, MemoryStore, StoreError, Stores};

use crate::config::AppConfig;
use crate::middleware::metrics::ApiMetrics;

#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    /// Verb strings, fixed for the life of the process.
    pub verbs: Arc<VerbTable>,
    pub config: Arc<AppConfig>,
    pub metrics: ApiMetrics,
    pub vote_gates: VoteGates,
}

/// One mutex per voted object.
///
/// A vote holds its object's gate for the whole score-before, record,
/// score-after, side-effect sequence. Votes on different objects do not
/// contend. Entries are never evicted, so the map grows with the number of
/// distinct objects voted on.
#[derive(Clone, Default)]
pub struct VoteGates {
    gates: Arc<DashMap<ObjectRef, Arc<Mutex<()>>>>,
}

impl VoteGates {
    /// The gate for `object`, created on first use.
    pub fn gate(&self, object: ObjectRef) -> Arc<Mutex<()>> {
        self.gates.entry(object).or_default().clone()
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}

impl AppState {
    /// Default configuration over an empty in-memory store.
    pub fn new() -> Self {
        Self::with_stores(
            AppConfig::default(),
            Stores::in_memory(Arc::new(MemoryStore::new())),
        )
    }

    pub fn with_stores(config: AppConfig, stores: Stores) -> Self {
        Self {
            stores,
            verbs: Arc::new(config.verbs.clone()),
            config: Arc::new(config),
            metrics: ApiMetrics::new(),
            vote_gates: VoteGates::default(),
        }
    }

    /// Build an in-memory deployment, seeding it from `config.fixture`.
    pub fn from_config(config: AppConfig) -> Result<Self, StoreError> {
        let memory = Arc::new(MemoryStore::new());
        if let Some(path) = &config.fixture {
            Fixture::load(path)?.apply(&memory);
            tracing::info!(path = %path.display(), "in-memory stores seeded from fixture");
        }
        Ok(Self::with_stores(config, Stores::in_memory(memory)))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("stores", &self.stores)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use likes_core::{ContentKind, ObjectRef, UserId};
    use likes_store::{ObjectResolver, SessionStore};

    use super::*;

    #[test]
    fn from_config_applies_fixture() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"users:\n  - id: 1\n    username: alice\n    token: t1\nobjects:\n  - kind: album\n    id: 2\n    owner: 1\n",
        )
        .unwrap();
        let config = AppConfig {
            fixture: Some(file.path().to_path_buf()),
            ..AppConfig::default()
        };

        let state = AppState::from_config(config).unwrap();
        assert_eq!(
            state.stores.sessions.authenticate("t1").unwrap(),
            Some(UserId::new(1))
        );
        assert!(state
            .stores
            .objects
            .get(ObjectRef::new(ContentKind::Album, 2))
            .unwrap()
            .is_some());
    }

    #[test]
    fn gates_are_per_object() {
        let gates = VoteGates::default();
        let photo = ObjectRef::new(ContentKind::Image, 3);
        let album = ObjectRef::new(ContentKind::Album, 3);

        let photo_gate = gates.gate(photo);
        let _held = photo_gate.lock();
        assert!(gates.gate(album).try_lock().is_some());
        assert!(gates.gate(photo).try_lock().is_none());
        assert!(Arc::ptr_eq(&photo_gate, &gates.gate(photo)));
        assert_eq!(gates.len(), 2);
    }

    #[test]
    fn missing_fixture_is_an_error() {
        let config = AppConfig {
            fixture: Some("/nonexistent/seed.yaml".into()),
            ..AppConfig::default()
        };
        assert!(matches!(
            AppState::from_config(config),
            Err(StoreError::FixtureIo { .. })
        ));
    }
}
