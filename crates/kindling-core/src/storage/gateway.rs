//! Persistence gateway: where the engine's snapshot lives between visits.
//!
//! `load` never fails. A missing snapshot means a fresh install, and an
//! unreadable one is logged and replaced by defaults. `save` writes the
//! local cache synchronously so the next `load` sees it immediately, then
//! hands the snapshot to the optional remote mirror without waiting.

use std::cell::{Cell, RefCell};
use std::sync::Arc;

use super::config::Config;
use super::database::Database;
use crate::error::CoreError;
use crate::state::AppState;
use crate::sync::{get_or_create_device_id, HttpRemoteStore, RemoteMirror};

/// Key of the snapshot in the local kv store.
pub const APP_STATE_KEY: &str = "app_state";

pub trait PersistenceGateway {
    /// Last saved state merged over defaults.
    fn load(&self) -> AppState;

    /// Write `state` to the local cache and start any remote mirroring.
    ///
    /// # Errors
    /// Returns an error only when the local write fails.
    fn save(&self, state: &AppState) -> Result<(), CoreError>;
}

impl<G: PersistenceGateway + ?Sized> PersistenceGateway for &G {
    fn load(&self) -> AppState {
        (**self).load()
    }

    fn save(&self, state: &AppState) -> Result<(), CoreError> {
        (**self).save(state)
    }
}

fn decode_snapshot(json: &str) -> AppState {
    AppState::from_json(json).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "stored snapshot unreadable; starting from defaults");
        AppState::default()
    })
}

/// In-process gateway. Snapshots still go through JSON so tests exercise
/// the same encoding as the on-disk cache.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    snapshot: RefCell<Option<String>>,
    saves: Cell<usize>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway pre-seeded with `state`.
    pub fn with_state(state: &AppState) -> Self {
        let gateway = Self::new();
        *gateway.snapshot.borrow_mut() = state.to_json().ok();
        gateway
    }

    /// Gateway holding raw snapshot text, valid or not.
    pub fn with_snapshot(json: impl Into<String>) -> Self {
        let gateway = Self::new();
        *gateway.snapshot.borrow_mut() = Some(json.into());
        gateway
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves.get()
    }
}

impl PersistenceGateway for MemoryGateway {
    fn load(&self) -> AppState {
        match self.snapshot.borrow().as_deref() {
            Some(json) => decode_snapshot(json),
            None => AppState::default(),
        }
    }

    fn save(&self, state: &AppState) -> Result<(), CoreError> {
        *self.snapshot.borrow_mut() = Some(state.to_json()?);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

/// SQLite-backed gateway with an optional remote mirror.
pub struct LocalGateway {
    db: Database,
    mirror: Option<RemoteMirror>,
}

impl LocalGateway {
    pub fn new(db: Database) -> Self {
        Self { db, mirror: None }
    }

    pub fn with_mirror(mut self, mirror: RemoteMirror) -> Self {
        self.mirror = Some(mirror);
        self
    }

    /// Open the default database and wire the HTTP mirror when sync is
    /// enabled in `config`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened, the sync endpoint
    /// is invalid, or the mirror cannot be started.
    pub fn open(config: &Config) -> Result<Self, CoreError> {
        let db = Database::open()?;
        let Some(endpoint) = config.sync.endpoint_url()? else {
            return Ok(Self::new(db));
        };

        let device_id = get_or_create_device_id(&db)?;
        let store = HttpRemoteStore::new(&endpoint, &device_id, config.sync.timeout())?;
        tracing::debug!(url = %store.url(), "remote mirror enabled");
        let mirror = RemoteMirror::new(Arc::new(store))?;
        Ok(Self::new(db).with_mirror(mirror))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn mirror(&self) -> Option<&RemoteMirror> {
        self.mirror.as_ref()
    }
}

impl PersistenceGateway for LocalGateway {
    fn load(&self) -> AppState {
        match self.db.kv_get(APP_STATE_KEY) {
            Ok(Some(json)) => decode_snapshot(&json),
            Ok(None) => AppState::default(),
            Err(e) => {
                tracing::warn!(error = %e, "local cache unreadable; starting from defaults");
                AppState::default()
            }
        }
    }

    fn save(&self, state: &AppState) -> Result<(), CoreError> {
        let json = state.to_json()?;
        self.db.kv_set(APP_STATE_KEY, &json)?;
        if let Some(mirror) = &self.mirror {
            // Not awaited: the local write above is what the engine relies on.
            drop(mirror.push(json));
        }
        Ok(())
    }
}
