//! Device-local eligibility store.
//!
//! The play record and session id live in a key/value store the platform
//! injects. Reads never fail: missing or corrupt data means "not played".
use rand::Rng;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::KeyValueStore;
use crate::constants::{PLAYED_KEY, SESSION_KEY};
use crate::prize::Prize;
use crate::session::SessionId;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage write rejected for {key}: {reason}")]
    WriteRejected { key: String, reason: String },
}

/// Snapshot of the persisted play state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayState {
    pub has_played: bool,
    pub prior_result: Option<Prize>,
}

impl PlayState {
    #[must_use]
    pub const fn not_played() -> Self {
        Self {
            has_played: false,
            prior_result: None,
        }
    }

    #[must_use]
    pub fn played(prize: Prize) -> Self {
        Self {
            has_played: true,
            prior_result: Some(prize),
        }
    }
}

/// In-memory store. Clones share the same map so tests can inspect raw values.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Play record and session id over an injected [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct EligibilityStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> EligibilityStore<S> {
    pub const fn new(backend: S) -> Self {
        Self { backend }
    }

    pub const fn backend(&self) -> &S {
        &self.backend
    }

    /// Read the persisted play record. Absent or unparsable reads as unplayed.
    #[must_use]
    pub fn load_state(&self) -> PlayState {
        let Some(raw) = self.backend.get_item(PLAYED_KEY) else {
            return PlayState::not_played();
        };
        match serde_json::from_str::<Prize>(&raw) {
            Ok(prize) => PlayState::played(prize),
            Err(err) => {
                log::warn!("ignoring unreadable play record: {err}");
                PlayState::not_played()
            }
        }
    }

    /// Persist `prize` as this device's play record, overwriting any previous one.
    pub fn record_play(&self, prize: &Prize) {
        let json = match serde_json::to_string(prize) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("could not serialize prize {}: {err}", prize.id);
                return;
            }
        };
        if let Err(err) = self.backend.set_item(PLAYED_KEY, &json) {
            log::warn!("play record not persisted: {err}");
        }
    }

    /// Drop the play record and session id. Debug escape hatch.
    pub fn clear(&self) {
        for key in [PLAYED_KEY, SESSION_KEY] {
            if let Err(err) = self.backend.remove_item(key) {
                log::warn!("could not remove {key}: {err}");
            }
        }
    }

    /// Return the stored session id, creating and persisting one if absent.
    pub fn get_or_create_session_id<R: Rng + ?Sized>(&self, now_ms: u64, rng: &mut R) -> SessionId {
        if let Some(existing) = self.backend.get_item(SESSION_KEY).filter(|s| !s.is_empty()) {
            return SessionId::from_stored(existing);
        }
        let id = SessionId::generate(now_ms, rng);
        if let Err(err) = self.backend.set_item(SESSION_KEY, id.as_str()) {
            log::warn!("session id not persisted: {err}");
        }
        id
    }
}
