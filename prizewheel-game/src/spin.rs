//! Two-phase spin flow.
//!
//! `commit_selection` draws immediately and persists nothing. The play record
//! is written only by `reveal_after_delay` once the reveal deadline passes, so
//! a reload inside the window leaves the device eligible.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cell::Cell;

use crate::constants::{BASE_TURNS, REVEAL_DELAY_MS};
use crate::prize::{Prize, PrizeTable};
use crate::rotation::target_rotation;
use crate::selector::draw;
use crate::session::SessionId;
use crate::storage::EligibilityStore;
use crate::{Clock, KeyValueStore};

/// Wheel tuning loaded alongside the prize table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    pub base_turns: u32,
    pub reveal_delay_ms: u64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            base_turns: BASE_TURNS,
            reveal_delay_ms: REVEAL_DELAY_MS,
        }
    }
}

impl WheelConfig {
    /// Parse wheel tuning from JSON; missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A drawn but not yet revealed result.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSpin {
    pub prize: Prize,
    pub index: usize,
    pub rotation: f64,
    pub reveal_at_ms: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Ready,
    Spinning(PendingSpin),
    Played(Prize),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpinError {
    #[error("this device has already played")]
    AlreadyPlayed,
    #[error("a spin is already in progress")]
    SpinInProgress,
    #[error("no spin is waiting to be revealed")]
    NothingPending,
    #[error("reveal not due for another {remaining_ms} ms")]
    RevealNotDue { remaining_ms: u64 },
}

/// One visitor's wheel: table, config, store, and the transient UI phase.
#[derive(Debug)]
pub struct WheelSession<S: KeyValueStore> {
    table: PrizeTable,
    config: WheelConfig,
    store: EligibilityStore<S>,
    session_id: SessionId,
    phase: Phase,
}

impl<S: KeyValueStore> WheelSession<S> {
    /// Load prior-play state and the session id from `backend`.
    pub fn load<R: Rng + ?Sized>(
        table: PrizeTable,
        config: WheelConfig,
        backend: S,
        now_ms: u64,
        rng: &mut R,
    ) -> Self {
        let store = EligibilityStore::new(backend);
        let state = store.load_state();
        let session_id = store.get_or_create_session_id(now_ms, rng);
        let phase = match state.prior_result {
            Some(prize) => Phase::Played(prize),
            None => Phase::Ready,
        };
        log::info!("wheel session {session_id} loaded (played: {})", state.has_played);
        Self {
            table,
            config,
            store,
            session_id,
            phase,
        }
    }

    /// Draw the prize and compute the wheel angle. Persists nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SpinError::AlreadyPlayed`] or [`SpinError::SpinInProgress`]
    /// when the wheel is not ready.
    pub fn commit_selection<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        now_ms: u64,
    ) -> Result<PendingSpin, SpinError> {
        match self.phase {
            Phase::Played(_) => return Err(SpinError::AlreadyPlayed),
            Phase::Spinning(_) => return Err(SpinError::SpinInProgress),
            Phase::Ready => {}
        }
        let selection = draw(&self.table, rng);
        let pending = PendingSpin {
            rotation: target_rotation(selection.index, self.table.len(), self.config.base_turns),
            index: selection.index,
            prize: selection.prize,
            reveal_at_ms: now_ms.saturating_add(self.config.reveal_delay_ms),
        };
        self.phase = Phase::Spinning(pending.clone());
        Ok(pending)
    }

    /// Reveal and persist the pending prize once its deadline has passed.
    ///
    /// # Errors
    ///
    /// Returns [`SpinError::NothingPending`] without a pending spin, or
    /// [`SpinError::RevealNotDue`] if called before the deadline.
    pub fn reveal_after_delay(&mut self, now_ms: u64) -> Result<Prize, SpinError> {
        let Phase::Spinning(pending) = &self.phase else {
            return Err(SpinError::NothingPending);
        };
        if now_ms < pending.reveal_at_ms {
            return Err(SpinError::RevealNotDue {
                remaining_ms: pending.reveal_at_ms - now_ms,
            });
        }
        let prize = pending.prize.clone();
        self.store.record_play(&prize);
        log::info!("session {} won prize {} ({})", self.session_id, prize.id, prize.name);
        self.phase = Phase::Played(prize.clone());
        Ok(prize)
    }

    /// Drop an in-flight spin without persisting it, as a page reload would.
    pub fn abandon(&mut self) -> Option<PendingSpin> {
        if !self.is_spinning() {
            return None;
        }
        match std::mem::replace(&mut self.phase, Phase::Ready) {
            Phase::Spinning(pending) => {
                log::debug!("abandoned pending prize {}", pending.prize.id);
                Some(pending)
            }
            _ => None,
        }
    }

    /// Wipe the play record and session id, re-enabling play.
    pub fn clear(&mut self) {
        self.store.clear();
        self.phase = Phase::Ready;
        log::info!("cleared play data for session {}", self.session_id);
    }

    #[must_use]
    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub const fn is_played(&self) -> bool {
        matches!(self.phase, Phase::Played(_))
    }

    #[must_use]
    pub const fn is_spinning(&self) -> bool {
        matches!(self.phase, Phase::Spinning(_))
    }

    #[must_use]
    pub const fn prior_result(&self) -> Option<&Prize> {
        match &self.phase {
            Phase::Played(prize) => Some(prize),
            _ => None,
        }
    }

    #[must_use]
    pub const fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    #[must_use]
    pub const fn table(&self) -> &PrizeTable {
        &self.table
    }

    #[must_use]
    pub const fn config(&self) -> &WheelConfig {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &EligibilityStore<S> {
        &self.store
    }
}

/// Clock driven by hand, for exercising reveal deadlines in tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    #[must_use]
    pub const fn starting_at(now_ms: u64) -> Self {
        Self {
            now: Cell::new(now_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}
