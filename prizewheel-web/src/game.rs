//! Web-specific wheel engine implementation
//!
//! This module provides browser implementations of the prizewheel-game traits
//! and re-exports the core types.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::de::DeserializeOwned;

// Re-export all types from prizewheel-game
pub use prizewheel_game::*;

use crate::dom;

const PRIZES_JSON: &str = include_str!("../static/assets/data/prizes.json");
const WHEEL_JSON: &str = include_str!("../static/assets/data/wheel.json");

/// Web-specific data loader backed by embedded static assets
pub struct WebDataLoader;

#[derive(Debug, thiserror::Error)]
pub enum WebDataError {
    #[error("Unknown config: {0}")]
    UnknownConfig(String),
    #[error("Prize table error: {0}")]
    Prizes(#[from] PrizeTableError),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DataLoader for WebDataLoader {
    type Error = WebDataError;

    fn load_prize_table(&self) -> Result<PrizeTable, Self::Error> {
        Ok(PrizeTable::from_json(PRIZES_JSON)?)
    }

    fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
    where
        T: DeserializeOwned,
    {
        let json = match config_name {
            "wheel" => WHEEL_JSON,
            "prizes" => PRIZES_JSON,
            _ => return Err(WebDataError::UnknownConfig(config_name.to_string())),
        };
        serde_json::from_str(json).map_err(WebDataError::Json)
    }
}

/// `KeyValueStore` over `window.localStorage`. Missing storage reads as empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn get_item(&self, key: &str) -> Option<String> {
        dom::local_storage()
            .ok()
            .and_then(|storage| storage.get_item(key).ok().flatten())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = dom::local_storage()
            .map_err(|e| StorageError::Unavailable(dom::js_error_message(&e)))?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::WriteRejected {
                key: key.to_string(),
                reason: dom::js_error_message(&e),
            })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let storage = dom::local_storage()
            .map_err(|e| StorageError::Unavailable(dom::js_error_message(&e)))?;
        storage
            .remove_item(key)
            .map_err(|e| StorageError::Unavailable(dom::js_error_message(&e)))
    }
}

/// `Date.now()` clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> u64 {
        dom::now_ms()
    }
}

/// Seed a ChaCha stream from the page clock and `Math.random()`.
#[must_use]
pub fn entropy_rng() -> ChaCha20Rng {
    let entropy = js_sys::Date::now().to_bits() ^ js_sys::Math::random().to_bits().rotate_left(29);
    ChaCha20Rng::seed_from_u64(entropy)
}

/// Open the visitor's wheel, falling back to the built-in table if the
/// embedded assets fail to load.
pub fn open_browser_session(rng: &mut ChaCha20Rng) -> WheelSession<BrowserStore> {
    match open_session(&WebDataLoader, BrowserStore, &BrowserClock, rng) {
        Ok(session) => session,
        Err(err) => {
            log::error!("wheel assets failed to load: {err}");
            dom::console_error(&format!("wheel assets failed to load: {err}"));
            WheelSession::load(
                PrizeTable::default_table(),
                WheelConfig::default(),
                BrowserStore,
                dom::now_ms(),
                rng,
            )
        }
    }
}
