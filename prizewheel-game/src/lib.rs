//! Prize Wheel Engine
//!
//! Platform-agnostic core for the single-play promotional prize wheel:
//! weighted prize selection, wheel geometry, and the device-local
//! eligibility store. Rendering and real storage are supplied by the host.

pub mod constants;
pub mod prize;
pub mod rotation;
pub mod selector;
pub mod session;
pub mod spin;
pub mod storage;

// Re-export commonly used types
pub use prize::{Prize, PrizeTable, PrizeTableError};
pub use rotation::{segment_angle, segment_label_angle, target_rotation};
pub use selector::{Selection, draw, select_prize};
pub use session::SessionId;
pub use spin::{ManualClock, PendingSpin, Phase, SpinError, WheelConfig, WheelSession};
pub use storage::{EligibilityStore, MemoryStore, PlayState, StorageError};

/// Device-local key/value storage the eligibility store persists into.
/// Platform-specific implementations should provide this.
pub trait KeyValueStore {
    /// Read a value. Unavailable storage reads as absent.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Write a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be reached.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Wall-clock source in epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Trait for abstracting data loading operations
/// Platform-specific implementations should provide this
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the ordered prize table
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be loaded or fails validation.
    fn load_prize_table(&self) -> Result<PrizeTable, Self::Error>;

    /// Load configuration data for a specific system
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or parsed.
    fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
    where
        T: serde::de::DeserializeOwned;
}

/// Load the prize table and wheel config, then open the visitor's session.
///
/// # Errors
///
/// Returns an error if the prize table or wheel config cannot be loaded.
pub fn open_session<L, S, C, R>(
    loader: &L,
    backend: S,
    clock: &C,
    rng: &mut R,
) -> Result<WheelSession<S>, L::Error>
where
    L: DataLoader,
    S: KeyValueStore,
    C: Clock + ?Sized,
    R: rand::Rng + ?Sized,
{
    let table = loader.load_prize_table()?;
    let config: WheelConfig = loader.load_config("wheel")?;
    Ok(WheelSession::load(
        table,
        config,
        backend,
        clock.now_ms(),
        rng,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use serde::de::DeserializeOwned;

    #[derive(Debug, thiserror::Error)]
    enum FixtureError {
        #[error("unknown config {0}")]
        Unknown(String),
        #[error(transparent)]
        Json(#[from] serde_json::Error),
    }

    #[derive(Clone, Copy, Default)]
    struct FixtureLoader;

    impl DataLoader for FixtureLoader {
        type Error = FixtureError;

        fn load_prize_table(&self) -> Result<PrizeTable, Self::Error> {
            Ok(PrizeTable::default_table())
        }

        fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
        where
            T: DeserializeOwned,
        {
            match config_name {
                "wheel" => Ok(serde_json::from_str(
                    r#"{"base_turns": 3, "reveal_delay_ms": 500}"#,
                )?),
                other => Err(FixtureError::Unknown(other.to_string())),
            }
        }
    }

    #[test]
    fn open_session_applies_loaded_config() {
        let clock = ManualClock::starting_at(100);
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let mut wheel =
            open_session(&FixtureLoader, MemoryStore::new(), &clock, &mut rng).unwrap();
        assert_eq!(wheel.config().base_turns, 3);

        let pending = wheel.commit_selection(&mut rng, clock.now_ms()).unwrap();
        assert_eq!(pending.reveal_at_ms, 600);
        assert!(pending.rotation > 1080.0 && pending.rotation <= 1440.0);
    }

    #[test]
    fn fixture_loader_rejects_unknown_config() {
        let err = FixtureLoader
            .load_config::<WheelConfig>("missing")
            .unwrap_err();
        assert!(err.to_string().contains("missing"));
    }
}
