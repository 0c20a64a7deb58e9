//! Per-device session identifiers.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{SESSION_PREFIX, SESSION_SUFFIX_LEN};

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque analytics tag: `session_<millis>_<base36 suffix>`. Gates nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Build a fresh identifier from the creation time and a random suffix.
    pub fn generate<R: Rng + ?Sized>(now_ms: u64, rng: &mut R) -> Self {
        let suffix: String = (0..SESSION_SUFFIX_LEN)
            .map(|_| char::from(BASE36[rng.gen_range(0..BASE36.len())]))
            .collect();
        Self(format!("{SESSION_PREFIX}_{now_ms}_{suffix}"))
    }

    /// Wrap a persisted value as-is.
    #[must_use]
    pub fn from_stored(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn generated_id_has_expected_shape() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let id = SessionId::generate(1_700_000_000_123, &mut rng);
        let parts: Vec<&str> = id.as_str().split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "session");
        assert_eq!(parts[1], "1700000000123");
        assert_eq!(parts[2].len(), SESSION_SUFFIX_LEN);
        assert!(
            parts[2]
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        );
    }

    #[test]
    fn same_seed_same_id() {
        let a = SessionId::generate(5, &mut ChaCha20Rng::seed_from_u64(99));
        let b = SessionId::generate(5, &mut ChaCha20Rng::seed_from_u64(99));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), a.as_str());
    }
}
