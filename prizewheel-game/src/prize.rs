//! Prize records and the ordered, validated prize table.
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::constants::PROBABILITY_TOLERANCE;

/// A single wheel segment. Serialized by value as the device's play record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prize {
    pub id: u32,
    pub name: String,
    pub probability: f64,
    /// Presentation attribute; opaque to selection.
    pub color: String,
}

impl Prize {
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>, probability: f64, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            probability,
            color: color.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PrizeTableError {
    #[error("prize table is empty")]
    Empty,
    #[error("duplicate prize id {0}")]
    DuplicateId(u32),
    #[error("prize {id} has probability {probability}, expected a value in (0, 1]")]
    ProbabilityOutOfRange { id: u32, probability: f64 },
    #[error("prize probabilities sum to {0}, expected 1.0")]
    BadTotal(f64),
    #[error("prize table JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ordered prize sequence. Order defines wheel position and the sampling walk.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PrizeTable {
    prizes: Vec<Prize>,
}

impl PrizeTable {
    /// Build a table, rejecting shapes the selector cannot sample from.
    ///
    /// # Errors
    ///
    /// Returns an error when the table is empty, ids repeat, a probability
    /// falls outside (0, 1], or the probabilities do not sum to 1.0.
    pub fn new(prizes: Vec<Prize>) -> Result<Self, PrizeTableError> {
        if prizes.is_empty() {
            return Err(PrizeTableError::Empty);
        }
        let mut seen = HashSet::with_capacity(prizes.len());
        for prize in &prizes {
            if !seen.insert(prize.id) {
                return Err(PrizeTableError::DuplicateId(prize.id));
            }
            if !prize.probability.is_finite() || prize.probability <= 0.0 || prize.probability > 1.0
            {
                return Err(PrizeTableError::ProbabilityOutOfRange {
                    id: prize.id,
                    probability: prize.probability,
                });
            }
        }
        let total: f64 = prizes.iter().map(|p| p.probability).sum();
        if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(PrizeTableError::BadTotal(total));
        }
        Ok(Self { prizes })
    }

    /// Parse a JSON array of prizes and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the table fails validation.
    pub fn from_json(json: &str) -> Result<Self, PrizeTableError> {
        let prizes: Vec<Prize> = serde_json::from_str(json)?;
        Self::new(prizes)
    }

    /// The barbershop wheel the promotion shipped with.
    #[must_use]
    pub fn default_table() -> Self {
        Self {
            prizes: vec![
                Prize::new(1, "Corte Grátis", 0.05, "#FFD700"),
                Prize::new(2, "2€ de Desconto", 0.15, "#FF6B6B"),
                Prize::new(3, "2€ de Desconto", 0.15, "#4ECDC4"),
                Prize::new(4, "1€ de Desconto", 0.25, "#45B7D1"),
                Prize::new(5, "1€ de Desconto", 0.25, "#96CEB4"),
                Prize::new(6, "3€ de Desconto", 0.10, "#FFEAA7"),
                Prize::new(7, "Sobrancelha", 0.05, "#DDA0DD"),
            ],
        }
    }

    #[must_use]
    pub fn prizes(&self) -> &[Prize] {
        &self.prizes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prizes.len()
    }

    /// Always false for a validated table; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prizes.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Prize> {
        self.prizes.get(index)
    }

    /// Wheel position of the prize with the given id.
    #[must_use]
    pub fn position_of(&self, id: u32) -> Option<usize> {
        self.prizes.iter().position(|p| p.id == id)
    }

    /// Cumulative `(lo, hi]` bands in table order; a roll equal to `hi` selects that prize.
    #[must_use]
    pub fn cumulative_bands(&self) -> Vec<(f64, f64)> {
        let mut lo = 0.0;
        self.prizes
            .iter()
            .map(|prize| {
                let hi = lo + prize.probability;
                let band = (lo, hi);
                lo = hi;
                band
            })
            .collect()
    }
}

impl Default for PrizeTable {
    fn default() -> Self {
        Self::default_table()
    }
}

impl<'de> Deserialize<'de> for PrizeTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let prizes = Vec::<Prize>::deserialize(deserializer)?;
        Self::new(prizes).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_passes_validation() {
        let table = PrizeTable::default_table();
        let rebuilt = PrizeTable::new(table.prizes().to_vec()).unwrap();
        assert_eq!(rebuilt.len(), 7);
        assert_eq!(rebuilt.position_of(3), Some(2));
        assert_eq!(rebuilt.position_of(42), None);
    }

    #[test]
    fn rejects_malformed_tables() {
        assert!(matches!(PrizeTable::new(Vec::new()), Err(PrizeTableError::Empty)));

        let dup = vec![Prize::new(1, "A", 0.5, "#000"), Prize::new(1, "B", 0.5, "#fff")];
        assert!(matches!(PrizeTable::new(dup), Err(PrizeTableError::DuplicateId(1))));

        let zero = vec![Prize::new(1, "A", 0.0, "#000"), Prize::new(2, "B", 1.0, "#fff")];
        assert!(matches!(
            PrizeTable::new(zero),
            Err(PrizeTableError::ProbabilityOutOfRange { id: 1, .. })
        ));

        let short = vec![Prize::new(1, "A", 0.5, "#000"), Prize::new(2, "B", 0.4, "#fff")];
        assert!(matches!(PrizeTable::new(short), Err(PrizeTableError::BadTotal(_))));
    }

    #[test]
    fn accepts_rounding_noise_within_tolerance() {
        let prizes = vec![
            Prize::new(1, "A", 0.1, "#000"),
            Prize::new(2, "B", 0.2, "#111"),
            Prize::new(3, "C", 0.7, "#222"),
        ];
        assert!(PrizeTable::new(prizes).is_ok());
    }

    #[test]
    fn cumulative_bands_tile_the_unit_interval() {
        let bands = PrizeTable::default_table().cumulative_bands();
        assert!(bands[0].0.abs() < f64::EPSILON);
        for pair in bands.windows(2) {
            assert!((pair[0].1 - pair[1].0).abs() < 1e-12);
        }
        assert!((bands[6].1 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn json_round_trip_validates() {
        let json = serde_json::to_string(&PrizeTable::default_table()).unwrap();
        let parsed = PrizeTable::from_json(&json).unwrap();
        assert_eq!(parsed, PrizeTable::default_table());

        let bad = r##"[{"id":1,"name":"A","probability":0.3,"color":"#000"}]"##;
        assert!(PrizeTable::from_json(bad).is_err());
        assert!(serde_json::from_str::<PrizeTable>(bad).is_err());
    }
}
