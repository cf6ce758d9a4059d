//! Ladder: the fixed five levels of one side of a logged book snapshot.
//!
//! Level 0 is the most competitive. Empty levels carry `None` instead of
//! the log's `0` sentinel, so nothing downstream compares prices to zero.

use crate::{Price, Volume};

/// Number of levels the simulator publishes per side.
pub const LEVEL_COUNT: usize = 5;

/// One side of a snapshot, best level first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ladder {
    prices: [Option<Price>; LEVEL_COUNT],
    volumes: [Volume; LEVEL_COUNT],
}

impl Ladder {
    /// Create a ladder from already-typed levels.
    pub fn new(prices: [Option<Price>; LEVEL_COUNT], volumes: [Volume; LEVEL_COUNT]) -> Self {
        Self { prices, volumes }
    }

    /// Create a ladder from raw log values, where a price of `0` means
    /// "no order at this level".
    pub fn from_raw(prices: [i64; LEVEL_COUNT], volumes: [Volume; LEVEL_COUNT]) -> Self {
        Self {
            prices: prices.map(Price::from_raw),
            volumes,
        }
    }

    /// An empty ladder (no resting orders).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Price at `level`, `None` if the level is empty or out of range.
    #[inline]
    pub fn price(&self, level: usize) -> Option<Price> {
        self.prices.get(level).copied().flatten()
    }

    /// Volume at `level`, 0 if out of range.
    #[inline]
    pub fn volume(&self, level: usize) -> Volume {
        self.volumes.get(level).copied().unwrap_or(0)
    }

    #[inline]
    pub fn prices(&self) -> &[Option<Price>; LEVEL_COUNT] {
        &self.prices
    }

    #[inline]
    pub fn volumes(&self) -> &[Volume; LEVEL_COUNT] {
        &self.volumes
    }
}
