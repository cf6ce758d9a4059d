//! Volume-weighted average price over the deeper levels of a side.
//!
//! Level 0 is left out: the average describes liquidity behind the top of
//! book. [`crate::volume::total_volume`] still counts every level.

use std::ops::Range;

use crate::error::{ratio, Result};
use crate::level::LEVEL_COUNT;
use crate::Ladder;

/// Levels included in the average.
pub const VWAP_LEVELS: Range<usize> = 1..LEVEL_COUNT;

/// `sum(price * volume) / sum(volume)` over [`VWAP_LEVELS`].
///
/// Every level's volume enters the denominator. A level without a price
/// adds nothing to the notional, so stray volume logged there pulls the
/// average toward zero. Fails with `DivisionUndefined` when no volume rests
/// at those levels.
pub fn try_vwap(ladder: &Ladder) -> Result<f64> {
    let (notional, volume) = VWAP_LEVELS.fold((0.0_f64, 0.0_f64), |(n, v), level| {
        let vol = ladder.volume(level) as f64;
        let priced = ladder.price(level).map_or(0.0, |p| p.as_f64() * vol);
        (n + priced, v + vol)
    });
    ratio(notional, volume, "vwap")
}

/// [`try_vwap`] with the undefined case as `None`.
#[inline]
pub fn vwap(ladder: &Ladder) -> Option<f64> {
    try_vwap(ladder).ok()
}
