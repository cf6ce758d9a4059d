//! Logged book snapshots: one row of `order_book.csv` or `trade_ticks.csv`.

use crate::{BookSide, Instrument, Ladder, PerSide, Price, Time, Volume};

/// A snapshot of one instrument's top five levels at one time.
///
/// Trade-tick rows have the same shape; only their meaning differs (the
/// levels describe what traded rather than what rests).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderBookRow {
    /// Seconds since round start
    pub time: Time,
    /// Instrument the snapshot belongs to
    pub instrument: Instrument,
    /// Bid and ask ladders
    pub levels: PerSide<Ladder>,
    /// Fair value the trader logged alongside the snapshot, if any
    pub fair_value: Option<f64>,
}

impl OrderBookRow {
    pub fn new(time: Time, instrument: Instrument, bid: Ladder, ask: Ladder) -> Self {
        Self {
            time,
            instrument,
            levels: PerSide::new(bid, ask),
            fair_value: None,
        }
    }

    /// The ladder for one side.
    #[inline]
    pub fn ladder(&self, side: BookSide) -> &Ladder {
        &self.levels[side]
    }

    /// Best (leading) price on a side. See [`crate::band::leading_price`].
    pub fn leading_price(&self, side: BookSide) -> Option<Price> {
        crate::band::leading_price(self.ladder(side))
    }

    /// Worst populated (trailing) price on a side. See [`crate::band::trailing_price`].
    pub fn trailing_price(&self, side: BookSide) -> Option<Price> {
        crate::band::trailing_price(self.ladder(side))
    }

    /// Volume across all five levels of a side.
    pub fn total_volume(&self, side: BookSide) -> Volume {
        crate::volume::total_volume(self.ladder(side))
    }

    /// VWAP over levels 1..4 of a side.
    pub fn vwap(&self, side: BookSide) -> Option<f64> {
        crate::vwap::vwap(self.ladder(side))
    }

    /// Returns the spread (leading ask - leading bid), if both exist.
    pub fn spread(&self) -> Option<i64> {
        match (self.leading_price(BookSide::Bid), self.leading_price(BookSide::Ask)) {
            (Some(bid), Some(ask)) => Some(ask.0 - bid.0),
            _ => None,
        }
    }

    /// Returns the mid price ((leading bid + leading ask) / 2), if both exist.
    pub fn mid_price(&self) -> Option<f64> {
        match (self.leading_price(BookSide::Bid), self.leading_price(BookSide::Ask)) {
            (Some(bid), Some(ask)) => Some((bid.0 + ask.0) as f64 / 2.0),
            _ => None,
        }
    }
}
