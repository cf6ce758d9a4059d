//! Derived datasets: row-level derivations applied over a whole round.
//!
//! Both builders keep input order, drop rows only through the instrument
//! filter, and emit rows whose derived values are all absent.

use crate::band::{price_band, PriceBand};
use crate::{BookSide, Instrument, OrderBookRow, PerSide, Price, Volume};

/// An order-book row with its price bands attached.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedBookRow {
    pub row: OrderBookRow,
    pub band: PerSide<PriceBand>,
}

impl DerivedBookRow {
    pub fn from_row(row: OrderBookRow) -> Self {
        let band = row.levels.map(price_band);
        Self { row, band }
    }

    #[inline]
    pub fn leading_price(&self, side: BookSide) -> Option<Price> {
        self.band[side].leading
    }

    #[inline]
    pub fn trailing_price(&self, side: BookSide) -> Option<Price> {
        self.band[side].trailing
    }
}

/// A trade-tick row with total volume and VWAP attached.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TradeTickRow {
    pub row: OrderBookRow,
    /// Volume across levels 0..4
    pub total_volume: PerSide<Volume>,
    /// VWAP across levels 1..4
    pub average_price: PerSide<Option<f64>>,
}

impl TradeTickRow {
    pub fn from_row(row: OrderBookRow) -> Self {
        let total_volume = row.levels.map(crate::volume::total_volume);
        let average_price = row.levels.map(crate::vwap::vwap);
        Self {
            row,
            total_volume,
            average_price,
        }
    }
}

#[inline]
fn keep(row: &OrderBookRow, instrument_filter: Option<Instrument>) -> bool {
    instrument_filter.is_none_or(|inst| row.instrument == inst)
}

/// Attach leading/trailing prices to every row of the requested instrument.
///
/// `None` keeps every row (the caller already filtered).
pub fn build_derived_book(rows: &[OrderBookRow], instrument_filter: Option<Instrument>) -> Vec<DerivedBookRow> {
    rows.iter()
        .filter(|r| keep(r, instrument_filter))
        .cloned()
        .map(DerivedBookRow::from_row)
        .collect()
}

/// Attach total volume and VWAP to every row of the requested instrument.
pub fn build_derived_ticks(rows: &[OrderBookRow], instrument_filter: Option<Instrument>) -> Vec<TradeTickRow> {
    rows.iter()
        .filter(|r| keep(r, instrument_filter))
        .cloned()
        .map(TradeTickRow::from_row)
        .collect()
}

/// [`build_derived_book`] over the rayon pool. Output order matches input.
#[cfg(feature = "parallel")]
pub fn build_derived_book_par(rows: &[OrderBookRow], instrument_filter: Option<Instrument>) -> Vec<DerivedBookRow> {
    use rayon::prelude::*;

    rows.par_iter()
        .filter(|r| keep(r, instrument_filter))
        .cloned()
        .map(DerivedBookRow::from_row)
        .collect()
}

/// [`build_derived_ticks`] over the rayon pool. Output order matches input.
#[cfg(feature = "parallel")]
pub fn build_derived_ticks_par(rows: &[OrderBookRow], instrument_filter: Option<Instrument>) -> Vec<TradeTickRow> {
    use rayon::prelude::*;

    rows.par_iter()
        .filter(|r| keep(r, instrument_filter))
        .cloned()
        .map(TradeTickRow::from_row)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ladder;

    fn row(time: f64, instrument: Instrument, bid: [i64; 5], ask: [i64; 5]) -> OrderBookRow {
        OrderBookRow::new(
            time,
            instrument,
            Ladder::from_raw(bid, [10; 5]),
            Ladder::from_raw(ask, [10; 5]),
        )
    }

    fn round() -> Vec<OrderBookRow> {
        vec![
            row(0.25, Instrument::Etf, [100, 99, 0, 0, 0], [101, 102, 103, 0, 0]),
            row(0.25, Instrument::Future, [200, 0, 0, 0, 0], [201, 0, 0, 0, 0]),
            row(0.50, Instrument::Etf, [0; 5], [0; 5]),
            row(0.75, Instrument::Etf, [98, 97, 96, 95, 94], [99, 100, 101, 102, 103]),
        ]
    }

    #[test]
    fn book_filters_and_keeps_order() {
        let derived = build_derived_book(&round(), Some(Instrument::Etf));
        let times: Vec<f64> = derived.iter().map(|d| d.row.time).collect();
        assert_eq!(times, vec![0.25, 0.50, 0.75]);
        assert!(derived.iter().all(|d| d.row.instrument == Instrument::Etf));
    }

    #[test]
    fn book_bands() {
        let derived = build_derived_book(&round(), Some(Instrument::Etf));
        assert_eq!(derived[0].leading_price(BookSide::Bid), Some(Price(100)));
        assert_eq!(derived[0].trailing_price(BookSide::Bid), Some(Price(99)));
        assert_eq!(derived[0].trailing_price(BookSide::Ask), Some(Price(103)));
        assert_eq!(derived[2].trailing_price(BookSide::Bid), Some(Price(94)));
    }

    #[test]
    fn empty_row_is_still_emitted() {
        let derived = build_derived_book(&round(), Some(Instrument::Etf));
        let empty = &derived[1];
        assert_eq!(empty.band.bid, PriceBand::default());
        assert_eq!(empty.band.ask, PriceBand::default());
    }

    #[test]
    fn no_filter_keeps_everything() {
        assert_eq!(build_derived_book(&round(), None).len(), 4);
        assert_eq!(build_derived_ticks(&round(), None).len(), 4);
    }

    #[test]
    fn ticks_volume_and_vwap() {
        let rows = vec![OrderBookRow::new(
            1.0,
            Instrument::Etf,
            Ladder::from_raw([0, 10, 20, 0, 0], [0, 2, 3, 0, 0]),
            Ladder::from_raw([30, 0, 0, 0, 0], [4, 0, 0, 0, 0]),
        )];
        let ticks = build_derived_ticks(&rows, Some(Instrument::Etf));
        assert_eq!(ticks[0].total_volume, PerSide::new(5, 4));
        assert_eq!(ticks[0].average_price.bid, Some(16.0));
        // only level 0 traded on the ask: nothing deeper to average
        assert_eq!(ticks[0].average_price.ask, None);
    }

    #[test]
    fn idempotent() {
        let rows = round();
        assert_eq!(
            build_derived_book(&rows, Some(Instrument::Etf)),
            build_derived_book(&rows, Some(Instrument::Etf))
        );
        assert_eq!(build_derived_ticks(&rows, None), build_derived_ticks(&rows, None));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_matches_sequential() {
        let rows: Vec<OrderBookRow> = (0..500).flat_map(|_| round()).collect();
        assert_eq!(
            build_derived_book(&rows, Some(Instrument::Etf)),
            build_derived_book_par(&rows, Some(Instrument::Etf))
        );
        assert_eq!(
            build_derived_ticks(&rows, Some(Instrument::Future)),
            build_derived_ticks_par(&rows, Some(Instrument::Future))
        );
    }
}
