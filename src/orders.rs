//! Our own order flow (`trades_sent.csv`, `trades_filled.csv`) and logged mids.

use crate::{Instrument, Price, Side, Time, Volume};

/// An order we sent, or a fill we received.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderRecord {
    pub time: Time,
    /// Client order id
    pub id: u64,
    pub instrument: Instrument,
    pub side: Side,
    pub volume: Volume,
    pub price: Price,
}

/// A logged mid price.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidPrice {
    pub time: Time,
    pub instrument: Instrument,
    pub mid: f64,
}

/// Records for one instrument and side, in log order.
pub fn filter_records(records: &[OrderRecord], instrument: Instrument, side: Side) -> Vec<&OrderRecord> {
    records
        .iter()
        .filter(|r| r.instrument == instrument && r.side == side)
        .collect()
}

/// `(time, price)` points for one instrument and side.
pub fn record_series(records: &[OrderRecord], instrument: Instrument, side: Side) -> Vec<(Time, f64)> {
    filter_records(records, instrument, side)
        .into_iter()
        .map(|r| (r.time, r.price.as_f64()))
        .collect()
}

/// `(time, mid)` for one instrument.
pub fn mid_series(mids: &[MidPrice], instrument: Instrument) -> Vec<(Time, f64)> {
    mids.iter()
        .filter(|m| m.instrument == instrument)
        .map(|m| (m.time, m.mid))
        .collect()
}
