//! Per-trader activity statistics from the match-event log.
//!
//! One pass over the events tallies inserts, cancels and trades per
//! competitor; each trader's ratios are then computed independently, so an
//! undefined ratio for one trader never affects another.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::ratio;
use crate::{MatchEvent, Operation, Time, TraderId, Volume};

/// Trading activity summary for one trader.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraderStat {
    pub trader_id: TraderId,
    /// Orders inserted
    pub inserted: u64,
    /// Orders cancelled
    pub cancelled: u64,
    /// Trade events
    pub trades: u64,
    /// Lots traded across all trade events
    pub lots_traded: Volume,
    /// Lots traded per second of round time
    pub throughput: Option<f64>,
    /// Cancelled / inserted
    pub cancel_ratio: Option<f64>,
    /// Lots per trade event
    pub avg_trade_size: Option<f64>,
}

impl TraderStat {
    fn from_tally(trader_id: &str, tally: Tally, end_time: Time) -> Self {
        let lots = tally.lots_traded as f64;
        let throughput = (end_time > 0.0).then_some(lots / end_time);
        Self {
            trader_id: trader_id.to_string(),
            inserted: tally.inserted,
            cancelled: tally.cancelled,
            trades: tally.trades,
            lots_traded: tally.lots_traded,
            throughput,
            cancel_ratio: ratio(tally.cancelled as f64, tally.inserted as f64, "cancel ratio").ok(),
            avg_trade_size: ratio(lots, tally.trades as f64, "average trade size").ok(),
        }
    }
}

fn fmt_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:>10.3}"),
        None => format!("{:>10}", "n/a"),
    }
}

impl std::fmt::Display for TraderStat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<20} {:>8} {:>8} {:>8} {:>10} {} {} {}",
            self.trader_id,
            self.inserted,
            self.cancelled,
            self.trades,
            self.lots_traded,
            fmt_ratio(self.throughput),
            fmt_ratio(self.cancel_ratio),
            fmt_ratio(self.avg_trade_size),
        )
    }
}

/// Raw counts for one competitor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Tally {
    inserted: u64,
    cancelled: u64,
    trades: u64,
    lots_traded: Volume,
}

impl Tally {
    #[inline]
    fn record(&mut self, event: &MatchEvent) {
        match event.operation {
            Operation::Insert => self.inserted += 1,
            Operation::Cancel => self.cancelled += 1,
            Operation::Trade => {
                self.trades += 1;
                self.lots_traded = self.lots_traded.saturating_add(event.volume);
            }
            Operation::Amend | Operation::Hedge => {}
        }
    }

    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    fn merge(self, other: Tally) -> Tally {
        Tally {
            inserted: self.inserted + other.inserted,
            cancelled: self.cancelled + other.cancelled,
            trades: self.trades + other.trades,
            lots_traded: self.lots_traded.saturating_add(other.lots_traded),
        }
    }
}

fn tally(events: &[MatchEvent]) -> FxHashMap<&str, Tally> {
    let mut tallies: FxHashMap<&str, Tally> = FxHashMap::default();
    for event in events {
        tallies.entry(event.competitor.as_str()).or_default().record(event);
    }
    tallies
}

fn finish<S: AsRef<str>>(
    tallies: &FxHashMap<&str, Tally>,
    end_time: Time,
    traders: &[S],
) -> Vec<TraderStat> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    traders
        .iter()
        .map(AsRef::as_ref)
        .filter(|t| seen.insert(*t))
        .map(|t| TraderStat::from_tally(t, tallies.get(t).copied().unwrap_or_default(), end_time))
        .collect()
}

/// Compute a [`TraderStat`] for every distinct trader in `traders`.
///
/// Output follows the order of `traders`; a repeated name keeps its first
/// position. Traders with no events get zero counts and undefined ratios.
/// `throughput` is undefined unless `end_time` is strictly positive.
pub fn aggregate<S: AsRef<str>>(events: &[MatchEvent], end_time: Time, traders: &[S]) -> Vec<TraderStat> {
    finish(&tally(events), end_time, traders)
}

/// [`aggregate`] with the event tally spread over the rayon pool.
///
/// Tallies are integer counts, so the result is identical to the
/// sequential pass regardless of how the events are split.
#[cfg(feature = "parallel")]
pub fn aggregate_par<S: AsRef<str> + Sync>(
    events: &[MatchEvent],
    end_time: Time,
    traders: &[S],
) -> Vec<TraderStat> {
    use rayon::prelude::*;

    let tallies = events
        .par_iter()
        .fold(FxHashMap::<&str, Tally>::default, |mut acc, event| {
            acc.entry(event.competitor.as_str()).or_default().record(event);
            acc
        })
        .reduce(FxHashMap::default, |mut acc, part| {
            for (trader, t) in part {
                let slot = acc.entry(trader).or_default();
                *slot = slot.merge(t);
            }
            acc
        });
    finish(&tallies, end_time, traders)
}

/// Competitors in the order they first appear in the log.
pub fn competitors(events: &[MatchEvent]) -> Vec<TraderId> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    events
        .iter()
        .filter(|e| seen.insert(e.competitor.as_str()))
        .map(|e| e.competitor.clone())
        .collect()
}
