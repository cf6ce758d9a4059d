//! Match events: the exchange's log of every competitor action.

use std::fmt;
use std::str::FromStr;

use crate::{Time, TraderId, Volume};

/// Action recorded in `match_events.csv`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operation {
    /// New order inserted
    Insert,
    /// Resting order amended
    Amend,
    /// Resting order cancelled
    Cancel,
    /// Order (partially) traded
    Trade,
    /// Hedge order traded against the future
    Hedge,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::Insert => "Insert",
            Operation::Amend => "Amend",
            Operation::Cancel => "Cancel",
            Operation::Trade => "Trade",
            Operation::Hedge => "Hedge",
        };
        f.write_str(s)
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Insert" => Ok(Operation::Insert),
            "Amend" => Ok(Operation::Amend),
            "Cancel" => Ok(Operation::Cancel),
            "Trade" => Ok(Operation::Trade),
            "Hedge" => Ok(Operation::Hedge),
            other => Err(format!("unknown operation '{other}'")),
        }
    }
}

/// One logged competitor action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchEvent {
    pub time: Time,
    pub competitor: TraderId,
    pub operation: Operation,
    /// Lots; only meaningful for trades
    pub volume: Volume,
}

impl MatchEvent {
    pub fn new(time: Time, competitor: impl Into<TraderId>, operation: Operation, volume: Volume) -> Self {
        Self {
            time,
            competitor: competitor.into(),
            operation,
            volume,
        }
    }

    /// An insert by `competitor` at time 0.
    pub fn insert(competitor: impl Into<TraderId>) -> Self {
        Self::new(0.0, competitor, Operation::Insert, 0)
    }

    /// A cancel by `competitor` at time 0.
    pub fn cancel(competitor: impl Into<TraderId>) -> Self {
        Self::new(0.0, competitor, Operation::Cancel, 0)
    }

    /// A trade of `volume` lots by `competitor` at time 0.
    pub fn trade(competitor: impl Into<TraderId>, volume: Volume) -> Self {
        Self::new(0.0, competitor, Operation::Trade, volume)
    }
}
