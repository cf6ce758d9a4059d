//! Sides: book side (bid/ask) for snapshots, order side (buy/sell) for records.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// Side of the order book.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BookSide {
    Bid,
    Ask,
}

impl BookSide {
    pub const ALL: [BookSide; 2] = [BookSide::Bid, BookSide::Ask];

    /// Column prefix used by the order book logs (`bidPrice0`, `askVol3`, ...).
    pub fn column_prefix(self) -> &'static str {
        match self {
            BookSide::Bid => "bid",
            BookSide::Ask => "ask",
        }
    }
}

impl fmt::Display for BookSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookSide::Bid => write!(f, "bid"),
            BookSide::Ask => write!(f, "ask"),
        }
    }
}

/// Side of an order we sent or had filled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Buy, Side::Sell];
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "BUY" | "Buy" | "buy" => Ok(Side::Buy),
            "SELL" | "Sell" | "sell" => Ok(Side::Sell),
            other => Err(format!("unknown side '{other}'")),
        }
    }
}

/// A value per book side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerSide<T> {
    pub bid: T,
    pub ask: T,
}

impl<T> PerSide<T> {
    pub fn new(bid: T, ask: T) -> Self {
        Self { bid, ask }
    }

    /// Build both sides from a function of the side.
    pub fn from_fn(mut f: impl FnMut(BookSide) -> T) -> Self {
        Self {
            bid: f(BookSide::Bid),
            ask: f(BookSide::Ask),
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PerSide<U> {
        PerSide {
            bid: f(&self.bid),
            ask: f(&self.ask),
        }
    }
}

impl<T> Index<BookSide> for PerSide<T> {
    type Output = T;

    #[inline]
    fn index(&self, side: BookSide) -> &T {
        match side {
            BookSide::Bid => &self.bid,
            BookSide::Ask => &self.ask,
        }
    }
}

impl<T> IndexMut<BookSide> for PerSide<T> {
    #[inline]
    fn index_mut(&mut self, side: BookSide) -> &mut T {
        match side {
            BookSide::Bid => &mut self.bid,
            BookSide::Ask => &mut self.ask,
        }
    }
}
