// Allow our dollar.cents digit grouping convention (e.g., 100_00 = $100.00)
#![allow(clippy::inconsistent_digit_grouping)]

//! # tickdash
//!
//! Derived analytics for trading-simulation round logs: price bands and
//! volume-weighted prices from logged book snapshots, and per-trader
//! activity statistics from the exchange's match events.
//!
//! ## Features
//!
//! - **Price bands**: leading (best) and trailing (worst populated) price per side
//! - **Depth**: total resting volume and VWAP over the deeper levels
//! - **Trader activity**: throughput, cancel ratio and average trade size
//! - **Explicit absence**: empty levels and undefined ratios are `None`, never `0` or NaN
//! - **Pure and deterministic**: every derivation is a function of its input
//!
//! ## Quick Start
//!
//! ```
//! use tickdash::{BookSide, Instrument, Ladder, OrderBookRow, Price};
//!
//! // Raw log values: a price of 0 means "no order at this level"
//! let bid = Ladder::from_raw([100_00, 99_00, 0, 0, 0], [10, 20, 0, 0, 0]);
//! let ask = Ladder::from_raw([101_00, 102_00, 103_00, 0, 0], [5, 5, 10, 0, 0]);
//! let row = OrderBookRow::new(0.25, Instrument::Etf, bid, ask);
//!
//! assert_eq!(row.leading_price(BookSide::Bid), Some(Price(100_00)));
//! assert_eq!(row.trailing_price(BookSide::Bid), Some(Price(99_00)));
//! assert_eq!(row.trailing_price(BookSide::Ask), Some(Price(103_00)));
//! assert_eq!(row.total_volume(BookSide::Ask), 20);
//! ```
//!
//! ## VWAP
//!
//! The average covers levels 1..4 only; level 0 is left out.
//!
//! ```
//! use tickdash::{vwap, Ladder};
//!
//! let side = Ladder::from_raw([0, 10, 20, 0, 0], [0, 2, 3, 0, 0]);
//! assert_eq!(vwap::vwap(&side), Some(16.0));
//!
//! // Nothing resting behind the top of book: undefined, not NaN
//! let thin = Ladder::from_raw([10, 0, 0, 0, 0], [7, 0, 0, 0, 0]);
//! assert_eq!(vwap::vwap(&thin), None);
//! ```
//!
//! ## Trader Activity
//!
//! ```
//! use tickdash::{aggregate, MatchEvent};
//!
//! let events = vec![
//!     MatchEvent::insert("X"),
//!     MatchEvent::insert("X"),
//!     MatchEvent::cancel("X"),
//!     MatchEvent::trade("X", 5),
//!     MatchEvent::trade("X", 3),
//!     MatchEvent::cancel("Y"),
//! ];
//!
//! let stats = aggregate(&events, 10.0, &["X", "Y"]);
//! assert_eq!(stats[0].lots_traded, 8);
//! assert_eq!(stats[0].cancel_ratio, Some(0.5));
//! assert_eq!(stats[0].avg_trade_size, Some(4.0));
//!
//! // Y never inserted: its cancel ratio is undefined
//! assert_eq!(stats[1].cancel_ratio, None);
//! ```
//!
//! ## Derived Datasets
//!
//! ```
//! use tickdash::{build_derived_book, BookSide, Instrument, Ladder, OrderBookRow};
//!
//! let rows = vec![
//!     OrderBookRow::new(0.25, Instrument::Etf, Ladder::from_raw([100, 0, 0, 0, 0], [1, 0, 0, 0, 0]), Ladder::empty()),
//!     OrderBookRow::new(0.25, Instrument::Future, Ladder::empty(), Ladder::empty()),
//! ];
//!
//! let etf = build_derived_book(&rows, Some(Instrument::Etf));
//! assert_eq!(etf.len(), 1);
//! assert_eq!(etf[0].leading_price(BookSide::Ask), None);
//! ```
//!
//! ## Cargo Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `loader` | yes | [`loader`]: CSV ingestion of a round folder |
//! | `serde` | via `loader` | `Serialize`/`Deserialize` on every record |
//! | `export` | no | [`export`]: JSON Lines output of derived rows |
//! | `parallel` | no | rayon-backed `*_par` builders and aggregation |

pub mod activity;
pub mod band;
pub mod derive;
mod error;
mod event;
#[cfg(feature = "export")]
pub mod export;
mod level;
#[cfg(feature = "loader")]
pub mod loader;
pub mod orders;
pub mod scoreboard;
mod side;
mod snapshot;
mod types;
pub mod volume;
pub mod vwap;

// Re-export public API
pub use activity::{aggregate, competitors, TraderStat};
#[cfg(feature = "parallel")]
pub use activity::aggregate_par;
pub use band::PriceBand;
pub use derive::{build_derived_book, build_derived_ticks, DerivedBookRow, TradeTickRow};
#[cfg(feature = "parallel")]
pub use derive::{build_derived_book_par, build_derived_ticks_par};
pub use error::{Error, Result};
pub use event::{MatchEvent, Operation};
pub use level::{Ladder, LEVEL_COUNT};
pub use orders::{MidPrice, OrderRecord};
pub use scoreboard::ScoreRow;
pub use side::{BookSide, PerSide, Side};
pub use snapshot::OrderBookRow;
pub use types::{Instrument, Price, Time, TraderId, UnknownInstrument, Volume};
