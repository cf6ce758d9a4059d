//! Core types: Price, Volume, Time, Instrument

use std::fmt;
use std::str::FromStr;

/// Price in smallest units (cents), as written by the simulator logs.
///
/// `Price(10050)` represents $100.50. An empty book level is never a
/// `Price`; it is `None` wherever a level may be empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Price(pub i64);

impl Price {
    /// Map the log sentinel `0` ("no order at this level") to `None`.
    #[inline]
    pub fn from_raw(raw: i64) -> Option<Price> {
        if raw == 0 { None } else { Some(Price(raw)) }
    }

    /// The price as a float, for averaging.
    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display as dollars.cents assuming cents
        let dollars = self.0 / 100;
        let cents = (self.0 % 100).abs();
        if self.0 < 0 {
            write!(f, "-${}.{:02}", dollars.abs(), cents)
        } else {
            write!(f, "${}.{:02}", dollars, cents)
        }
    }
}

/// Lots resting at a level or traded in an event.
pub type Volume = u64;

/// Seconds since the start of the round.
pub type Time = f64;

/// Trader (competitor / team) name.
pub type TraderId = String;

/// Instruments traded in a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Instrument {
    Future,
    Etf,
}

impl Instrument {
    pub const ALL: [Instrument; 2] = [Instrument::Future, Instrument::Etf];
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instrument::Future => write!(f, "Future"),
            Instrument::Etf => write!(f, "ETF"),
        }
    }
}

/// Error for an unrecognised instrument label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownInstrument(pub String);

impl fmt::Display for UnknownInstrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown instrument '{}'", self.0)
    }
}

impl std::error::Error for UnknownInstrument {}

impl FromStr for Instrument {
    type Err = UnknownInstrument;

    /// Accepts the names used by the custom logs and the numeric codes
    /// (`0` future, `1` ETF) the price log writes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Future" | "FUTURE" | "future" | "0" => Ok(Instrument::Future),
            "ETF" | "Etf" | "etf" | "1" => Ok(Instrument::Etf),
            other => Err(UnknownInstrument(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_ordering() {
        assert!(Price(100) < Price(200));
        assert!(Price(-50) < Price(50));
        assert_eq!(Price(100), Price(100));
    }

    #[test]
    fn price_display() {
        assert_eq!(format!("{}", Price(10050)), "$100.50");
        assert_eq!(format!("{}", Price(100)), "$1.00");
        assert_eq!(format!("{}", Price(5)), "$0.05");
        assert_eq!(format!("{}", Price(-250)), "-$2.50");
    }

    #[test]
    fn zero_is_absent() {
        assert_eq!(Price::from_raw(0), None);
        assert_eq!(Price::from_raw(15_100), Some(Price(15_100)));
    }

    #[test]
    fn instrument_parse() {
        assert_eq!("ETF".parse(), Ok(Instrument::Etf));
        assert_eq!("Future".parse(), Ok(Instrument::Future));
        assert_eq!("1".parse(), Ok(Instrument::Etf));
        assert_eq!("0".parse(), Ok(Instrument::Future));
        assert_eq!(
            "Bond".parse::<Instrument>(),
            Err(UnknownInstrument("Bond".into()))
        );
    }

    #[test]
    fn instrument_display_round_trips() {
        for inst in Instrument::ALL {
            assert_eq!(inst.to_string().parse(), Ok(inst));
        }
    }
}
