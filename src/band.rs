//! Price bands: leading (best) and trailing (worst populated) price of a side.

use crate::{Ladder, Price};

/// The range of prices resting on one side of a snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceBand {
    /// Price at level 0, if populated
    pub leading: Option<Price>,
    /// Least competitive populated price
    pub trailing: Option<Price>,
}

impl PriceBand {
    /// Distance between leading and trailing price, if both exist.
    pub fn width(&self) -> Option<i64> {
        match (self.leading, self.trailing) {
            (Some(lead), Some(trail)) => Some((lead.0 - trail.0).abs()),
            _ => None,
        }
    }
}

/// Price at the most competitive level, `None` if that level is empty.
#[inline]
pub fn leading_price(ladder: &Ladder) -> Option<Price> {
    ladder.price(0)
}

/// First populated price scanning from level 4 toward level 0.
///
/// Empty levels are skipped, so a book with two levels reports level 1.
pub fn trailing_price(ladder: &Ladder) -> Option<Price> {
    ladder.prices().iter().rev().find_map(|p| *p)
}

/// Leading and trailing price together.
pub fn price_band(ladder: &Ladder) -> PriceBand {
    PriceBand {
        leading: leading_price(ladder),
        trailing: trailing_price(ladder),
    }
}
