//! Resting volume across the levels of a side.

use crate::{Ladder, Volume};

/// Sum of volume at levels 0..4. Saturates instead of overflowing.
pub fn total_volume(ladder: &Ladder) -> Volume {
    ladder
        .volumes()
        .iter()
        .fold(0, |acc: Volume, &v| acc.saturating_add(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_every_level() {
        let ladder = Ladder::from_raw([5, 4, 3, 2, 1], [1, 2, 3, 4, 5]);
        assert_eq!(total_volume(&ladder), 15);
    }

    #[test]
    fn includes_level_zero() {
        let ladder = Ladder::from_raw([5, 0, 0, 0, 0], [7, 0, 0, 0, 0]);
        assert_eq!(total_volume(&ladder), 7);
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(total_volume(&Ladder::empty()), 0);
    }

    #[test]
    fn saturates() {
        let ladder = Ladder::from_raw([1; 5], [u64::MAX, 1, 0, 0, 0]);
        assert_eq!(total_volume(&ladder), u64::MAX);
    }
}
