//! Scoreboard analytics: round horizon, teams, PnL and exposure series.

use rustc_hash::FxHashSet;

use crate::{Time, TraderId};

/// Leading scoreboard rows to ignore: the simulator's early rows are noisy.
pub const SCOREBOARD_WARMUP_ROWS: usize = 100;

/// One row of `score_board.csv`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct ScoreRow {
    pub time: Time,
    pub team: TraderId,
    pub etf_position: i64,
    pub future_position: i64,
    pub profit_or_loss: f64,
}

impl ScoreRow {
    /// Net position across both instruments.
    #[inline]
    pub fn exposure(&self) -> i64 {
        self.etf_position + self.future_position
    }
}

/// Rows after the first `warmup` rows.
pub fn skip_warmup(rows: &[ScoreRow], warmup: usize) -> &[ScoreRow] {
    rows.get(warmup..).unwrap_or(&[])
}

/// Round horizon: the time of the second-to-last row.
///
/// The final row can be written mid-update, so it is not trusted. `None`
/// with fewer than two rows.
pub fn end_time(rows: &[ScoreRow]) -> Option<Time> {
    rows.len().checked_sub(2).map(|i| rows[i].time)
}

/// Distinct teams in the order they first appear.
pub fn teams(rows: &[ScoreRow]) -> Vec<TraderId> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    rows.iter()
        .filter(|r| seen.insert(r.team.as_str()))
        .map(|r| r.team.clone())
        .collect()
}

/// `(time, profit_or_loss)` for one team.
pub fn pnl_series(rows: &[ScoreRow], team: &str) -> Vec<(Time, f64)> {
    rows.iter()
        .filter(|r| r.team == team)
        .map(|r| (r.time, r.profit_or_loss))
        .collect()
}

/// `(time, etf + future position)` for one team.
pub fn exposure_series(rows: &[ScoreRow], team: &str) -> Vec<(Time, i64)> {
    rows.iter()
        .filter(|r| r.team == team)
        .map(|r| (r.time, r.exposure()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(time: f64, team: &str, etf: i64, fut: i64, pnl: f64) -> ScoreRow {
        ScoreRow {
            time,
            team: team.into(),
            etf_position: etf,
            future_position: fut,
            profit_or_loss: pnl,
        }
    }

    fn board() -> Vec<ScoreRow> {
        vec![
            score(1.0, "Alpha", 10, -10, 0.0),
            score(1.0, "Beta", 0, 0, 0.0),
            score(2.0, "Alpha", 20, -15, 12.5),
            score(2.0, "Beta", -5, 5, -3.0),
            score(3.0, "Alpha", 0, 0, 20.0),
        ]
    }

    #[test]
    fn end_time_is_second_to_last() {
        assert_eq!(end_time(&board()), Some(2.0));
        assert_eq!(end_time(&board()[..1]), None);
        assert_eq!(end_time(&[]), None);
    }

    #[test]
    fn teams_in_first_seen_order() {
        assert_eq!(teams(&board()), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn warmup_skips_prefix() {
        let b = board();
        assert_eq!(skip_warmup(&b, 2).len(), 3);
        assert!(skip_warmup(&b, SCOREBOARD_WARMUP_ROWS).is_empty());
    }

    #[test]
    fn exposure_sums_positions() {
        assert_eq!(
            exposure_series(&board(), "Alpha"),
            vec![(1.0, 0), (2.0, 5), (3.0, 0)]
        );
    }

    #[test]
    fn pnl_per_team() {
        assert_eq!(pnl_series(&board(), "Beta"), vec![(1.0, 0.0), (2.0, -3.0)]);
        assert!(pnl_series(&board(), "Gamma").is_empty());
    }
}
