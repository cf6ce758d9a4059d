//! Session state: one derived view per round folder.
//!
//! A [`Session`] owns every tab built so far. Tabs are built the first time
//! they are seen and kept until [`Session::rebuild`] replaces them; a
//! [`Session::refresh`] only adds folders that appeared since the last scan.

use std::path::{Path, PathBuf};

use log::{info, warn};
use rustc_hash::FxHashMap;
use tickdash::loader::RoundData;
use tickdash::{
    DerivedBookRow, Error as DataError, Instrument, ScoreRow, TradeTickRow, TraderStat, scoreboard,
};

use crate::config::Config;
use crate::error::{Error, Result};

/// Tab id used for the data directory itself in dev mode.
pub const DEV_TAB: &str = ".";

/// Everything the dashboard shows for one round.
#[derive(Debug)]
pub struct RoundView {
    pub name: String,
    pub data: RoundData,
    /// Scoreboard with the warm-up rows dropped
    pub scoreboard: Option<Vec<ScoreRow>>,
    pub trader_stats: Option<Vec<TraderStat>>,
    pub order_book: Option<Vec<DerivedBookRow>>,
    pub trade_ticks: Option<Vec<TradeTickRow>>,
}

impl RoundView {
    /// Load a round folder and run every derivation its data allows.
    pub fn build(name: &str, folder: &Path, instrument: Instrument, warmup_rows: usize) -> Self {
        let data = RoundData::load(folder);

        let scoreboard = data
            .scoreboard
            .as_deref()
            .map(|rows| scoreboard::skip_warmup(rows, warmup_rows).to_vec());

        let trader_stats = match trader_stats(&data, scoreboard.as_deref()) {
            Ok(stats) => Some(stats),
            Err(e) => {
                warn!("{name}: trader statistics skipped: {e}");
                None
            }
        };

        let order_book = data
            .order_book
            .as_deref()
            .map(|rows| tickdash::build_derived_book_par(rows, Some(instrument)));
        let trade_ticks = data
            .trade_ticks
            .as_deref()
            .map(|rows| tickdash::build_derived_ticks_par(rows, Some(instrument)));

        Self {
            name: name.to_string(),
            data,
            scoreboard,
            trader_stats,
            order_book,
            trade_ticks,
        }
    }
}

/// Activity per scoreboard team, timed by the second-to-last scoreboard row.
fn trader_stats(data: &RoundData, scoreboard: Option<&[ScoreRow]>) -> tickdash::Result<Vec<TraderStat>> {
    let events = data.match_events.as_deref().ok_or_else(|| DataError::MissingData {
        dataset: "match_events",
        detail: "not loaded".into(),
    })?;
    let rows = scoreboard.ok_or_else(|| DataError::MissingData {
        dataset: "scoreboard",
        detail: "not loaded".into(),
    })?;
    let end_time = scoreboard::end_time(rows).ok_or_else(|| DataError::MissingData {
        dataset: "scoreboard",
        detail: "fewer than two rows after warm-up".into(),
    })?;
    Ok(tickdash::aggregate_par(events, end_time, &scoreboard::teams(rows)))
}

/// All tabs built so far, keyed by folder name.
#[derive(Debug)]
pub struct Session {
    config: Config,
    instrument: Instrument,
    tabs: FxHashMap<String, RoundView>,
    order: Vec<String>,
}

impl Session {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let instrument = config.instrument()?;
        Ok(Self {
            config,
            instrument,
            tabs: FxHashMap::default(),
            order: Vec::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Round folders currently present, sorted by name.
    pub fn discover(&self) -> Result<Vec<String>> {
        if self.config.data.dev_mode {
            return Ok(vec![DEV_TAB.to_string()]);
        }
        let root = &self.config.data.path;
        let entries = std::fs::read_dir(root).map_err(|e| Error::DataDir {
            path: root.clone(),
            source: e,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::DataDir {
                path: root.clone(),
                source: e,
            })?;
            if entry.path().is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Build tabs for folders not seen before. Returns the new tab names.
    pub fn refresh(&mut self) -> Result<Vec<String>> {
        let mut added = Vec::new();
        for name in self.discover()? {
            if self.tabs.contains_key(&name) {
                continue;
            }
            self.insert(&name);
            added.push(name);
        }
        if !added.is_empty() {
            info!("session: {} new tab(s), {} total", added.len(), self.order.len());
        }
        Ok(added)
    }

    /// Reload one tab from disk, replacing any earlier view.
    pub fn rebuild(&mut self, name: &str) -> Result<&RoundView> {
        if !self.discover()?.iter().any(|n| n == name) {
            return Err(Error::UnknownTab(name.to_string()));
        }
        self.insert(name);
        self.tab(name)
    }

    fn insert(&mut self, name: &str) {
        let view = RoundView::build(name, &self.folder(name), self.instrument, self.config.derive.warmup_rows);
        if self.tabs.insert(name.to_string(), view).is_none() {
            self.order.push(name.to_string());
        }
    }

    /// Folder holding a tab's logs.
    pub fn folder(&self, name: &str) -> PathBuf {
        if name == DEV_TAB {
            self.config.data.path.clone()
        } else {
            self.config.data.path.join(name)
        }
    }

    /// Tab names in the order they were first built.
    pub fn tab_names(&self) -> &[String] {
        &self.order
    }

    pub fn tab(&self, name: &str) -> Result<&RoundView> {
        self.tabs.get(name).ok_or_else(|| Error::UnknownTab(name.to_string()))
    }

    /// The tab, building it on first access.
    pub fn open(&mut self, name: &str) -> Result<&RoundView> {
        if !self.tabs.contains_key(name) {
            return self.rebuild(name);
        }
        self.tab(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(path: &Path, dev_mode: bool) -> Config {
        let mut config = Config::default();
        config.data.path = path.to_path_buf();
        config.data.dev_mode = dev_mode;
        config
    }

    fn write_round(folder: &Path) {
        std::fs::create_dir_all(folder).unwrap();
        let mut scoreboard = String::from(
            "Time,Team,Operation,BuyVolume,SellVolume,EtfPosition,FuturePosition,EtfPrice,FuturePrice,TotalFees,AccountBalance,ProfitOrLoss,Status\n",
        );
        for i in 0..3 {
            let t = 2.0 + i as f64 * 4.0;
            scoreboard.push_str(&format!("{t},A,Tick,0,0,1,-1,0,0,0,0,{i},\n"));
            scoreboard.push_str(&format!("{t},B,Tick,0,0,0,0,0,0,0,0,0,\n"));
        }
        std::fs::write(folder.join("score_board.csv"), scoreboard).unwrap();
        std::fs::write(
            folder.join("match_events.csv"),
            "Time,Competitor,Operation,OrderId,Side,Volume,Price,Lifespan,Fee\n\
             1.0,A,Insert,1,B,5,100,G,0\n\
             2.0,A,Trade,1,B,5,100,,0\n\
             3.0,B,Cancel,2,A,,,,\n",
        )
        .unwrap();
    }

    #[test]
    fn refresh_builds_each_folder_once() {
        let dir = tempfile::tempdir().unwrap();
        write_round(&dir.path().join("round_2"));
        write_round(&dir.path().join("round_1"));

        let mut session = Session::new(config_for(dir.path(), false)).unwrap();
        let added = session.refresh().unwrap();
        assert_eq!(added, vec!["round_1", "round_2"]);
        assert!(session.refresh().unwrap().is_empty());

        write_round(&dir.path().join("round_3"));
        assert_eq!(session.refresh().unwrap(), vec!["round_3"]);
        assert_eq!(session.tab_names(), ["round_1", "round_2", "round_3"]);
    }

    #[test]
    fn stats_use_scoreboard_teams_and_end_time() {
        let dir = tempfile::tempdir().unwrap();
        write_round(&dir.path().join("r"));
        let mut config = config_for(dir.path(), false);
        config.derive.warmup_rows = 0;

        let mut session = Session::new(config).unwrap();
        let view = session.open("r").unwrap();
        let stats = view.trader_stats.as_ref().unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].trader_id, "A");
        assert_eq!(stats[0].lots_traded, 5);
        // second-to-last scoreboard row is at t = 10
        assert_eq!(stats[0].throughput, Some(0.5));
        assert_eq!(stats[1].cancel_ratio, None);
    }

    #[test]
    fn warmup_larger_than_scoreboard_skips_stats() {
        let dir = tempfile::tempdir().unwrap();
        write_round(&dir.path().join("r"));
        let mut session = Session::new(config_for(dir.path(), false)).unwrap();
        let view = session.open("r").unwrap();
        assert_eq!(view.scoreboard.as_ref().map(Vec::len), Some(0));
        assert!(view.trader_stats.is_none());
    }

    #[test]
    fn missing_datasets_leave_views_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("empty")).unwrap();
        let mut session = Session::new(config_for(dir.path(), false)).unwrap();
        let view = session.open("empty").unwrap();
        assert!(view.order_book.is_none());
        assert!(view.trade_ticks.is_none());
        assert!(view.trader_stats.is_none());
    }

    #[test]
    fn dev_mode_uses_the_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_round(dir.path());
        let mut session = Session::new(config_for(dir.path(), true)).unwrap();
        assert_eq!(session.refresh().unwrap(), vec![DEV_TAB]);
        assert!(session.tab(DEV_TAB).unwrap().data.scoreboard.is_some());
    }

    #[test]
    fn unknown_tab() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(config_for(dir.path(), false)).unwrap();
        assert!(matches!(session.open("nope"), Err(Error::UnknownTab(_))));
        assert!(matches!(session.tab("nope"), Err(Error::UnknownTab(_))));
    }
}
