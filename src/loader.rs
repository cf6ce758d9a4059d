//! CSV ingestion of one round folder.
//!
//! Column lookup is by header name, so column order in the logs does not
//! matter. The order-book sentinel `0` ("no order at this level") becomes
//! `None` here and nowhere else.
//!
//! A file that does not exist, or lacks a required column, yields
//! [`Error::MissingData`] for that dataset only. Individual rows that fail
//! to parse are skipped and listed in [`Loaded::rejected`].
//!
//! # Layout
//!
//! ```text
//! <round>/score_board.csv
//! <round>/match_events.csv
//! <round>/custom_log/trades_sent.csv
//! <round>/custom_log/trades_filled.csv
//! <round>/custom_log/prices.csv
//! <round>/custom_log/order_book.csv
//! <round>/custom_log/trade_ticks.csv
//! ```

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use csv::StringRecord;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::level::LEVEL_COUNT;
use crate::{
    BookSide, Instrument, Ladder, MatchEvent, MidPrice, Operation, OrderBookRow, OrderRecord, PerSide, Price,
    ScoreRow, Side,
};

pub const SCOREBOARD_FILE_NAME: &str = "score_board.csv";
pub const MATCH_EVENTS_FILE_NAME: &str = "match_events.csv";
pub const CUSTOM_LOG_DIR: &str = "custom_log";
pub const TRADES_SENT_FILE_NAME: &str = "trades_sent.csv";
pub const TRADES_FILLED_FILE_NAME: &str = "trades_filled.csv";
pub const PRICES_FILE_NAME: &str = "prices.csv";
pub const ORDER_BOOK_FILE_NAME: &str = "order_book.csv";
pub const TRADE_TICKS_FILE_NAME: &str = "trade_ticks.csv";

/// The tables a round folder may contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dataset {
    Scoreboard,
    MatchEvents,
    TradesSent,
    TradesFilled,
    Prices,
    OrderBook,
    TradeTicks,
}

impl Dataset {
    pub const ALL: [Dataset; 7] = [
        Dataset::Scoreboard,
        Dataset::MatchEvents,
        Dataset::TradesSent,
        Dataset::TradesFilled,
        Dataset::Prices,
        Dataset::OrderBook,
        Dataset::TradeTicks,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Dataset::Scoreboard => "scoreboard",
            Dataset::MatchEvents => "match_events",
            Dataset::TradesSent => "trades_sent",
            Dataset::TradesFilled => "trades_filled",
            Dataset::Prices => "prices",
            Dataset::OrderBook => "order_book",
            Dataset::TradeTicks => "trade_ticks",
        }
    }

    /// Location of this dataset inside a round folder.
    pub fn path_in(self, folder: &Path) -> PathBuf {
        match self {
            Dataset::Scoreboard => folder.join(SCOREBOARD_FILE_NAME),
            Dataset::MatchEvents => folder.join(MATCH_EVENTS_FILE_NAME),
            Dataset::TradesSent => folder.join(CUSTOM_LOG_DIR).join(TRADES_SENT_FILE_NAME),
            Dataset::TradesFilled => folder.join(CUSTOM_LOG_DIR).join(TRADES_FILLED_FILE_NAME),
            Dataset::Prices => folder.join(CUSTOM_LOG_DIR).join(PRICES_FILE_NAME),
            Dataset::OrderBook => folder.join(CUSTOM_LOG_DIR).join(ORDER_BOOK_FILE_NAME),
            Dataset::TradeTicks => folder.join(CUSTOM_LOG_DIR).join(TRADE_TICKS_FILE_NAME),
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A row the loader skipped, with the reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejected {
    /// 1-based line in the source file
    pub line: usize,
    pub reason: String,
}

impl From<Rejected> for Error {
    fn from(r: Rejected) -> Self {
        Error::MalformedRow {
            line: r.line,
            reason: r.reason,
        }
    }
}

/// Rows read from one table, plus the rows that were skipped.
#[derive(Clone, Debug, PartialEq)]
pub struct Loaded<T> {
    pub rows: Vec<T>,
    pub rejected: Vec<Rejected>,
}

impl<T> Default for Loaded<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader)
}

fn find_column(headers: &StringRecord, name: &str, dataset: Dataset) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| Error::MissingData {
            dataset: dataset.name(),
            detail: format!("column '{name}' not found"),
        })
}

fn require_columns(headers: &StringRecord, names: &[&str], dataset: Dataset) -> Result<()> {
    names
        .iter()
        .try_for_each(|name| find_column(headers, name, dataset).map(|_| ()))
}

fn record_line(record: &StringRecord, fallback: usize) -> usize {
    record.position().map_or(fallback, |p| p.line() as usize)
}

/// Integer prices, tolerating a float rendering such as `10050.0`.
fn parse_price(s: &str) -> Option<i64> {
    s.parse::<i64>().ok().or_else(|| {
        s.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .map(|f| f as i64)
    })
}

fn parse_volume(s: &str) -> Option<u64> {
    if s.is_empty() {
        return Some(0);
    }
    s.parse::<u64>().ok().or_else(|| {
        s.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
            .map(|f| f as u64)
    })
}

/// Read rows through serde, converting each raw row with `convert`.
fn read_rows<R, Raw, T>(
    reader: R,
    dataset: Dataset,
    required: &[&str],
    convert: impl Fn(Raw) -> std::result::Result<T, String>,
) -> Result<Loaded<T>>
where
    R: Read,
    Raw: serde::de::DeserializeOwned,
{
    let mut rdr = csv_reader(reader);
    let headers = rdr.headers()?.clone();
    require_columns(&headers, required, dataset)?;

    let mut loaded = Loaded::default();
    for (index, result) in rdr.records().enumerate() {
        // header is line 1
        let fallback = index + 2;
        let outcome = result
            .map_err(|e| (fallback, e.to_string()))
            .and_then(|record| {
                let line = record_line(&record, fallback);
                record
                    .deserialize::<Raw>(Some(&headers))
                    .map_err(|e| e.to_string())
                    .and_then(&convert)
                    .map_err(|reason| (line, reason))
            });
        match outcome {
            Ok(row) => loaded.rows.push(row),
            Err((line, reason)) => loaded.rejected.push(Rejected { line, reason }),
        }
    }
    Ok(loaded)
}

// ---------------------------------------------------------------------------
// Order book / trade ticks
// ---------------------------------------------------------------------------

/// Header positions of the multi-level columns.
struct BookColumns {
    time: usize,
    instrument: usize,
    prices: PerSide<[usize; LEVEL_COUNT]>,
    volumes: PerSide<[usize; LEVEL_COUNT]>,
    fair_value: Option<usize>,
}

impl BookColumns {
    fn from_headers(headers: &StringRecord, dataset: Dataset) -> Result<Self> {
        let mut prices = PerSide::new([0; LEVEL_COUNT], [0; LEVEL_COUNT]);
        let mut volumes = PerSide::new([0; LEVEL_COUNT], [0; LEVEL_COUNT]);
        for side in BookSide::ALL {
            let prefix = side.column_prefix();
            for level in 0..LEVEL_COUNT {
                prices[side][level] = find_column(headers, &format!("{prefix}Price{level}"), dataset)?;
                volumes[side][level] = find_column(headers, &format!("{prefix}Vol{level}"), dataset)?;
            }
        }
        Ok(Self {
            time: find_column(headers, "time", dataset)?,
            instrument: find_column(headers, "instrument", dataset)?,
            prices,
            volumes,
            fair_value: headers.iter().position(|h| h == "eval"),
        })
    }

    fn parse(&self, record: &StringRecord, headers: &StringRecord) -> std::result::Result<OrderBookRow, String> {
        let field = |idx: usize| {
            record
                .get(idx)
                .ok_or_else(|| format!("missing {}", headers.get(idx).unwrap_or("column")))
        };
        let invalid = |idx: usize, value: &str| format!("invalid {} '{value}'", headers.get(idx).unwrap_or("value"));

        let raw_time = field(self.time)?;
        let time = raw_time.parse::<f64>().map_err(|_| invalid(self.time, raw_time))?;
        let instrument = field(self.instrument)?
            .parse::<Instrument>()
            .map_err(|e| e.to_string())?;

        let mut ladders = PerSide::new(Ladder::empty(), Ladder::empty());
        for side in BookSide::ALL {
            let mut prices = [None; LEVEL_COUNT];
            let mut volumes = [0; LEVEL_COUNT];
            for level in 0..LEVEL_COUNT {
                let (p_idx, v_idx) = (self.prices[side][level], self.volumes[side][level]);
                let raw_price = field(p_idx)?;
                prices[level] = Price::from_raw(parse_price(raw_price).ok_or_else(|| invalid(p_idx, raw_price))?);
                let raw_volume = field(v_idx)?;
                volumes[level] = parse_volume(raw_volume).ok_or_else(|| invalid(v_idx, raw_volume))?;
            }
            ladders[side] = Ladder::new(prices, volumes);
        }

        let fair_value = self
            .fair_value
            .and_then(|idx| record.get(idx))
            .and_then(|s| s.parse::<f64>().ok());

        Ok(OrderBookRow {
            time,
            instrument,
            levels: ladders,
            fair_value,
        })
    }
}

/// Read order-book shaped rows (`order_book.csv`, `trade_ticks.csv`).
pub fn read_book_rows<R: Read>(reader: R, dataset: Dataset) -> Result<Loaded<OrderBookRow>> {
    let mut rdr = csv_reader(reader);
    let headers = rdr.headers()?.clone();
    let columns = BookColumns::from_headers(&headers, dataset)?;

    let mut loaded = Loaded::default();
    for (index, result) in rdr.records().enumerate() {
        let fallback = index + 2;
        match result {
            Ok(record) => match columns.parse(&record, &headers) {
                Ok(row) => loaded.rows.push(row),
                Err(reason) => loaded.rejected.push(Rejected {
                    line: record_line(&record, fallback),
                    reason,
                }),
            },
            Err(e) => loaded.rejected.push(Rejected {
                line: fallback,
                reason: e.to_string(),
            }),
        }
    }
    Ok(loaded)
}

// ---------------------------------------------------------------------------
// Other tables
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawMatchEvent {
    time: f64,
    competitor: String,
    operation: String,
    #[serde(default)]
    volume: Option<String>,
}

/// Read `match_events.csv`. An empty `Volume` reads as 0.
pub fn read_match_events<R: Read>(reader: R) -> Result<Loaded<MatchEvent>> {
    read_rows(
        reader,
        Dataset::MatchEvents,
        &["Time", "Competitor", "Operation"],
        |raw: RawMatchEvent| {
            let operation = raw.operation.parse::<Operation>()?;
            let volume_text = raw.volume.unwrap_or_default();
            let volume = parse_volume(&volume_text).ok_or_else(|| format!("invalid Volume '{volume_text}'"))?;
            Ok(MatchEvent::new(raw.time, raw.competitor, operation, volume))
        },
    )
}

/// Read `score_board.csv`.
pub fn read_scoreboard<R: Read>(reader: R) -> Result<Loaded<ScoreRow>> {
    read_rows(
        reader,
        Dataset::Scoreboard,
        &["Time", "Team", "EtfPosition", "FuturePosition", "ProfitOrLoss"],
        |row: ScoreRow| Ok(row),
    )
}

#[derive(Deserialize)]
struct RawOrderRecord {
    time: f64,
    id: u64,
    instrument: String,
    side: String,
    volume: String,
    price: String,
}

/// Read `trades_sent.csv` or `trades_filled.csv`.
pub fn read_order_records<R: Read>(reader: R, dataset: Dataset) -> Result<Loaded<OrderRecord>> {
    read_rows(
        reader,
        dataset,
        &["time", "id", "instrument", "side", "volume", "price"],
        |raw: RawOrderRecord| {
            Ok(OrderRecord {
                time: raw.time,
                id: raw.id,
                instrument: raw.instrument.parse().map_err(|e: crate::UnknownInstrument| e.to_string())?,
                side: raw.side.parse()?,
                volume: parse_volume(&raw.volume).ok_or_else(|| format!("invalid volume '{}'", raw.volume))?,
                price: parse_price(&raw.price)
                    .map(Price)
                    .ok_or_else(|| format!("invalid price '{}'", raw.price))?,
            })
        },
    )
}

#[derive(Deserialize)]
struct RawMidPrice {
    time: f64,
    instrument: String,
    mid: f64,
}

/// Read `prices.csv`.
pub fn read_mid_prices<R: Read>(reader: R) -> Result<Loaded<MidPrice>> {
    read_rows(
        reader,
        Dataset::Prices,
        &["time", "instrument", "mid"],
        |raw: RawMidPrice| {
            Ok(MidPrice {
                time: raw.time,
                instrument: raw.instrument.parse().map_err(|e: crate::UnknownInstrument| e.to_string())?,
                mid: raw.mid,
            })
        },
    )
}

// ---------------------------------------------------------------------------
// Round folders
// ---------------------------------------------------------------------------

fn open(path: &Path, dataset: Dataset) -> Result<File> {
    File::open(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            Error::MissingData {
                dataset: dataset.name(),
                detail: format!("{} not found", path.display()),
            }
        } else {
            Error::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Every table of one round, each `None` when it could not be loaded.
#[derive(Debug, Default)]
pub struct RoundData {
    pub folder: PathBuf,
    pub scoreboard: Option<Vec<ScoreRow>>,
    pub match_events: Option<Vec<MatchEvent>>,
    pub trades_sent: Option<Vec<OrderRecord>>,
    pub trades_filled: Option<Vec<OrderRecord>>,
    pub prices: Option<Vec<MidPrice>>,
    pub order_book: Option<Vec<OrderBookRow>>,
    pub trade_ticks: Option<Vec<OrderBookRow>>,
    /// Rows skipped while reading, by dataset
    pub rejected: Vec<(Dataset, Rejected)>,
    /// Datasets that could not be loaded at all
    pub skipped: Vec<(Dataset, Error)>,
}

impl RoundData {
    /// Load every dataset of a round folder. Never fails as a whole: a
    /// dataset that cannot be read is left as `None` and recorded in
    /// [`RoundData::skipped`].
    pub fn load(folder: impl AsRef<Path>) -> Self {
        let folder = folder.as_ref();
        let mut round = RoundData {
            folder: folder.to_path_buf(),
            ..Default::default()
        };

        round.scoreboard = round.take(Dataset::Scoreboard, |f| read_scoreboard(f));
        round.match_events = round.take(Dataset::MatchEvents, |f| read_match_events(f));
        round.trades_sent = round.take(Dataset::TradesSent, |f| read_order_records(f, Dataset::TradesSent));
        round.trades_filled = round.take(Dataset::TradesFilled, |f| read_order_records(f, Dataset::TradesFilled));
        round.prices = round.take(Dataset::Prices, |f| read_mid_prices(f));
        round.order_book = round.take(Dataset::OrderBook, |f| read_book_rows(f, Dataset::OrderBook));
        round.trade_ticks = round.take(Dataset::TradeTicks, |f| read_book_rows(f, Dataset::TradeTicks));

        info!(
            "loaded round {}: {}/{} datasets, {} rows rejected",
            folder.display(),
            Dataset::ALL.len() - round.skipped.len(),
            Dataset::ALL.len(),
            round.rejected.len()
        );
        round
    }

    fn take<T>(&mut self, dataset: Dataset, read: impl FnOnce(io::BufReader<File>) -> Result<Loaded<T>>) -> Option<Vec<T>> {
        let path = dataset.path_in(&self.folder);
        match open(&path, dataset).and_then(|file| read(io::BufReader::new(file))) {
            Ok(loaded) => {
                for rejected in loaded.rejected {
                    debug!("{dataset}: skipped line {}: {}", rejected.line, rejected.reason);
                    self.rejected.push((dataset, rejected));
                }
                Some(loaded.rows)
            }
            Err(e) => {
                warn!("{dataset} unavailable for {}: {e}", self.folder.display());
                self.skipped.push((dataset, e));
                None
            }
        }
    }

    /// Returns true if the dataset was loaded.
    pub fn has(&self, dataset: Dataset) -> bool {
        !self.skipped.iter().any(|(d, _)| *d == dataset)
    }
}
