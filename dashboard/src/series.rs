//! Chart-ready series for one tab.
//!
//! Every series is a list of points; rows whose value is absent are dropped
//! here, so a renderer never sees a sentinel. Bar charts keep one bar per
//! trader and carry `null` for an undefined statistic.

use serde::Serialize;
use tickdash::{BookSide, Instrument, Side, TraderStat, orders, scoreboard};

use crate::session::RoundView;

/// Overlays the activity chart can show, one per checklist entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ChartOption {
    EtfMid,
    FutureMid,
    EtfSent,
    EtfFilled,
    FutureSent,
    FutureFilled,
    OrderBook,
    TradeTicks,
}

impl ChartOption {
    pub const ALL: [ChartOption; 8] = [
        ChartOption::EtfMid,
        ChartOption::FutureMid,
        ChartOption::EtfSent,
        ChartOption::EtfFilled,
        ChartOption::FutureSent,
        ChartOption::FutureFilled,
        ChartOption::OrderBook,
        ChartOption::TradeTicks,
    ];

    /// Checklist label.
    pub fn label(self) -> &'static str {
        match self {
            ChartOption::EtfMid => "ETF Mid",
            ChartOption::FutureMid => "Futures Mid",
            ChartOption::EtfSent => "ETF Trades Sent",
            ChartOption::EtfFilled => "ETF Trades Filled",
            ChartOption::FutureSent => "Futures Trades Sent",
            ChartOption::FutureFilled => "Futures Trades Filled",
            ChartOption::OrderBook => "Order Book",
            ChartOption::TradeTicks => "Trade Ticks",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Line,
    Markers,
    /// Filled area between `low` and `y`
    Band,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover: Option<String>,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            low: None,
            hover: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    pub points: Vec<Point>,
}

impl Series {
    fn from_pairs(name: impl Into<String>, kind: SeriesKind, pairs: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self {
            name: name.into(),
            kind,
            points: pairs.into_iter().map(|(x, y)| Point::new(x, y)).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub bars: Vec<Bar>,
}

impl BarChart {
    fn from_stats(title: &str, stats: &[TraderStat], value: impl Fn(&TraderStat) -> Option<f64>) -> Self {
        Self {
            title: title.to_string(),
            bars: stats
                .iter()
                .map(|s| Bar {
                    label: s.trader_id.clone(),
                    value: value(s),
                })
                .collect(),
        }
    }
}

/// Every chart of a tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabCharts {
    pub tab: String,
    pub activity: Vec<Series>,
    pub trades_per_second: Option<BarChart>,
    pub cancel_ratio: Option<BarChart>,
    pub lots_per_trade: Option<BarChart>,
    pub pnl: Vec<Series>,
    pub exposure: Option<Series>,
}

impl TabCharts {
    pub fn build(view: &RoundView, options: &[ChartOption], trader_name: &str) -> Self {
        let stats = view.trader_stats.as_deref();
        Self {
            tab: view.name.clone(),
            activity: activity_series(view, options),
            trades_per_second: stats.map(|s| BarChart::from_stats("Trades per second", s, |t| t.throughput)),
            cancel_ratio: stats.map(|s| BarChart::from_stats("Cancel ratio", s, |t| t.cancel_ratio)),
            lots_per_trade: stats.map(|s| BarChart::from_stats("Lots per trade", s, |t| t.avg_trade_size)),
            pnl: pnl_series(view),
            exposure: exposure_series(view, trader_name),
        }
    }
}

/// Overlays for the selected options, in checklist order.
pub fn activity_series(view: &RoundView, options: &[ChartOption]) -> Vec<Series> {
    let mut out = Vec::new();
    for option in ChartOption::ALL.into_iter().filter(|o| options.contains(o)) {
        match option {
            ChartOption::EtfMid => out.extend(mid(view, Instrument::Etf)),
            ChartOption::FutureMid => out.extend(mid(view, Instrument::Future)),
            ChartOption::EtfSent => out.extend(orders_series(view.data.trades_sent.as_deref(), Instrument::Etf, "sent")),
            ChartOption::EtfFilled => {
                out.extend(orders_series(view.data.trades_filled.as_deref(), Instrument::Etf, "filled"))
            }
            ChartOption::FutureSent => {
                out.extend(orders_series(view.data.trades_sent.as_deref(), Instrument::Future, "sent"))
            }
            ChartOption::FutureFilled => {
                out.extend(orders_series(view.data.trades_filled.as_deref(), Instrument::Future, "filled"))
            }
            ChartOption::OrderBook => out.extend(order_book_bands(view)),
            ChartOption::TradeTicks => out.extend(trade_tick_markers(view)),
        }
    }
    out
}

fn mid(view: &RoundView, instrument: Instrument) -> Option<Series> {
    let mids = view.data.prices.as_deref()?;
    Some(Series::from_pairs(
        format!("{instrument} Mid"),
        SeriesKind::Line,
        orders::mid_series(mids, instrument),
    ))
}

fn orders_series(records: Option<&[tickdash::OrderRecord]>, instrument: Instrument, what: &str) -> Vec<Series> {
    let Some(records) = records else {
        return Vec::new();
    };
    Side::ALL
        .iter()
        .map(|&side| {
            Series::from_pairs(
                format!("{instrument} {side} {what}"),
                SeriesKind::Markers,
                orders::record_series(records, instrument, side),
            )
        })
        .collect()
}

/// Leading-to-trailing band per side. Rows missing either edge are dropped.
fn order_book_bands(view: &RoundView) -> Vec<Series> {
    let Some(rows) = view.order_book.as_deref() else {
        return Vec::new();
    };
    BookSide::ALL
        .iter()
        .map(|&side| {
            let points = rows
                .iter()
                .filter_map(|r| {
                    let band = &r.band[side];
                    let (leading, trailing) = (band.leading?.as_f64(), band.trailing?.as_f64());
                    // y is the upper edge of the area
                    let (low, high) = match side {
                        BookSide::Bid => (trailing, leading),
                        BookSide::Ask => (leading, trailing),
                    };
                    Some(Point {
                        x: r.row.time,
                        y: high,
                        low: Some(low),
                        hover: None,
                    })
                })
                .collect();
            Series {
                name: format!("Orderbook {side}s"),
                kind: SeriesKind::Band,
                points,
            }
        })
        .collect()
}

/// Average traded price per side, with the traded volume on hover.
fn trade_tick_markers(view: &RoundView) -> Vec<Series> {
    let Some(rows) = view.trade_ticks.as_deref() else {
        return Vec::new();
    };
    BookSide::ALL
        .iter()
        .map(|&side| Series {
            name: format!("{side} average trade ticks"),
            kind: SeriesKind::Markers,
            points: rows
                .iter()
                .filter_map(|r| {
                    let price = r.average_price[side]?;
                    Some(Point {
                        x: r.row.time,
                        y: price,
                        low: None,
                        hover: Some(format!("volume: {}", r.total_volume[side])),
                    })
                })
                .collect(),
        })
        .collect()
}

/// Profit or loss over time, one line per team.
pub fn pnl_series(view: &RoundView) -> Vec<Series> {
    let Some(rows) = view.scoreboard.as_deref() else {
        return Vec::new();
    };
    scoreboard::teams(rows)
        .into_iter()
        .map(|team| {
            let points = scoreboard::pnl_series(rows, &team);
            Series::from_pairs(team, SeriesKind::Line, points)
        })
        .collect()
}

/// Net position of one team. `None` when the team never appears.
pub fn exposure_series(view: &RoundView, team: &str) -> Option<Series> {
    let rows = view.scoreboard.as_deref()?;
    let points = scoreboard::exposure_series(rows, team);
    if points.is_empty() {
        return None;
    }
    Some(Series::from_pairs(
        format!("{team} exposure"),
        SeriesKind::Line,
        points.into_iter().map(|(t, e)| (t, e as f64)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickdash::loader::RoundData;
    use tickdash::{Ladder, MidPrice, OrderBookRow, OrderRecord, Price, ScoreRow, build_derived_book, build_derived_ticks};

    fn book() -> Vec<OrderBookRow> {
        vec![
            OrderBookRow::new(
                1.0,
                Instrument::Etf,
                Ladder::from_raw([100, 99, 98, 0, 0], [1, 1, 1, 0, 0]),
                Ladder::from_raw([101, 102, 0, 0, 0], [2, 3, 0, 0, 0]),
            ),
            OrderBookRow::new(
                2.0,
                Instrument::Etf,
                Ladder::from_raw([100, 0, 0, 0, 0], [1, 0, 0, 0, 0]),
                Ladder::empty(),
            ),
        ]
    }

    fn view() -> RoundView {
        let data = RoundData {
            prices: Some(vec![
                MidPrice {
                    time: 1.0,
                    instrument: Instrument::Etf,
                    mid: 100.5,
                },
                MidPrice {
                    time: 1.0,
                    instrument: Instrument::Future,
                    mid: 200.0,
                },
            ]),
            trades_sent: Some(vec![OrderRecord {
                time: 1.5,
                id: 7,
                instrument: Instrument::Etf,
                side: Side::Buy,
                volume: 3,
                price: Price(100),
            }]),
            ..Default::default()
        };
        let score = |time, team: &str, pnl| ScoreRow {
            time,
            team: team.into(),
            etf_position: 2,
            future_position: -1,
            profit_or_loss: pnl,
        };
        RoundView {
            name: "r1".into(),
            data,
            scoreboard: Some(vec![score(1.0, "A", 0.0), score(1.0, "B", 1.0), score(2.0, "A", 5.0)]),
            trader_stats: None,
            order_book: Some(build_derived_book(&book(), None)),
            trade_ticks: Some(build_derived_ticks(&book(), None)),
        }
    }

    #[test]
    fn options_follow_checklist_order() {
        let series = activity_series(&view(), &[ChartOption::FutureMid, ChartOption::EtfMid]);
        let names: Vec<_> = series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["ETF Mid", "Future Mid"]);
        assert_eq!(series[0].points, vec![Point::new(1.0, 100.5)]);
    }

    #[test]
    fn sent_orders_split_by_side() {
        let series = activity_series(&view(), &[ChartOption::EtfSent]);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].name, "ETF BUY sent");
        assert_eq!(series[0].points, vec![Point::new(1.5, 100.0)]);
        assert!(series[1].points.is_empty());
    }

    #[test]
    fn missing_dataset_gives_no_series() {
        assert!(activity_series(&view(), &[ChartOption::EtfFilled]).is_empty());
    }

    #[test]
    fn order_book_band_drops_absent_edges() {
        let series = activity_series(&view(), &[ChartOption::OrderBook]);
        let (bids, asks) = (&series[0], &series[1]);
        assert_eq!(bids.name, "Orderbook bids");
        assert_eq!(bids.points.len(), 2);
        assert_eq!((bids.points[0].low, bids.points[0].y), (Some(98.0), 100.0));
        // second row has an empty ask side
        assert_eq!(asks.points.len(), 1);
        assert_eq!((asks.points[0].low, asks.points[0].y), (Some(101.0), 102.0));
    }

    #[test]
    fn trade_ticks_need_deeper_levels() {
        let series = activity_series(&view(), &[ChartOption::TradeTicks]);
        // bid average over levels 1..4 exists only for the first row
        assert_eq!(series[0].points.len(), 1);
        assert_eq!(series[0].points[0].hover.as_deref(), Some("volume: 3"));
        assert_eq!(series[1].points.len(), 1);
    }

    #[test]
    fn pnl_and_exposure() {
        let v = view();
        let pnl = pnl_series(&v);
        assert_eq!(pnl.len(), 2);
        assert_eq!(pnl[0].name, "A");
        assert_eq!(pnl[0].points.len(), 2);

        let exposure = exposure_series(&v, "B").unwrap();
        assert_eq!(exposure.points, vec![Point::new(1.0, 1.0)]);
        assert!(exposure_series(&v, "nobody").is_none());
    }

    #[test]
    fn charts_serialize_without_nulls_in_points() {
        let charts = TabCharts::build(&view(), &ChartOption::ALL, "A");
        let json = serde_json::to_value(&charts).unwrap();
        assert_eq!(json["tab"], "r1");
        assert!(json["cancel_ratio"].is_null());
        assert!(json["activity"][0]["points"][0].get("low").is_none());
    }
}
