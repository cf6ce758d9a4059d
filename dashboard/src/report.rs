//! Text reports and file output for a tab.

use std::path::{Path, PathBuf};

use log::info;
use tickdash::export;
use tickdash::loader::Dataset;
use tickdash::TraderStat;

use crate::error::{Error, Result};
use crate::series::TabCharts;
use crate::session::RoundView;

/// File name of the chart bundle inside a tab's output directory.
pub const CHARTS_FILE_NAME: &str = "charts.json";

/// Per-trader activity as an aligned table.
pub fn stats_table(stats: &[TraderStat]) -> String {
    let mut out = format!(
        "{:<20} {:>8} {:>8} {:>8} {:>10} {:>10} {:>10} {:>10}\n",
        "Trader", "Inserts", "Cancels", "Trades", "Lots", "Lots/s", "Cxl ratio", "Lots/trade"
    );
    for stat in stats {
        out.push_str(&format!("{stat}\n"));
    }
    out
}

/// Dataset availability and derived row counts.
pub fn summary(view: &RoundView) -> String {
    let data = &view.data;
    let mut out = format!("Round: {} ({})\n", view.name, data.folder.display());

    out.push_str("\nDATASETS:\n");
    for dataset in Dataset::ALL {
        let rows = match dataset {
            Dataset::Scoreboard => data.scoreboard.as_ref().map(Vec::len),
            Dataset::MatchEvents => data.match_events.as_ref().map(Vec::len),
            Dataset::TradesSent => data.trades_sent.as_ref().map(Vec::len),
            Dataset::TradesFilled => data.trades_filled.as_ref().map(Vec::len),
            Dataset::Prices => data.prices.as_ref().map(Vec::len),
            Dataset::OrderBook => data.order_book.as_ref().map(Vec::len),
            Dataset::TradeTicks => data.trade_ticks.as_ref().map(Vec::len),
        };
        let rejected = data.rejected.iter().filter(|(d, _)| *d == dataset).count();
        let line = match rows {
            Some(n) => format!("  {:14} {:>8} rows  {:>4} rejected\n", dataset.name(), n, rejected),
            None => format!("  {:14} {:>8}\n", dataset.name(), "missing"),
        };
        out.push_str(&line);
    }

    out.push_str("\nDERIVED:\n");
    let derived = [
        ("order book", view.order_book.as_ref().map(Vec::len)),
        ("trade ticks", view.trade_ticks.as_ref().map(Vec::len)),
        ("traders", view.trader_stats.as_ref().map(Vec::len)),
    ];
    for (label, count) in derived {
        let count = count.map_or_else(|| "skipped".to_string(), |n| n.to_string());
        out.push_str(&format!("  {label:14} {count:>8}\n"));
    }
    out
}

/// Write a tab's charts and derived rows under `dir`. Returns the files written.
pub fn write_tab(view: &RoundView, charts: &TabCharts, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|e| Error::Output {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut written = Vec::new();

    let charts_path = dir.join(CHARTS_FILE_NAME);
    let json = serde_json::to_string_pretty(charts)?;
    std::fs::write(&charts_path, json).map_err(|e| Error::Output {
        path: charts_path.clone(),
        source: e,
    })?;
    written.push(charts_path);

    if let Some(rows) = &view.order_book {
        let path = dir.join("order_book.jsonl");
        export::save_rows(rows, &path)?;
        written.push(path);
    }
    if let Some(rows) = &view.trade_ticks {
        let path = dir.join("trade_ticks.jsonl");
        export::save_rows(rows, &path)?;
        written.push(path);
    }
    if let Some(stats) = &view.trader_stats {
        let path = dir.join("trader_stats.jsonl");
        export::save_rows(stats, &path)?;
        written.push(path);
    }

    info!("{}: wrote {} file(s) to {}", view.name, written.len(), dir.display());
    Ok(written)
}
