//! CLI entry point for the tickdash dashboard.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use tickdash_dashboard::config::Config;
use tickdash_dashboard::error::{Error, Result};
use tickdash_dashboard::report;
use tickdash_dashboard::series::{ChartOption, TabCharts};
use tickdash_dashboard::session::Session;

#[derive(Parser)]
#[command(name = "dashboard")]
#[command(about = "Round dashboard for trading-simulation logs")]
#[command(version)]
struct Cli {
    /// Path to dashboard.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory of round folders (overrides [data].path)
    #[arg(long)]
    path: Option<PathBuf>,

    /// Team whose exposure is charted
    #[arg(long)]
    trader_name: Option<String>,

    /// Use the data directory itself as the only round
    #[arg(long)]
    dev_mode: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List round folders
    Tabs,

    /// Print per-trader activity for a round
    Stats {
        /// Round folder name
        tab: String,
    },

    /// Print dataset availability and derived row counts
    Summary {
        /// Round folder name
        tab: String,
    },

    /// Write chart series and derived rows for a round
    Export {
        /// Round folder name
        tab: String,

        /// Activity overlays to include (default: all)
        #[arg(long = "option", value_enum)]
        options: Vec<ChartOption>,
    },
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(path) = &cli.path {
        config.data.path = path.clone();
    }
    if let Some(name) = &cli.trader_name {
        config.data.trader_name = name.clone();
    }
    if cli.dev_mode {
        config.data.dev_mode = true;
    }
    config.validate()?;
    Ok(config)
}

fn run(command: Command, mut session: Session) -> Result<()> {
    match command {
        Command::Tabs => {
            session.refresh()?;
            if session.tab_names().is_empty() {
                println!("No rounds found.");
            }
            for name in session.tab_names() {
                println!("{name}");
            }
        }
        Command::Stats { tab } => {
            let view = session.open(&tab)?;
            match &view.trader_stats {
                Some(stats) => print!("{}", report::stats_table(stats)),
                None => println!("No trader statistics for {tab}: scoreboard or match events missing."),
            }
        }
        Command::Summary { tab } => {
            let view = session.open(&tab)?;
            print!("{}", report::summary(view));
        }
        Command::Export { tab, options } => {
            let options = if options.is_empty() {
                ChartOption::ALL.to_vec()
            } else {
                options
            };
            let dir = session.config().output_dir(&tab);
            let trader_name = session.config().data.trader_name.clone();
            let view = session.open(&tab)?;
            let charts = TabCharts::build(view, &options, &trader_name);
            for path in report::write_tab(view, &charts, &dir)? {
                println!("{}", path.display());
            }
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            process::exit(1);
        }
    };

    let session = match Session::new(config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run(cli.command, session) {
        match &e {
            Error::UnknownTab(name) => {
                eprintln!("No round named '{name}'. Run `dashboard tabs` to list rounds.");
                process::exit(2);
            }
            _ => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
    }
}
