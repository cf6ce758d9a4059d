//! tickdash-dashboard: per-round dashboard data for trading-simulation logs.
//!
//! Scans a directory of round folders, loads each one with the tickdash
//! loader, derives price bands, trade-tick averages and trader statistics,
//! and writes chart-ready series for a renderer.

pub mod config;
pub mod error;
pub mod report;
pub mod series;
pub mod session;
