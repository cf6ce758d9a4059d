// Allow our dollar.cents digit grouping convention (e.g., 100_00 = $100.00)
#![allow(clippy::inconsistent_digit_grouping)]

//! Throughput benchmarks for the derivation layer.
//!
//! Measures:
//! - Derived order-book and trade-tick builds over a round of snapshots
//! - Trader activity aggregation over a match-event log
//! - The same builds on the rayon pool (with `--features parallel`)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tickdash::{aggregate, build_derived_book, build_derived_ticks, Instrument, Ladder, MatchEvent, OrderBookRow};

const TRADERS: [&str; 8] = ["T0", "T1", "T2", "T3", "T4", "T5", "T6", "T7"];

/// A round of snapshots alternating ETF and future, some levels empty.
fn build_rows(n: usize) -> Vec<OrderBookRow> {
    (0..n)
        .map(|i| {
            let step = (i % 7) as i64;
            let depth_gap = if i % 5 == 0 { 0 } else { 97_00 - step };
            let bid = Ladder::from_raw(
                [100_00 - step, 99_00 - step, 98_00 - step, depth_gap, 0],
                [10, 20, 30, 40, 0],
            );
            let ask = Ladder::from_raw(
                [101_00 + step, 102_00 + step, 0, 0, 0],
                [15, 25, 0, 0, 0],
            );
            let instrument = if i % 2 == 0 { Instrument::Etf } else { Instrument::Future };
            OrderBookRow::new(i as f64 * 0.25, instrument, bid, ask)
        })
        .collect()
}

fn build_events(n: usize) -> Vec<MatchEvent> {
    (0..n)
        .map(|i| {
            let trader = TRADERS[i % TRADERS.len()];
            match i % 4 {
                0 | 1 => MatchEvent::insert(trader),
                2 => MatchEvent::cancel(trader),
                _ => MatchEvent::trade(trader, (i % 50) as u64 + 1),
            }
        })
        .collect()
}

/// Benchmark: derived order book, ETF only
fn bench_derived_book(c: &mut Criterion) {
    let mut group = c.benchmark_group("derived_book");

    for rows in [1_000, 10_000, 100_000] {
        let input = build_rows(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &input, |b, input| {
            b.iter(|| black_box(build_derived_book(black_box(input), Some(Instrument::Etf))))
        });
    }

    group.finish();
}

/// Benchmark: derived trade ticks (total volume + VWAP per side)
fn bench_derived_ticks(c: &mut Criterion) {
    let mut group = c.benchmark_group("derived_ticks");

    for rows in [1_000, 10_000, 100_000] {
        let input = build_rows(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &input, |b, input| {
            b.iter(|| black_box(build_derived_ticks(black_box(input), None)))
        });
    }

    group.finish();
}

/// Benchmark: per-trader aggregation
fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for events in [10_000, 100_000, 1_000_000] {
        let input = build_events(events);
        group.throughput(Throughput::Elements(events as u64));
        group.bench_with_input(BenchmarkId::from_parameter(events), &input, |b, input| {
            b.iter(|| black_box(aggregate(black_box(input), 600.0, &TRADERS)))
        });
    }

    group.finish();
}

#[cfg(feature = "parallel")]
fn bench_parallel(c: &mut Criterion) {
    use tickdash::{aggregate_par, build_derived_book_par};

    let mut group = c.benchmark_group("parallel");
    let rows = build_rows(100_000);
    let events = build_events(1_000_000);

    group.bench_function("derived_book_100k", |b| {
        b.iter(|| black_box(build_derived_book_par(black_box(&rows), Some(Instrument::Etf))))
    });
    group.bench_function("aggregate_1m", |b| {
        b.iter(|| black_box(aggregate_par(black_box(&events), 600.0, &TRADERS)))
    });

    group.finish();
}

#[cfg(not(feature = "parallel"))]
fn bench_parallel(_c: &mut Criterion) {}

criterion_group!(
    benches,
    bench_derived_book,
    bench_derived_ticks,
    bench_aggregate,
    bench_parallel,
);
criterion_main!(benches);
