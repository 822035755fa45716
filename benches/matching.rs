//! Benchmarks for the matching engine.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark
//! cargo bench -- submit_resting
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use iceberg_matcher::{Order, OrderBook, Side};

// ============================================================================
// HELPER FUNCTIONS - Deterministic order generation
// ============================================================================

fn buy(id: u64, price: u32, quantity: u64) -> Order {
    Order::new(Side::Buy, id, price, quantity, None).unwrap()
}

fn sell(id: u64, price: u32, quantity: u64) -> Order {
    Order::new(Side::Sell, id, price, quantity, None).unwrap()
}

/// Pre-populate a book with sell orders at ascending price levels.
fn populate_asks(book: &mut OrderBook, count: usize, base_price: u32, quantity: u64) {
    for i in 0..count {
        let price = base_price + (i % 50) as u32;
        book.submit(sell(1_000_000 + i as u64, price, quantity))
            .unwrap();
    }
}

/// Pre-populate a book with iceberg sells stacked on one price level.
fn populate_iceberg_level(book: &mut OrderBook, count: usize, price: u32) {
    for i in 0..count {
        let order = Order::new(Side::Sell, 2_000_000 + i as u64, price, 10_000, Some(500)).unwrap();
        book.submit(order).unwrap();
    }
}

/// Generate a deterministic mixed order flow (same seed = same orders).
fn generate_order_batch(count: usize, seed: u64) -> Vec<Order> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let side = if rng.gen_bool(0.5) {
                Side::Buy
            } else {
                Side::Sell
            };
            let price: u32 = rng.gen_range(90..=110);
            let quantity: u64 = rng.gen_range(1..=10_000);
            let peak = if rng.gen_bool(0.33) {
                Some(rng.gen_range(1..=quantity))
            } else {
                None
            };
            Order::new(side, i as u64 + 1, price, quantity, peak).unwrap()
        })
        .collect()
}

// ============================================================================
// BENCHMARKS
// ============================================================================

/// Submitting an order that rests without matching.
fn bench_submit_resting(c: &mut Criterion) {
    c.bench_function("submit_resting", |b| {
        b.iter_batched_ref(
            || {
                let mut book = OrderBook::with_capacity(1024);
                populate_asks(&mut book, 100, 200, 1_000);
                (book, 0u64)
            },
            |(book, next_id)| {
                *next_id += 1;
                // Far from the asks: never crosses.
                book.submit(black_box(buy(*next_id, 50, 1_000))).unwrap()
            },
            BatchSize::SmallInput,
        );
    });
}

/// A single match against the best resting order.
fn bench_single_match(c: &mut Criterion) {
    c.bench_function("single_match", |b| {
        b.iter_batched(
            || {
                let mut book = OrderBook::with_capacity(1024);
                populate_asks(&mut book, 100, 100, 1_000);
                book
            },
            |mut book| book.submit(black_box(buy(1, 100, 1_000))).unwrap(),
            BatchSize::SmallInput,
        );
    });
}

/// One buy sweeping a level of stacked icebergs, forcing the hidden pass
/// and replenishment for every record.
fn bench_iceberg_sweep(c: &mut Criterion) {
    c.bench_function("iceberg_sweep", |b| {
        b.iter_batched(
            || {
                let mut book = OrderBook::with_capacity(256);
                populate_iceberg_level(&mut book, 50, 100);
                book
            },
            |mut book| book.submit(black_box(buy(1, 100, 200_000))).unwrap(),
            BatchSize::SmallInput,
        );
    });
}

/// Mixed-flow throughput at several book depths.
fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");
    for &count in &[1_000usize, 10_000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("mixed_flow", count), &count, |b, &count| {
            b.iter_batched(
                || generate_order_batch(count, 42),
                |orders| {
                    let mut book = OrderBook::with_capacity(count);
                    for order in orders {
                        book.submit(order).unwrap();
                    }
                    book
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_submit_resting,
    bench_single_match,
    bench_iceberg_sweep,
    bench_throughput
);
criterion_main!(benches);
