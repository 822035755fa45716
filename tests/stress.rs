//! Stress tests for the matching engine.
//!
//! These tests verify:
//! 1. The engine stays stable under a large randomized order flow
//! 2. Determinism is preserved across runs (same seed, same trades)
//! 3. The book invariants survive sustained churn
//!
//! ## Running Stress Tests
//!
//! ```bash
//! cargo test --release --test stress -- --nocapture
//! ```

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use iceberg_matcher::{Order, OrderBook, Side, Transaction};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Number of orders for the large stress run
const STRESS_ORDER_COUNT: usize = 100_000;

/// Seed for deterministic order generation
const SEED: u64 = 0x1CEB_E26;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Generate deterministic orders for stress testing.
///
/// Uses a seeded RNG for reproducibility. Same seed = same orders. Ids are
/// the 1-based position in the flow, so no submission is rejected.
fn generate_deterministic_orders(count: usize, seed: u64) -> Vec<Order> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut orders = Vec::with_capacity(count);

    for i in 0..count {
        let side = if rng.gen_bool(0.5) {
            Side::Buy
        } else {
            Side::Sell
        };

        // Cluster prices around 100 so a healthy fraction of orders cross.
        let price: u32 = rng.gen_range(90..=110);
        let quantity: u64 = rng.gen_range(1..=10_000);

        // Roughly a third of the flow is icebergs.
        let peak = if rng.gen_bool(0.33) {
            Some(rng.gen_range(1..=quantity))
        } else {
            None
        };

        orders.push(Order::new(side, i as u64 + 1, price, quantity, peak).unwrap());
    }

    orders
}

fn check_book_invariants(book: &OrderBook) {
    if let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) {
        assert!(bid < ask, "book is crossed: bid {bid} >= ask {ask}");
    }
    for record in book.buys().chain(book.sells()) {
        assert!(record.visible() >= 1);
        assert!(record.visible() <= record.max_peak());
        assert!(record.max_peak() <= record.remaining());
    }
    assert_eq!(book.order_count(), book.bid_count() + book.ask_count());
}

// ============================================================================
// STRESS TESTS
// ============================================================================

#[test]
fn stress_sustained_random_flow() {
    let orders = generate_deterministic_orders(STRESS_ORDER_COUNT, SEED);

    let start = Instant::now();
    let mut book = OrderBook::with_capacity(STRESS_ORDER_COUNT);
    let mut submitted: u64 = 0;
    let mut traded: u64 = 0;

    for (i, order) in orders.into_iter().enumerate() {
        submitted += order.quantity();
        traded += book
            .submit(order)
            .unwrap()
            .iter()
            .map(|t| t.quantity)
            .sum::<u64>();

        if i % 10_000 == 0 {
            check_book_invariants(&book);
        }
    }

    check_book_invariants(&book);
    let resting: u64 = book
        .buys()
        .chain(book.sells())
        .map(|r| r.remaining())
        .sum();
    assert_eq!(submitted, 2 * traded + resting);

    let elapsed = start.elapsed();
    println!(
        "processed {STRESS_ORDER_COUNT} orders in {elapsed:?} \
         ({:.0} orders/sec), {} resting",
        STRESS_ORDER_COUNT as f64 / elapsed.as_secs_f64(),
        book.order_count(),
    );
}

#[test]
fn stress_replay_is_deterministic() {
    let run = || -> (Vec<Transaction>, Vec<u64>) {
        let mut book = OrderBook::new();
        let mut trades = Vec::new();
        for order in generate_deterministic_orders(20_000, SEED) {
            trades.extend(book.submit(order).unwrap());
        }
        let resting_ids = book.buys().chain(book.sells()).map(|r| r.id()).collect();
        (trades, resting_ids)
    };

    let (first_trades, first_ids) = run();
    let (second_trades, second_ids) = run();

    assert_eq!(first_trades, second_trades);
    assert_eq!(first_ids, second_ids);
}

#[test]
fn stress_deep_single_level_iceberg_churn() {
    // Many icebergs at one price, repeatedly swept: exercises the
    // replenish/re-rank path far past the first round.
    let mut book = OrderBook::new();
    let mut next_id: u64 = 1;

    for _ in 0..500 {
        for _ in 0..20 {
            let order = Order::new(Side::Sell, next_id, 100, 1_000, Some(100)).unwrap();
            next_id += 1;
            book.submit(order).unwrap();
        }

        let sweep = Order::new(Side::Buy, next_id, 100, 15_000, None).unwrap();
        next_id += 1;
        let trades = book.submit(sweep).unwrap();
        let swept: u64 = trades.iter().map(|t| t.quantity).sum();
        assert!(swept <= 15_000);

        check_book_invariants(&book);
    }
}
