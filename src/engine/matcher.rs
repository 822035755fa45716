//! Price-time-priority matching engine.
//!
//! ## Architecture
//!
//! The book uses a hybrid data structure:
//!
//! - **Slab**: Pre-allocated storage for resting-order records
//! - **BTreeMap** per side, keyed by the side's typed priority key, so the
//!   best record is always the first entry and eligible candidates form a
//!   prefix of the map
//! - **HashMap**: order id to slab slot, for duplicate-id rejection and
//!   O(1) residency checks
//!
//! ## Matching round
//!
//! One `submit` call consumes the crossing prefix of the opposite side,
//! level by level. Within a level the records are hit in book order twice -
//! visible quantity first, then hidden iceberg quantity - and finally
//! re-ranked; records whose disclosure was exhausted but still hold hidden
//! quantity are replenished, which re-times them behind the rest of their
//! price level. Drained records are pruned, survivors are re-keyed and
//! reinserted, and the incoming order's remainder (if any) rests on its own
//! side.

use std::collections::{BTreeMap, HashMap};

use slab::Slab;
use thiserror::Error;
use tracing::{debug, info, warn};

#[cfg(debug_assertions)]
use crate::book::priority_cmp;
use crate::book::{AskKey, BidKey, RestingOrder, SideKey};
use crate::types::{Order, Side, Transaction};

// ============================================================================
// Errors
// ============================================================================

/// Recoverable engine-level rejection of a submitted order.
///
/// A rejected order produces no transactions and leaves the book unchanged
/// apart from the logical-clock tick every submission consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    /// The order's id already identifies a resident record on either side.
    /// Resubmission is not an update mechanism.
    #[error("updating orders is prohibited: id {0} is already resident")]
    DuplicateId(u64),
}

// ============================================================================
// Fill accumulator
// ============================================================================

/// Quantity accrued against one resting record at one price during a
/// matching round. Entries keep first-fill order, which is the order the
/// resulting transactions are reported in.
struct Fill {
    maker_id: u64,
    price: u32,
    quantity: u64,
}

fn accrue(fills: &mut Vec<Fill>, maker_id: u64, price: u32, quantity: u64) {
    if quantity == 0 {
        return;
    }
    match fills
        .iter_mut()
        .find(|f| f.maker_id == maker_id && f.price == price)
    {
        Some(fill) => fill.quantity += quantity,
        None => fills.push(Fill {
            maker_id,
            price,
            quantity,
        }),
    }
}

// ============================================================================
// OrderBook
// ============================================================================

/// The matching engine: two priority-ordered side collections and a
/// logical clock.
///
/// ## Concurrency
///
/// Single-threaded and synchronous. [`OrderBook::submit`] never blocks or
/// suspends; concurrent submission requires external serialization (a
/// single owning thread, or a lock held for the whole call).
#[derive(Debug, Default)]
pub struct OrderBook {
    /// Pre-allocated record storage; slots are referenced by the side maps
    records: Slab<RestingOrder>,

    /// Buy side, best (highest) price first
    bids: BTreeMap<BidKey, usize>,

    /// Sell side, best (lowest) price first
    asks: BTreeMap<AskKey, usize>,

    /// Resident order id -> slab slot
    id_index: HashMap<u64, usize>,

    /// Logical clock, incremented exactly once per submission
    clock: u64,
}

impl OrderBook {
    /// Create a new empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a book with pre-allocated capacity for resting orders
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Slab::with_capacity(capacity),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            id_index: HashMap::with_capacity(capacity),
            clock: 0,
        }
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Total number of resting orders
    #[inline]
    pub fn order_count(&self) -> usize {
        self.records.len()
    }

    /// Number of resting buy orders
    #[inline]
    pub fn bid_count(&self) -> usize {
        self.bids.len()
    }

    /// Number of resting sell orders
    #[inline]
    pub fn ask_count(&self) -> usize {
        self.asks.len()
    }

    /// Check if the book is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Current logical clock value
    #[inline]
    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Check whether an order id is resident on either side
    #[inline]
    pub fn contains_order(&self, id: u64) -> bool {
        self.id_index.contains_key(&id)
    }

    /// Best (highest) resting buy price
    pub fn best_bid(&self) -> Option<u32> {
        self.bids.keys().next().map(|k| k.price())
    }

    /// Best (lowest) resting sell price
    pub fn best_ask(&self) -> Option<u32> {
        self.asks.keys().next().map(|k| k.price())
    }

    /// Resting buy orders in priority order (best first)
    pub fn buys(&self) -> impl Iterator<Item = &RestingOrder> {
        self.bids.values().map(move |&slot| &self.records[slot])
    }

    /// Resting sell orders in priority order (best first)
    pub fn sells(&self) -> impl Iterator<Item = &RestingOrder> {
        self.asks.values().map(move |&slot| &self.records[slot])
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Submit one order: match it against the opposite side, then rest any
    /// remainder.
    ///
    /// Returns the transactions the order caused, in match order. The
    /// logical clock advances exactly once whether the order is accepted
    /// or rejected.
    ///
    /// # Errors
    ///
    /// [`RejectReason::DuplicateId`] if the order's id is already resident
    /// on either side; the book is left untouched.
    pub fn submit(&mut self, order: Order) -> Result<Vec<Transaction>, RejectReason> {
        self.clock += 1;

        if self.id_index.contains_key(&order.id()) {
            warn!(id = order.id(), "updating orders is prohibited");
            return Err(RejectReason::DuplicateId(order.id()));
        }

        let mut remaining = order.quantity();
        let fills = match order.side() {
            Side::Buy => Self::match_round(
                &mut self.asks,
                &mut self.records,
                &mut self.id_index,
                &order,
                &mut remaining,
                self.clock,
            ),
            Side::Sell => Self::match_round(
                &mut self.bids,
                &mut self.records,
                &mut self.id_index,
                &order,
                &mut remaining,
                self.clock,
            ),
        };

        let transactions: Vec<Transaction> = fills
            .into_iter()
            .map(|fill| {
                let transaction = match order.side() {
                    Side::Buy => {
                        Transaction::new(order.id(), fill.maker_id, fill.price, fill.quantity)
                    }
                    Side::Sell => {
                        Transaction::new(fill.maker_id, order.id(), fill.price, fill.quantity)
                    }
                };
                info!(%transaction, "transaction");
                transaction
            })
            .collect();

        if remaining > 0 {
            self.insert_remainder(&order, remaining);
        } else {
            info!(id = order.id(), "incoming order completely executed");
        }

        Ok(transactions)
    }

    /// Rest an order's unfilled remainder on its own side.
    fn insert_remainder(&mut self, order: &Order, remaining: u64) {
        let record = RestingOrder::new(order, remaining, self.clock);
        info!(
            id = record.id(),
            side = %record.side().tag(),
            price = record.price(),
            visible = record.visible(),
            remaining = record.remaining(),
            sequence = record.sequence(),
            "record inserted"
        );

        let slot = self.records.insert(record);
        self.id_index.insert(order.id(), slot);
        let displaced = match order.side() {
            Side::Buy => self
                .bids
                .insert(BidKey::for_record(&self.records[slot]), slot),
            Side::Sell => self
                .asks
                .insert(AskKey::for_record(&self.records[slot]), slot),
        };
        // The fresh record's sequence is this round's unique clock tick, so
        // its key cannot collide with any resident same-side key.
        debug_assert!(displaced.is_none(), "priority key collision on insert");
    }

    /// One matching round of the incoming order against one side.
    ///
    /// Consumes the crossing prefix of `side`, fills level by level, and
    /// returns the per-record fill accumulator in first-fill order.
    /// `incoming_remaining` is decremented in place.
    fn match_round<K: SideKey>(
        side: &mut BTreeMap<K, usize>,
        records: &mut Slab<RestingOrder>,
        id_index: &mut HashMap<u64, usize>,
        order: &Order,
        incoming_remaining: &mut u64,
        clock: u64,
    ) -> Vec<Fill> {
        let mut fills: Vec<Fill> = Vec::new();

        // Eligible candidates are exactly the crossing prefix of the side
        // map, already in priority order. Pop them; survivors are re-keyed
        // and reinserted below.
        let mut candidates: Vec<usize> = Vec::new();
        while let Some(entry) = side.first_entry() {
            if !entry.key().crosses(order.price()) {
                break;
            }
            candidates.push(entry.remove());
        }

        #[cfg(debug_assertions)]
        for pair in candidates.windows(2) {
            let ord = priority_cmp(&records[pair[0]], &records[pair[1]]);
            debug_assert_eq!(ord, Ok(std::cmp::Ordering::Less), "book side out of order");
        }

        // Contiguous price levels, visited in book order.
        let mut level_start = 0;
        while level_start < candidates.len() {
            let level_price = records[candidates[level_start]].price();
            let level_end = candidates[level_start..]
                .iter()
                .position(|&slot| records[slot].price() != level_price)
                .map_or(candidates.len(), |offset| level_start + offset);
            let level = &candidates[level_start..level_end];

            if *incoming_remaining > 0 {
                Self::fill_level(
                    level,
                    level_price,
                    records,
                    order,
                    incoming_remaining,
                    clock,
                    &mut fills,
                );
            }
            level_start = level_end;
        }

        // Prune drained records; reinsert survivors under their updated
        // (rank, and possibly sequence) keys.
        for &slot in &candidates {
            if records[slot].is_drained() {
                let record = records.remove(slot);
                id_index.remove(&record.id());
                debug!(maker = record.id(), "resting order fully executed");
            } else {
                let displaced = side.insert(K::for_record(&records[slot]), slot);
                debug_assert!(displaced.is_none(), "priority key collision on reinsert");
            }
        }

        fills
    }

    /// The two fill passes plus the replenish/cleanup pass over one price
    /// level.
    fn fill_level(
        level: &[usize],
        level_price: u32,
        records: &mut Slab<RestingOrder>,
        order: &Order,
        incoming_remaining: &mut u64,
        clock: u64,
        fills: &mut Vec<Fill>,
    ) {
        // Visible pass: disclosed quantity only, in book order.
        for &slot in level {
            if *incoming_remaining == 0 {
                break;
            }
            let record = &mut records[slot];
            let filled = record.fill_visible(*incoming_remaining);
            *incoming_remaining -= filled;
            debug!(
                taker = order.id(),
                maker = record.id(),
                price = level_price,
                volume = filled,
                "filled from visible quantity"
            );
            accrue(fills, record.id(), level_price, filled);
        }

        // Hidden pass: same records, same order. A record that outlasts the
        // incoming remainder absorbs all of it and recomputes its
        // disclosure; otherwise it is drained outright.
        for &slot in level {
            if *incoming_remaining == 0 {
                break;
            }
            let record = &mut records[slot];
            let filled = if record.remaining() > *incoming_remaining {
                record.fill_hidden(*incoming_remaining)
            } else {
                record.drain()
            };
            *incoming_remaining -= filled;
            if filled != 0 {
                debug!(
                    taker = order.id(),
                    maker = record.id(),
                    price = level_price,
                    volume = filled,
                    "filled from hidden quantity"
                );
            }
            accrue(fills, record.id(), level_price, filled);
        }

        // Replenish/cleanup pass: every level record gets a fresh rank;
        // exhausted disclosures backed by hidden quantity are replenished
        // and re-timed to the back of their price level.
        for (position, &slot) in level.iter().enumerate() {
            let record = &mut records[slot];
            record.set_rank(position as u64);
            if record.visible() == 0 && record.remaining() > 0 {
                record.replenish(clock);
                debug!(
                    maker = record.id(),
                    visible = record.visible(),
                    sequence = record.sequence(),
                    "iceberg peak replenished"
                );
            }
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
