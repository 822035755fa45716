//! Price-time priority ordering.
//!
//! ## Typed side keys
//!
//! Each side of the book is a `BTreeMap` keyed by a side-specific priority
//! key: [`BidKey`] orders by price *descending* (via [`Reverse`]), [`AskKey`]
//! by price *ascending*; both then order by sequence and rank ascending.
//! Because the two key types are distinct, comparing a bid's priority with
//! an ask's does not compile - the cross-side hazard is structurally
//! unreachable instead of being a runtime check.
//!
//! ## Defensive comparator
//!
//! [`priority_cmp`] is the record-level ordering rule kept for internal
//! assertions. Unlike the typed keys it takes arbitrary records, so it
//! reports the two conditions that can only arise from an engine bug as
//! errors: comparing records of different sides, and two same-side records
//! with fully tied `(price, sequence, rank)`.

use std::cmp::{Ordering, Reverse};

use thiserror::Error;

use crate::book::RestingOrder;
use crate::types::Side;

// ============================================================================
// Errors
// ============================================================================

/// Internal-invariant failures of the priority ordering.
///
/// Either variant indicates an engine bug, not a user-facing condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PriorityError {
    /// Only records with the same side are comparable
    #[error("cannot compare a {left:?} record with a {right:?} record")]
    CrossSide { left: Side, right: Side },

    /// Same-side records must never tie on `(price, sequence, rank)`
    #[error("records {left_id} and {right_id} have identical priority")]
    Ambiguous { left_id: u64, right_id: u64 },
}

// ============================================================================
// Side keys
// ============================================================================

/// Common interface of the two side-key types, letting the matching loop
/// stay generic over which side it consumes.
pub trait SideKey: Ord + Copy {
    /// Side whose records this key type orders
    const SIDE: Side;

    /// Key under which `record` sorts on its side
    fn for_record(record: &RestingOrder) -> Self;

    /// Resting price carried by the key
    fn price(&self) -> u32;

    /// Whether a resting order at this key's price is eligible against an
    /// incoming opposite-side order with the given limit.
    fn crosses(&self, incoming_limit: u32) -> bool;
}

/// Priority key for the buy side: highest price first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BidKey {
    price: Reverse<u32>,
    sequence: u64,
    rank: u64,
}

/// Priority key for the sell side: lowest price first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AskKey {
    price: u32,
    sequence: u64,
    rank: u64,
}

impl SideKey for BidKey {
    const SIDE: Side = Side::Buy;

    fn for_record(record: &RestingOrder) -> Self {
        debug_assert_eq!(record.side(), Side::Buy);
        Self {
            price: Reverse(record.price()),
            sequence: record.sequence(),
            rank: record.rank(),
        }
    }

    fn price(&self) -> u32 {
        self.price.0
    }

    // An incoming sell trades against bids at or above its limit.
    fn crosses(&self, incoming_limit: u32) -> bool {
        self.price.0 >= incoming_limit
    }
}

impl SideKey for AskKey {
    const SIDE: Side = Side::Sell;

    fn for_record(record: &RestingOrder) -> Self {
        debug_assert_eq!(record.side(), Side::Sell);
        Self {
            price: record.price(),
            sequence: record.sequence(),
            rank: record.rank(),
        }
    }

    fn price(&self) -> u32 {
        self.price
    }

    // An incoming buy trades against asks at or below its limit.
    fn crosses(&self, incoming_limit: u32) -> bool {
        self.price <= incoming_limit
    }
}

// ============================================================================
// Defensive comparator
// ============================================================================

/// Record-level price-time priority comparison.
///
/// Returns which record matches first: better price, then lower sequence,
/// then lower rank. Errors on the two unreachable-by-construction cases
/// (cross-side input, full tie); see [`PriorityError`].
pub fn priority_cmp(a: &RestingOrder, b: &RestingOrder) -> Result<Ordering, PriorityError> {
    if a.side() != b.side() {
        return Err(PriorityError::CrossSide {
            left: a.side(),
            right: b.side(),
        });
    }

    let by_price = match a.side() {
        Side::Buy => b.price().cmp(&a.price()),
        Side::Sell => a.price().cmp(&b.price()),
    };
    let ord = by_price
        .then(a.sequence().cmp(&b.sequence()))
        .then(a.rank().cmp(&b.rank()));

    if ord == Ordering::Equal {
        return Err(PriorityError::Ambiguous {
            left_id: a.id(),
            right_id: b.id(),
        });
    }
    Ok(ord)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Order;

    fn record(side: Side, id: u64, price: u32, sequence: u64, rank: u64) -> RestingOrder {
        let order = Order::new(side, id, price, 100, None).unwrap();
        let mut rec = RestingOrder::new(&order, 100, sequence);
        rec.set_rank(rank);
        rec
    }

    #[test]
    fn test_bid_keys_order_by_price_descending() {
        let high = BidKey::for_record(&record(Side::Buy, 1, 100, 2, 0));
        let low = BidKey::for_record(&record(Side::Buy, 2, 99, 1, 0));

        assert!(high < low);
        assert_eq!(high.price(), 100);
    }

    #[test]
    fn test_ask_keys_order_by_price_ascending() {
        let low = AskKey::for_record(&record(Side::Sell, 1, 100, 2, 0));
        let high = AskKey::for_record(&record(Side::Sell, 2, 103, 1, 0));

        assert!(low < high);
    }

    #[test]
    fn test_keys_break_price_ties_by_sequence_then_rank() {
        let early = AskKey::for_record(&record(Side::Sell, 1, 100, 1, 5));
        let late = AskKey::for_record(&record(Side::Sell, 2, 100, 2, 0));
        assert!(early < late);

        let first = BidKey::for_record(&record(Side::Buy, 1, 100, 3, 0));
        let second = BidKey::for_record(&record(Side::Buy, 2, 100, 3, 1));
        assert!(first < second);
    }

    #[test]
    fn test_crossing() {
        let bid = BidKey::for_record(&record(Side::Buy, 1, 100, 1, 0));
        assert!(bid.crosses(100));
        assert!(bid.crosses(99));
        assert!(!bid.crosses(101));

        let ask = AskKey::for_record(&record(Side::Sell, 2, 100, 1, 0));
        assert!(ask.crosses(100));
        assert!(ask.crosses(101));
        assert!(!ask.crosses(99));
    }

    #[test]
    fn test_priority_cmp_by_time_then_price() {
        // Buy side: earlier sequence wins at equal price.
        let left = record(Side::Buy, 1, 1, 1, 0);
        let right = record(Side::Buy, 1, 1, 2, 0);
        assert_eq!(priority_cmp(&left, &right), Ok(Ordering::Less));

        // Sell side likewise.
        let left = record(Side::Sell, 1, 1, 1, 0);
        let right = record(Side::Sell, 1, 1, 2, 0);
        assert_eq!(priority_cmp(&left, &right), Ok(Ordering::Less));

        // Buy side: higher price wins.
        let left = record(Side::Buy, 1, 2, 1, 0);
        let right = record(Side::Buy, 1, 1, 2, 0);
        assert_eq!(priority_cmp(&left, &right), Ok(Ordering::Less));
        assert_eq!(priority_cmp(&right, &left), Ok(Ordering::Greater));

        // Sell side: lower price wins.
        let left = record(Side::Sell, 1, 505, 1, 0);
        let right = record(Side::Sell, 1, 504, 2, 0);
        assert_eq!(priority_cmp(&left, &right), Ok(Ordering::Greater));

        // Rank breaks a full (price, sequence) tie.
        let left = record(Side::Sell, 1, 1, 1, 2);
        let right = record(Side::Sell, 1, 1, 1, 1);
        assert_eq!(priority_cmp(&right, &left), Ok(Ordering::Less));
    }

    #[test]
    fn test_priority_cmp_rejects_cross_side() {
        let buy = record(Side::Buy, 1, 1, 1, 0);
        let sell = record(Side::Sell, 2, 2, 2, 0);

        assert_eq!(
            priority_cmp(&buy, &sell),
            Err(PriorityError::CrossSide {
                left: Side::Buy,
                right: Side::Sell
            })
        );
    }

    #[test]
    fn test_priority_cmp_rejects_full_tie() {
        let left = record(Side::Sell, 1, 1, 1, 2);
        let right = record(Side::Sell, 2, 1, 1, 2);

        assert_eq!(
            priority_cmp(&left, &right),
            Err(PriorityError::Ambiguous {
                left_id: 1,
                right_id: 2
            })
        );
    }
}
