//! Resting-order representation.
//!
//! A [`RestingOrder`] is created once, when an incoming order's remainder
//! enters the book, and destroyed when its remaining quantity reaches zero.
//! It carries the iceberg disclosure state:
//!
//! - `max_peak`: the disclosed-quantity cap (a fully visible order is
//!   modeled as a peak equal to its quantity). Clamped to `remaining` at
//!   construction and after every fill, so `max_peak <= remaining` holds
//!   for the whole time the record is resident
//! - `visible`: the currently disclosed quantity, `0 <= visible <= max_peak`
//! - `remaining`: total remaining quantity, `remaining >= visible`
//!
//! `sequence` is the engine's logical clock at the moment the record last
//! became eligible for matching (insertion or iceberg replenishment);
//! `rank` breaks ties among records that share `(price, sequence)` within
//! one matching round.

use crate::types::{Order, Side};

/// An order's unfilled remainder held in the book awaiting a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestingOrder {
    id: u64,
    side: Side,
    price: u32,
    max_peak: u64,
    visible: u64,
    remaining: u64,
    sequence: u64,
    rank: u64,
}

impl RestingOrder {
    /// Build the book-resident record for an order's remainder.
    ///
    /// `remaining` is the quantity left after the order's arrival match.
    /// The disclosure cap is the order's peak (or the full remainder for a
    /// fully visible order), clamped to `remaining` so the disclosure bound
    /// `max_peak <= remaining` holds even when the arrival match ate into
    /// the first peak.
    pub fn new(order: &Order, remaining: u64, sequence: u64) -> Self {
        debug_assert!(remaining > 0, "a drained order never rests");
        let max_peak = order.peak().unwrap_or(remaining).min(remaining);
        Self {
            id: order.id(),
            side: order.side(),
            price: order.price(),
            max_peak,
            visible: max_peak,
            remaining,
            sequence,
            rank: 0,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Order identifier
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Book side this record rests on
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Resting limit price
    #[inline]
    pub fn price(&self) -> u32 {
        self.price
    }

    /// Disclosed-quantity cap
    #[inline]
    pub fn max_peak(&self) -> u64 {
        self.max_peak
    }

    /// Currently disclosed quantity
    #[inline]
    pub fn visible(&self) -> u64 {
        self.visible
    }

    /// Total remaining quantity (visible + hidden)
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Hidden remainder behind the current disclosure
    #[inline]
    pub fn hidden(&self) -> u64 {
        self.remaining - self.visible
    }

    /// Logical timestamp of the last eligibility event
    #[inline]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Intra-round tie-breaker among equal `(price, sequence)` records
    #[inline]
    pub fn rank(&self) -> u64 {
        self.rank
    }

    /// True once the record is fully drained and due for pruning
    #[inline]
    pub fn is_drained(&self) -> bool {
        self.remaining == 0
    }

    // ========================================================================
    // Matching-round mutators
    // ========================================================================

    /// Visible-pass fill: consume up to `wanted` units from the disclosed
    /// quantity. Returns the quantity actually filled.
    pub fn fill_visible(&mut self, wanted: u64) -> u64 {
        let filled = self.visible.min(wanted);
        self.visible -= filled;
        self.remaining -= filled;
        if self.remaining > 0 {
            self.max_peak = self.max_peak.min(self.remaining);
        }
        filled
    }

    /// Hidden-pass fill when this record outlasts the incoming remainder:
    /// absorb the whole `incoming` quantity and recompute the disclosure.
    ///
    /// The new disclosure models the incoming quantity tearing through
    /// `q = incoming / max_peak` whole peaks plus `r = incoming % max_peak`
    /// units of the next one: what is left of that partially eaten peak
    /// (`max_peak - r`), capped by the quantity genuinely still behind the
    /// consumed peaks. Near exhaustion the cap can reach zero, in which
    /// case the cleanup pass replenishes the record afresh.
    ///
    /// Callers must ensure `remaining > incoming`.
    pub fn fill_hidden(&mut self, incoming: u64) -> u64 {
        debug_assert!(self.remaining > incoming);
        let q = incoming / self.max_peak;
        let r = incoming % self.max_peak;
        self.remaining -= incoming;
        self.visible = (self.max_peak - r).min(self.remaining.saturating_sub(self.max_peak * q));
        self.max_peak = self.max_peak.min(self.remaining);
        incoming
    }

    /// Hidden-pass fill when the incoming remainder covers this record:
    /// drain it completely. Returns the quantity filled.
    pub fn drain(&mut self) -> u64 {
        let filled = self.remaining;
        self.remaining = 0;
        self.visible = 0;
        filled
    }

    /// Cleanup-pass rank reassignment.
    pub fn set_rank(&mut self, rank: u64) {
        self.rank = rank;
    }

    /// Iceberg replenishment: disclose a fresh peak and move to the back of
    /// the time-priority queue at this price.
    ///
    /// Callers must ensure `visible == 0` and `remaining > 0`.
    pub fn replenish(&mut self, clock: u64) {
        debug_assert_eq!(self.visible, 0);
        debug_assert!(self.remaining > 0);
        self.visible = self.remaining.min(self.max_peak);
        self.sequence = clock;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
