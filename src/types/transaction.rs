//! Transaction type representing an executed match between two orders.

use std::fmt;

/// A single executed trade.
///
/// ## Price Discovery
///
/// The trade always executes at the resting (non-aggressor) order's price.
/// This is standard price-time priority behavior: the incoming order's
/// limit caps eligibility but never improves the resting side's price.
///
/// ## Display
///
/// Transactions render as the wire format's CSV line:
///
/// ```
/// use iceberg_matcher::Transaction;
///
/// let t = Transaction::new(1, 2, 10, 20);
/// assert_eq!(t.to_string(), "1,2,10,20");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Buying order's identifier
    pub buy_id: u64,

    /// Selling order's identifier
    pub sell_id: u64,

    /// Execution price; always the resting order's price
    pub price: u32,

    /// Executed quantity, always nonzero
    pub quantity: u64,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(buy_id: u64, sell_id: u64, price: u32, quantity: u64) -> Self {
        Self {
            buy_id,
            sell_id,
            price,
            quantity,
        }
    }

    /// Notional value of this trade (price * quantity), widened to avoid
    /// wraparound for book-sized quantities.
    pub fn notional(&self) -> u128 {
        u128::from(self.price) * u128::from(self.quantity)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.buy_id, self.sell_id, self.price, self.quantity
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_new() {
        let t = Transaction::new(7, 3, 100, 10_000);

        assert_eq!(t.buy_id, 7);
        assert_eq!(t.sell_id, 3);
        assert_eq!(t.price, 100);
        assert_eq!(t.quantity, 10_000);
    }

    #[test]
    fn test_transaction_display() {
        let t = Transaction::new(7, 3, 100, 10_000);
        assert_eq!(t.to_string(), "7,3,100,10000");
    }

    #[test]
    fn test_transaction_notional() {
        let t = Transaction::new(1, 2, 31_502, u64::MAX);
        assert_eq!(t.notional(), 31_502u128 * u128::from(u64::MAX));
    }
}
