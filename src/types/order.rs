//! Incoming order type for the matching engine.
//!
//! An [`Order`] is an immutable, validated instruction. Construction is the
//! validation boundary: a value that violates the field invariants (zero
//! price or quantity, out-of-range price, peak larger than quantity) cannot
//! exist, so the engine never re-checks them.

use thiserror::Error;

/// Highest admissible limit price.
///
/// The book works in integer ticks; the original wire format caps prices at
/// 2^15 - 1.
pub const MAX_PRICE: u32 = (1 << 15) - 1;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Buy order (bid) - wants to purchase
    Buy,
    /// Sell order (ask) - wants to sell
    Sell,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Single-letter tag used by the wire format and log output
    pub fn tag(self) -> char {
        match self {
            Side::Buy => 'B',
            Side::Sell => 'S',
        }
    }
}

// ============================================================================
// OrderError
// ============================================================================

/// Violations of the [`Order`] field invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Limit price must be strictly positive
    #[error("price must be positive")]
    ZeroPrice,

    /// Limit price above [`MAX_PRICE`]
    #[error("price {0} exceeds maximum {MAX_PRICE}")]
    PriceTooLarge(u32),

    /// Total quantity must be strictly positive
    #[error("quantity must be positive")]
    ZeroQuantity,

    /// Disclosed-quantity cap, when present, must be strictly positive
    #[error("peak must be positive")]
    ZeroPeak,

    /// Disclosed-quantity cap cannot exceed the total quantity
    #[error("peak {peak} exceeds quantity {quantity}")]
    PeakExceedsQuantity { peak: u64, quantity: u64 },
}

// ============================================================================
// Order struct
// ============================================================================

/// A validated incoming limit order.
///
/// `peak` is the iceberg disclosed-quantity cap: at most `peak` units are
/// visible in the book at a time, replenished from hidden quantity as the
/// visible portion trades. `None` means the order is fully visible.
///
/// ## Example
///
/// ```
/// use iceberg_matcher::{Order, Side};
///
/// // Iceberg buy: 40 total, disclosing 20 at a time.
/// let order = Order::new(Side::Buy, 1, 10, 40, Some(20)).unwrap();
/// assert_eq!(order.quantity(), 40);
/// assert_eq!(order.peak(), Some(20));
///
/// // A peak larger than the quantity is rejected.
/// assert!(Order::new(Side::Buy, 1, 10, 40, Some(41)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    side: Side,
    id: u64,
    price: u32,
    quantity: u64,
    peak: Option<u64>,
}

impl Order {
    /// Create a validated order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError`] if `price` is zero or above [`MAX_PRICE`],
    /// `quantity` is zero, or `peak` is present and zero or larger than
    /// `quantity`.
    pub fn new(
        side: Side,
        id: u64,
        price: u32,
        quantity: u64,
        peak: Option<u64>,
    ) -> Result<Self, OrderError> {
        if price == 0 {
            return Err(OrderError::ZeroPrice);
        }
        if price > MAX_PRICE {
            return Err(OrderError::PriceTooLarge(price));
        }
        if quantity == 0 {
            return Err(OrderError::ZeroQuantity);
        }
        if let Some(peak) = peak {
            if peak == 0 {
                return Err(OrderError::ZeroPeak);
            }
            if peak > quantity {
                return Err(OrderError::PeakExceedsQuantity { peak, quantity });
            }
        }
        Ok(Self {
            side,
            id,
            price,
            quantity,
            peak,
        })
    }

    /// Order side
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Unique order identifier
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Limit price
    #[inline]
    pub fn price(&self) -> u32 {
        self.price
    }

    /// Total quantity
    #[inline]
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Disclosed-quantity cap; `None` means fully visible
    #[inline]
    pub fn peak(&self) -> Option<u64> {
        self.peak
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
