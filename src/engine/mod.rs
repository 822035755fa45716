//! Matching engine module.
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Same input always produces same output
//! 2. **Integer Math**: No floating-point operations anywhere
//! 3. **Synchronous Execution**: `submit` is one atomic state transition
//! 4. **Price-Time Priority**: Best price first, then earliest sequence,
//!    then intra-round rank
//!
//! ## Matching Rules
//!
//! - **Buy orders** match against asks (lowest price first)
//! - **Sell orders** match against bids (highest price first)
//! - Trades execute at the *resting* order's price
//! - Each crossed price level is consumed in two passes: visible
//!   quantity first, then hidden iceberg quantity
//! - Unfilled remainder rests on the book
//!
//! ## Example
//!
//! ```
//! use iceberg_matcher::{Order, OrderBook, Side};
//!
//! let mut book = OrderBook::new();
//! book.submit(Order::new(Side::Sell, 1, 100, 50, None).unwrap()).unwrap();
//!
//! let trades = book
//!     .submit(Order::new(Side::Buy, 2, 100, 50, None).unwrap())
//!     .unwrap();
//! assert_eq!(trades.len(), 1);
//! assert!(book.is_empty());
//! ```

pub mod matcher;

pub use matcher::{OrderBook, RejectReason};
