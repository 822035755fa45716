//! # iceberg-matcher
//!
//! A price-time-priority limit order book with iceberg (hidden-quantity)
//! order support.
//!
//! ## Architecture
//!
//! - **Types**: Core data structures ([`Order`], [`Side`], [`Transaction`])
//! - **Book**: Resting-order representation and the priority-key types that
//!   keep the two sides in strict price-time order
//! - **Engine**: The matching engine ([`OrderBook`]) with the two-phase
//!   visible-then-hidden fill algorithm and iceberg replenishment
//! - **Parser**: Line-oriented order decoder
//! - **Render**: Fixed-width book snapshot formatter
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Same input stream always produces the same trades
//!    and the same final book
//! 2. **No Floating Point**: Prices and quantities are plain integers
//! 3. **Synchronous Execution**: [`OrderBook::submit`] is a single
//!    in-order state transition; no async, no internal locking
//! 4. **Price-Time Priority**: Best price first, then earliest sequence,
//!    then intra-round rank
//!
//! ## Example
//!
//! ```
//! use iceberg_matcher::{Order, OrderBook, Side};
//!
//! let mut book = OrderBook::new();
//!
//! // Iceberg buy: 40 total, 20 disclosed at a time.
//! let buy = Order::new(Side::Buy, 1, 10, 40, Some(20)).unwrap();
//! assert!(book.submit(buy).unwrap().is_empty());
//!
//! // Incoming sell crosses and trades at the resting price.
//! let sell = Order::new(Side::Sell, 2, 10, 20, None).unwrap();
//! let trades = book.submit(sell).unwrap();
//! assert_eq!(trades.len(), 1);
//! assert_eq!((trades[0].buy_id, trades[0].sell_id), (1, 2));
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Side, Transaction
pub mod types;

/// Book internals: resting orders and side-typed priority keys
pub mod book;

/// Matching engine: deterministic two-phase order matching
pub mod engine;

/// Line-oriented order decoder
pub mod parser;

/// Fixed-width book snapshot formatter
pub mod render;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use types::{Order, OrderError, Side, Transaction};
pub use book::{PriorityError, RestingOrder};
pub use engine::{OrderBook, RejectReason};
pub use parser::{OrderReader, ParseError};
pub use render::render_book;
