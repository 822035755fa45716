//! Core data types for the matching engine.
//!
//! All prices and quantities are plain non-negative integers; there is no
//! floating point anywhere in the crate.
//!
//! ## Types
//!
//! - [`Order`]: A validated incoming limit order (optionally iceberg)
//! - [`Side`]: Buy or Sell
//! - [`Transaction`]: An executed trade between two orders

mod order;
mod transaction;

// Re-export all types at module level
pub use order::{Order, OrderError, Side, MAX_PRICE};
pub use transaction::Transaction;
