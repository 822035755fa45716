//! Book internals: the resting-order representation and the priority
//! ordering that both sides of the book are kept in.
//!
//! ## Components
//!
//! - [`RestingOrder`]: an order's unfilled remainder, with mutable
//!   remaining/visible iceberg state
//! - [`BidKey`] / [`AskKey`]: side-typed priority keys (price, sequence,
//!   rank). The two sides live in separately-typed ordered maps, so a
//!   cross-side comparison is a type error rather than a runtime hazard
//! - [`priority_cmp`]: a defensive record-level comparator retained for
//!   internal assertions; it reports cross-side comparison and ambiguous
//!   (fully tied) priority as explicit errors

pub mod priority;
pub mod resting;

pub use priority::{priority_cmp, AskKey, BidKey, PriorityError, SideKey};
pub use resting::RestingOrder;
