//! Line-oriented order decoder.
//!
//! ## Wire format
//!
//! One order per line, 4 or 5 comma-separated fields:
//!
//! ```text
//! B,1,99,50000          side, id, price, quantity
//! S,6,100,50000,10000   ... optional iceberg peak size
//! ```
//!
//! Numeric fields may carry surrounding blanks; the side tag must be
//! exactly `B` or `S`. Lines are capped at 40 characters, measured with
//! the trailing newline and whitespace removed. Whitespace-only lines are
//! skipped, as are comment lines: a line whose
//! first character is whitespace and whose first non-blank character is
//! `#`. (The indentation is part of the format - a `#` in column one is a
//! malformed order line.) Any other line starting with whitespace is
//! malformed.
//!
//! The decoder is the engine's validation boundary: every [`Order`] it
//! yields satisfies the order invariants, and every malformed line is
//! reported and skipped without reaching the engine.

use std::io::BufRead;

use thiserror::Error;
use tracing::{debug, error, info};

use crate::types::{Order, OrderError, Side};

/// Longest admissible input line, in characters, not counting trailing
/// whitespace or the newline
pub const MAX_LINE_LEN: usize = 40;

/// Largest admissible order identifier (wire format bound)
pub const MAX_ORDER_ID: u64 = (1 << 31) - 1;

/// Largest admissible order quantity (wire format bound)
pub const MAX_QUANTITY: u64 = (1 << 31) - 1;

// ============================================================================
// Errors
// ============================================================================

/// Classification of a malformed input line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Line longer than [`MAX_LINE_LEN`] characters
    #[error("input line is too long: {0} characters")]
    LineTooLong(usize),

    /// Not 4 or 5 comma-separated fields
    #[error("expected 4 to 5 comma-separated values, got {0}")]
    FieldCount(usize),

    /// Side tag was neither `B` nor `S`
    #[error("unexpected side tag: {0:?}")]
    BadSide(String),

    /// A numeric field failed to parse
    #[error("unexpected {field}: {value:?}")]
    BadInteger { field: &'static str, value: String },

    /// A numeric field parsed but exceeds its wire-format bound
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: u64 },

    /// Line starts with whitespace but is neither a comment nor blank
    #[error("line starts with whitespace but is not a comment or empty")]
    LeadingWhitespace,

    /// Fields parsed but violate the order invariants
    #[error(transparent)]
    Order(#[from] OrderError),
}

// ============================================================================
// Line parsing
// ============================================================================

/// Classify one raw input line.
///
/// Returns `Ok(None)` for lines the stream silently skips (blank lines and
/// indented `#` comments), `Ok(Some(order))` for a well-formed order line,
/// and the malformed-line classification otherwise.
pub fn parse_line(line: &str) -> Result<Option<Order>, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match line.chars().next() {
        Some(first) if first.is_whitespace() => {
            if trimmed.starts_with('#') {
                Ok(None)
            } else {
                Err(ParseError::LeadingWhitespace)
            }
        }
        _ => parse_order(line.trim_end()).map(Some),
    }
}

/// Decode one order line (no leading whitespace, no trailing newline).
pub fn parse_order(line: &str) -> Result<Order, ParseError> {
    if line.chars().count() > MAX_LINE_LEN {
        return Err(ParseError::LineTooLong(line.chars().count()));
    }

    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 4 || fields.len() > 5 {
        return Err(ParseError::FieldCount(fields.len()));
    }

    // The side tag is exact; padding is only tolerated on numeric fields.
    let side = match fields[0] {
        "B" => Side::Buy,
        "S" => Side::Sell,
        other => return Err(ParseError::BadSide(other.to_string())),
    };

    let id = parse_field(fields[1], "order_id", MAX_ORDER_ID)?;
    let price = parse_field(fields[2], "price", u64::from(crate::types::MAX_PRICE))?;
    let quantity = parse_field(fields[3], "quantity", MAX_QUANTITY)?;
    let peak = match fields.get(4) {
        Some(raw) => Some(parse_field(raw, "peak_size", MAX_QUANTITY)?),
        None => None,
    };

    Ok(Order::new(side, id, price as u32, quantity, peak)?)
}

fn parse_field(raw: &str, field: &'static str, max: u64) -> Result<u64, ParseError> {
    let value: u64 = raw.trim().parse().map_err(|_| ParseError::BadInteger {
        field,
        value: raw.trim().to_string(),
    })?;
    if value > max {
        return Err(ParseError::OutOfRange { field, value });
    }
    Ok(value)
}

// ============================================================================
// OrderReader
// ============================================================================

/// Streaming decoder over a buffered input source.
///
/// Yields each well-formed order in turn; blank and comment lines are
/// skipped quietly, malformed lines are reported (with their line number)
/// and skipped.
///
/// ## Example
///
/// ```
/// use iceberg_matcher::OrderReader;
///
/// let input = b"B,1,99,50000\n # a comment\nS,2,105,20000\n" as &[u8];
/// let ids: Vec<u64> = OrderReader::new(input).map(|o| o.id()).collect();
/// assert_eq!(ids, vec![1, 2]);
/// ```
pub struct OrderReader<R> {
    input: R,
    line_no: u64,
}

impl<R: BufRead> OrderReader<R> {
    /// Wrap a buffered input source
    pub fn new(input: R) -> Self {
        Self { input, line_no: 0 }
    }

    /// Read lines until the next well-formed order or end of input.
    pub fn next_order(&mut self) -> Option<Order> {
        let mut line = String::new();
        loop {
            line.clear();
            self.line_no += 1;
            match self.input.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(error) => {
                    error!(line = self.line_no, %error, "failed to read input");
                    return None;
                }
            }

            match parse_line(&line) {
                Ok(Some(order)) => {
                    info!(
                        line = self.line_no,
                        id = order.id(),
                        side = %order.side().tag(),
                        "order decoded"
                    );
                    return Some(order);
                }
                Ok(None) => debug!(line = self.line_no, "blank or comment line"),
                Err(error) => error!(line = self.line_no, %error, "failed to parse order"),
            }
        }
    }
}

impl<R: BufRead> Iterator for OrderReader<R> {
    type Item = Order;

    fn next(&mut self) -> Option<Order> {
        self.next_order()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
