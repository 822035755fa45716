//! Fixed-width book rendering.
//!
//! Produces the two-sided depth table, one row per resting record in
//! priority order, buys and sells side by side:
//!
//! ```text
//! +-----------------------------------------------------------------+
//! | BUY                            | SELL                           |
//! | Id       | Volume      | Price | Price | Volume      | Id       |
//! +----------+-------------+-------+-------+-------------+----------+
//! |         1|       50,000|     99|    105|       20,000|         2|
//! +-----------------------------------------------------------------+
//! ```
//!
//! Only the *visible* quantity of each record is shown; hidden iceberg
//! quantity never leaks into the rendering. Every line is exactly 67
//! characters wide; the shorter side of an uneven book is blank-padded.

use std::fmt::Write;

use tracing::warn;

use crate::book::RestingOrder;
use crate::engine::OrderBook;

const FRAME: &str = "+-----------------------------------------------------------------+";
const BANNER: &str = "| BUY                            | SELL                           |";
const HEADER: &str = "| Id       | Volume      | Price | Price | Volume      | Id       |";
const RULE: &str = "+----------+-------------+-------+-------+-------------+----------+";

const ROW_WIDTH: usize = 67;

/// Render the book as the fixed-width depth table (no trailing newline).
pub fn render_book(book: &OrderBook) -> String {
    let mut out = String::new();
    out.push_str(FRAME);
    out.push('\n');
    out.push_str(BANNER);
    out.push('\n');
    out.push_str(HEADER);
    out.push('\n');
    out.push_str(RULE);
    out.push('\n');

    let mut buys = book.buys();
    let mut sells = book.sells();
    loop {
        let (buy, sell) = (buys.next(), sells.next());
        if buy.is_none() && sell.is_none() {
            break;
        }

        let row = render_row(buy, sell);
        if row.chars().count() != ROW_WIDTH {
            warn!(
                width = row.chars().count(),
                "book row does not comply with the fixed-width layout"
            );
        }
        out.push_str(&row);
        out.push('\n');
    }

    out.push_str(FRAME);
    out
}

fn render_row(buy: Option<&RestingOrder>, sell: Option<&RestingOrder>) -> String {
    let mut row = String::with_capacity(ROW_WIDTH);
    row.push('|');
    match buy {
        Some(rec) => {
            let _ = write!(
                row,
                "{:>10}|{:>13}|{:>7}|",
                rec.id(),
                group_thousands(rec.visible()),
                group_thousands(u64::from(rec.price()))
            );
        }
        None => {
            let _ = write!(row, "{:10}|{:13}|{:7}|", "", "", "");
        }
    }
    match sell {
        Some(rec) => {
            let _ = write!(
                row,
                "{:>7}|{:>13}|{:>10}|",
                group_thousands(u64::from(rec.price())),
                group_thousands(rec.visible()),
                rec.id()
            );
        }
        None => {
            let _ = write!(row, "{:7}|{:13}|{:10}|", "", "", "");
        }
    }
    row
}

/// Decimal rendering with `,` as the thousands separator (`1234567` ->
/// `"1,234,567"`).
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && i % 3 == offset % 3 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ============================================================================
// Unit Tests
// ============================================================================
