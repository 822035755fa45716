//! Binary entry point.
//!
//! Reads orders from stdin (one per line), feeds them through the matching
//! engine, and writes each resulting transaction followed by the book
//! snapshot to stdout. Diagnostics go to stderr via `tracing`, filterable
//! with `RUST_LOG`.

use std::io::{self, BufWriter, Write};

use tracing_subscriber::EnvFilter;

use iceberg_matcher::{render_book, OrderBook, OrderReader};

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let mut book = OrderBook::new();
    for order in OrderReader::new(stdin.lock()) {
        match book.submit(order) {
            Ok(transactions) => {
                for transaction in &transactions {
                    writeln!(out, "{transaction}")?;
                }
            }
            Err(reason) => {
                tracing::error!(%reason, "order rejected");
            }
        }
        writeln!(out, "{}", render_book(&book))?;
        out.flush()?;
    }

    Ok(())
}
