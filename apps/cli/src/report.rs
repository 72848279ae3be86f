//! # Reports
//!
//! The two things the terminal produces besides prompts: the bill file for
//! a sale, and the statistics table for a manager.
//!
//! ```text
//! +----------+-----------------+-----------------+
//! | Salesman | Number of sales | Total Value ($) |
//! +----------+-----------------+-----------------+
//! |  Alice   |        2        |        8        |
//! |   Bob    |        0        |        0        |
//! +----------+-----------------+-----------------+
//! ```

use std::fs;
use std::path::Path;
use tracing::info;
use unicode_width::UnicodeWidthStr;

use crate::error::{CliError, CliResult};
use coffee_core::receipt::render_receipt;
use coffee_core::{Sale, SalesSummary};

/// Column headers of the statistics table.
pub const HEADERS: [&str; 3] = ["Salesman", "Number of sales", "Total Value ($)"];

// =============================================================================
// Bill
// =============================================================================

/// Writes the receipt for `sale` to `path`, replacing any existing file.
pub fn write_bill(path: &Path, sale: &Sale) -> CliResult<()> {
    fs::write(path, render_receipt(sale))
        .map_err(|e| CliError::io(format!("cannot write bill to {}", path.display()), e))?;

    info!(path = %path.display(), sale = %sale.id(), "Saving sale bill into file");
    Ok(())
}

// =============================================================================
// Statistics Table
// =============================================================================

/// Renders one row per salesman, in the order given.
pub fn render_table(rows: &[SalesSummary]) -> String {
    let cells: Vec<[String; 3]> = rows
        .iter()
        .map(|r| [r.salesman.clone(), r.sales.to_string(), r.total.to_string()])
        .collect();

    let mut widths = HEADERS.map(|h| h.width());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let border = border(&widths);
    let mut out = String::new();

    out.push_str(&border);
    out.push_str(&line(&HEADERS, &widths));
    out.push_str(&border);
    for row in &cells {
        out.push_str(&line(row, &widths));
    }
    if !cells.is_empty() {
        out.push_str(&border);
    }
    out
}

fn border(widths: &[usize; 3]) -> String {
    let mut s = String::from("+");
    for w in widths {
        s.push_str(&"-".repeat(w + 2));
        s.push('+');
    }
    s.push('\n');
    s
}

fn line<S: AsRef<str>>(cells: &[S; 3], widths: &[usize; 3]) -> String {
    let mut s = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        s.push(' ');
        s.push_str(&center(cell.as_ref(), *width));
        s.push_str(" |");
    }
    s.push('\n');
    s
}

fn center(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
}
