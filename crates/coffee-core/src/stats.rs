//! # Sales Statistics
//!
//! Per-salesman aggregation for the manager view.
//!
//! ```text
//! salesman table (insertion order)     sale table
//! ┌─────────┐                          ┌─────────┬───────┐
//! │ Alice   │ ──── sales by name ────► │ Alice   │   3   │
//! │ Bob     │                          │ Alice   │   5   │
//! └─────────┘                          └─────────┴───────┘
//!      │
//!      ▼
//! SalesSummary { salesman: "Alice", sales: 2, total: 8 }
//! SalesSummary { salesman: "Bob",   sales: 0, total: 0 }
//! ```

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Sale, Salesman};

/// One row of the statistics table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesSummary {
    pub salesman: String,
    pub sales: usize,
    pub total: Money,
}

impl SalesSummary {
    /// Counts and sums the sales of one salesman.
    ///
    /// Sales belonging to anyone else are ignored, so callers may pass an
    /// unfiltered list.
    pub fn from_sales(salesman: &Salesman, sales: &[Sale]) -> CoreResult<Self> {
        let mut count = 0;
        let mut total = Money::zero();

        for sale in sales.iter().filter(|s| s.salesman_name() == salesman.name) {
            count += 1;
            total = total
                .checked_add(sale.price())
                .ok_or_else(|| CoreError::TotalOverflow {
                    salesman: salesman.name.clone(),
                })?;
        }

        Ok(SalesSummary {
            salesman: salesman.name.clone(),
            sales: count,
            total,
        })
    }
}

/// Grand total across every row.
pub fn grand_total(rows: &[SalesSummary]) -> CoreResult<Money> {
    Money::checked_sum(rows.iter().map(|r| r.total)).ok_or(CoreError::GrandTotalOverflow)
}
