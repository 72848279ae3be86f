//! # coffee-core: Pure Business Logic for Coffee POS
//!
//! This crate holds the domain of the coffee shop terminal as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Coffee POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    coffee-pos (apps/cli)                        │   │
//! │  │   flags ──► role/user prompts ──► sale or statistics           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ coffee-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   stats   │  │ validation│  │   │
//! │  │   │ Role,Sale │  │   Money   │  │  Summary  │  │   flags   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CONSOLE • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    coffee-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Role, ProductKind, Salesman, Beverage, Sale, ...)
//! - [`money`] - Integer Money type
//! - [`error`] - Domain error types
//! - [`validation`] - Flag and input validation
//! - [`stats`] - Per-salesman aggregation
//! - [`receipt`] - Bill text
//!
//! ## Example Usage
//!
//! ```rust
//! use coffee_core::{Account, Beverage, CatalogItem, Money, Sale, Salesman};
//! use coffee_core::receipt::render_receipt;
//!
//! let sale = Sale::new(
//!     &Salesman::new("Alice"),
//!     &Beverage::new("Espresso", Money::from_units(3)),
//!     None,
//! ).unwrap();
//! assert!(render_receipt(&sale).ends_with("Total Price: 3\n"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod receipt;
pub mod stats;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use stats::SalesSummary;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Input that aborts the session at any prompt that accepts it.
pub const QUIT: &str = "q";

/// The only affirmative answer at a yes/no prompt.
pub const YES: &str = "y";
