//! # Repository Module
//!
//! Database repository implementations for Coffee POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Session flow (coffee-pos)                                             │
//! │       │                                                                 │
//! │       │  db.products().get_by_name::<Beverage>("Latte")                │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── get_all::<P>()                                                    │
//! │  ├── get_by_name::<P>(name)                                            │
//! │  └── insert(&item)                                                     │
//! │       │                                                                 │
//! │       │  UnitOfWork: BEGIN → statement → COMMIT                        │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Table names are never taken from input: they come from the closed
//! [`coffee_core::Role`] and [`coffee_core::ProductKind`] tags.
//!
//! ## Available Repositories
//!
//! - [`UserRepository`](user::UserRepository) - Salesman and manager accounts
//! - [`ProductRepository`](product::ProductRepository) - Beverages and ingredients
//! - [`SaleRepository`](sale::SaleRepository) - Recorded sales

pub mod product;
pub mod sale;
pub mod user;
