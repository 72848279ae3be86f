//! # coffee-db: Database Layer for Coffee POS
//!
//! This crate provides database access for Coffee POS.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Coffee POS Data Flow                             │
//! │                                                                         │
//! │  Session flow (resolve user, record sale, show statistics)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     coffee-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ UserRepo      │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepo   │    │ 0001_init    │  │   │
//! │  │   │ UnitOfWork    │    │ SaleRepo      │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/coffee-pos/coffee.db (or --db PATH)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`unit_of_work`] - One transaction per store operation
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (user, product, sale)
//! - [`seed`] - Menu seeding, shared by the `seed` binary and tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use coffee_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("coffee.db")).await?;
//!
//! let alice = db.users().find(Role::Salesman, "Alice").await?;
//! let menu = db.products().get_all::<Beverage>().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;
pub mod unit_of_work;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{default_data_dir, default_database_path, Database, DbConfig, DB_FILE};
pub use unit_of_work::UnitOfWork;

// Repository re-exports for convenience
pub use repository::product::{CatalogRow, ProductRepository};
pub use repository::sale::SaleRepository;
pub use repository::user::UserRepository;
