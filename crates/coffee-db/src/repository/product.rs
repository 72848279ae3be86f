//! # Product Repository
//!
//! Database operations for the menu: beverages and ingredients.
//!
//! ## Menu Lookups
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How a Menu Item Is Resolved                          │
//! │                                                                         │
//! │  --beverage Latte                  (no flag)                           │
//! │       │                                 │                               │
//! │       ▼                                 ▼                               │
//! │  get_by_name::<Beverage>("Latte")   get_all::<Beverage>()              │
//! │       │                                 │                               │
//! │       ▼                                 ▼                               │
//! │  ┌──────────────────────┐          1. Espresso price: 3                │
//! │  │ beverage             │          2. Latte price: 5                   │
//! │  │ Espresso        3    │          3. Mocha price: 6                   │
//! │  │ Latte           5  ◄─┼─ exact,  (operator picks a number)           │
//! │  │ Mocha           6    │  case-sensitive                              │
//! │  └──────────────────────┘                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::unit_of_work::UnitOfWork;
use coffee_core::{Beverage, CatalogItem, Ingredient, Product, ProductKind};

/// A menu item type that can be read straight out of its table.
pub trait CatalogRow: CatalogItem + for<'r> FromRow<'r, SqliteRow> + Send + Unpin {}

impl<P> CatalogRow for P where P: CatalogItem + for<'r> FromRow<'r, SqliteRow> + Send + Unpin {}

/// Repository for menu database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let drinks = repo.get_all::<Beverage>().await?;
/// let milk = repo.get_by_name::<Ingredient>("Milk").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists the whole menu of one kind, in the order it was stocked.
    pub async fn get_all<P: CatalogRow>(&self) -> DbResult<Vec<P>> {
        let table = P::KIND.table();
        debug!(table, "Listing menu");

        let sql = format!("SELECT name, price FROM {table} ORDER BY rowid");

        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let items = sqlx::query_as::<_, P>(&sql).fetch_all(uow.conn()).await?;
        uow.commit().await?;

        debug!(table, count = items.len(), "Listed menu");
        Ok(items)
    }

    /// Gets a menu item by its exact, case-sensitive name.
    ///
    /// ## Returns
    /// * `Ok(Some(item))` - Item found
    /// * `Ok(None)` - Not on the menu
    pub async fn get_by_name<P: CatalogRow>(&self, name: &str) -> DbResult<Option<P>> {
        let table = P::KIND.table();
        debug!(table, name = %name, "Looking up menu item");

        let sql = format!("SELECT name, price FROM {table} WHERE name = ?1");

        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let item = sqlx::query_as::<_, P>(&sql)
            .bind(name)
            .fetch_optional(uow.conn())
            .await?;
        uow.commit().await?;

        Ok(item)
    }

    /// Inserts a menu item.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - Already on the menu
    /// * `Err(DbError::QueryFailed)` - Negative price (CHECK constraint)
    pub async fn insert<P: CatalogItem>(&self, item: &P) -> DbResult<()> {
        let kind = P::KIND;
        let table = kind.table();
        debug!(table, name = %item.name(), "Inserting menu item");

        let sql = format!("INSERT INTO {table} (name, price) VALUES (?1, ?2)");

        let mut uow = UnitOfWork::begin(&self.pool).await?;
        sqlx::query(&sql)
            .bind(item.name())
            .bind(item.price())
            .execute(uow.conn())
            .await
            .map_err(|e| DbError::from(e).with_value(item.name()))?;
        uow.commit().await?;

        info!(kind = %kind, name = %item.name(), price = %item.price(), "Menu item added");
        Ok(())
    }

    /// Inserts either kind of menu item.
    pub async fn insert_product(&self, product: &Product) -> DbResult<()> {
        match product {
            Product::Beverage(b) => self.insert::<Beverage>(b).await,
            Product::Ingredient(i) => self.insert::<Ingredient>(i).await,
        }
    }

    /// Counts menu items of one kind.
    pub async fn count(&self, kind: ProductKind) -> DbResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", kind.table());

        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(uow.conn()).await?;
        uow.commit().await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use coffee_core::Money;

    async fn repo() -> ProductRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().products()
    }

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let repo = repo().await;
        repo.insert(&Beverage::new("Espresso", Money::from_units(3)))
            .await
            .unwrap();

        let found = repo.get_by_name::<Beverage>("Espresso").await.unwrap();
        assert_eq!(found, Some(Beverage::new("Espresso", Money::from_units(3))));

        assert!(repo.get_by_name::<Beverage>("espresso").await.unwrap().is_none());
        assert!(repo.get_by_name::<Ingredient>("Espresso").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_all_keeps_insertion_order() {
        let repo = repo().await;
        for (name, price) in [("Syrup", 2), ("Milk", 1), ("Sugar", 0)] {
            repo.insert(&Ingredient::new(name, Money::from_units(price)))
                .await
                .unwrap();
        }

        let all = repo.get_all::<Ingredient>().await.unwrap();
        let names: Vec<&str> = all.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Syrup", "Milk", "Sugar"]);
        assert_eq!(all[2].price, Money::zero());
        assert!(repo.get_all::<Beverage>().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_and_negative_price_rejected() {
        let repo = repo().await;
        let latte = Beverage::new("Latte", Money::from_units(5));
        repo.insert(&latte).await.unwrap();

        let err = repo.insert(&latte).await.unwrap_err();
        assert!(err.is_duplicate());

        let err = repo
            .insert(&Beverage::new("Free Lunch", Money::from_units(-1)))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::QueryFailed(_)));
        assert_eq!(repo.count(ProductKind::Beverage).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_product_dispatches_by_kind() {
        let repo = repo().await;
        let milk = ProductKind::Ingredient.product("Milk", Money::from_units(1));
        repo.insert_product(&milk).await.unwrap();

        assert_eq!(repo.count(ProductKind::Ingredient).await.unwrap(), 1);
        assert_eq!(repo.count(ProductKind::Beverage).await.unwrap(), 0);
    }
}
