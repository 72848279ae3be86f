//! # Sale Repository
//!
//! Database operations for recorded sales.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Lifecycle                                    │
//! │                                                                         │
//! │  1. BUILD (coffee-core)                                                │
//! │     └── Sale::new(salesman, beverage, ingredient?)                     │
//! │         price = beverage.price + ingredient.price                      │
//! │                                                                         │
//! │  2. PERSIST                                                            │
//! │     └── insert() → one row in `sale`, foreign keys checked             │
//! │                                                                         │
//! │  3. REPORT                                                             │
//! │     └── get_by_salesman() → statistics for the manager                 │
//! │                                                                         │
//! │  Sales are never updated or deleted.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;
use crate::unit_of_work::UnitOfWork;
use coffee_core::Sale;

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Persists a sale.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - Salesman or menu item not stored
    pub async fn insert(&self, sale: &Sale) -> DbResult<()> {
        debug!(id = %sale.id(), salesman = %sale.salesman_name(), "Inserting sale");

        let mut uow = UnitOfWork::begin(&self.pool).await?;
        sqlx::query(
            r#"
            INSERT INTO sale (
                id, salesman_name, beverage_name, ingredient_name,
                price, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(sale.id())
        .bind(sale.salesman_name())
        .bind(sale.beverage_name())
        .bind(sale.ingredient_name())
        .bind(sale.price())
        .bind(sale.created_at())
        .execute(uow.conn())
        .await?;
        uow.commit().await?;

        info!(
            id = %sale.id(),
            salesman = %sale.salesman_name(),
            beverage = %sale.beverage_name(),
            ingredient = ?sale.ingredient_name(),
            price = %sale.price(),
            "Sale recorded"
        );
        Ok(())
    }

    /// Lists every sale of one salesman, in the order they were made.
    pub async fn get_by_salesman(&self, salesman_name: &str) -> DbResult<Vec<Sale>> {
        debug!(salesman = %salesman_name, "Fetching sales");

        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, salesman_name, beverage_name, ingredient_name, price, created_at
            FROM sale
            WHERE salesman_name = ?1
            ORDER BY rowid
            "#,
        )
        .bind(salesman_name)
        .fetch_all(uow.conn())
        .await?;
        uow.commit().await?;

        debug!(salesman = %salesman_name, count = sales.len(), "Fetched sales");
        Ok(sales)
    }

    /// Counts all recorded sales (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sale")
            .fetch_one(uow.conn())
            .await?;
        uow.commit().await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use coffee_core::{Account, Beverage, CatalogItem, Ingredient, Money, Salesman};

    struct Fixture {
        db: Database,
        alice: Salesman,
        espresso: Beverage,
        latte: Beverage,
        syrup: Ingredient,
    }

    async fn fixture() -> Fixture {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let alice = Salesman::new("Alice");
        let espresso = Beverage::new("Espresso", Money::from_units(3));
        let latte = Beverage::new("Latte", Money::from_units(5));
        let syrup = Ingredient::new("Syrup", Money::from_units(2));

        db.users().insert(&alice).await.unwrap();
        db.users().insert(&Salesman::new("Bob")).await.unwrap();
        db.products().insert(&espresso).await.unwrap();
        db.products().insert(&latte).await.unwrap();
        db.products().insert(&syrup).await.unwrap();

        Fixture {
            db,
            alice,
            espresso,
            latte,
            syrup,
        }
    }

    #[tokio::test]
    async fn test_insert_round_trips_every_column() {
        let f = fixture().await;
        let sale = Sale::new(&f.alice, &f.latte, Some(&f.syrup)).unwrap();
        f.db.sales().insert(&sale).await.unwrap();

        let stored = f.db.sales().get_by_salesman("Alice").await.unwrap();
        assert_eq!(stored.len(), 1);
        let stored = &stored[0];
        assert_eq!(stored.id(), sale.id());
        assert_eq!(stored.beverage_name(), "Latte");
        assert_eq!(stored.ingredient_name(), Some("Syrup"));
        assert_eq!(stored.price(), Money::from_units(7));
        assert_eq!(stored.created_at(), sale.created_at());
    }

    #[tokio::test]
    async fn test_get_by_salesman_filters_and_orders() {
        let f = fixture().await;
        let bob = Salesman::new("Bob");

        let first = Sale::new(&f.alice, &f.espresso, None).unwrap();
        let second = Sale::new(&f.alice, &f.latte, None).unwrap();
        f.db.sales().insert(&first).await.unwrap();
        f.db.sales()
            .insert(&Sale::new(&bob, &f.latte, None).unwrap())
            .await
            .unwrap();
        f.db.sales().insert(&second).await.unwrap();

        let sales = f.db.sales().get_by_salesman("Alice").await.unwrap();
        let ids: Vec<&str> = sales.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![first.id(), second.id()]);

        let total = Money::checked_sum(sales.iter().map(|s| s.price()));
        assert_eq!(total, Some(Money::from_units(8)));

        assert!(f.db.sales().get_by_salesman("Nobody").await.unwrap().is_empty());
        assert_eq!(f.db.sales().count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_unknown_references_are_rejected() {
        let f = fixture().await;
        let ghost = Salesman::new("Ghost");
        let sale = Sale::new(&ghost, &f.espresso, None).unwrap();

        let err = f.db.sales().insert(&sale).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));

        let mocha = Beverage::new("Mocha", Money::from_units(6));
        let err = f
            .db
            .sales()
            .insert(&Sale::new(&f.alice, &mocha, None).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));

        assert_eq!(f.db.sales().count().await.unwrap(), 0);
    }
}
