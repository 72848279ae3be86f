//! # Unit of Work
//!
//! One logical store operation = one transaction on one pooled connection.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Unit of Work Lifecycle                            │
//! │                                                                         │
//! │  UnitOfWork::begin(&pool)   ← acquire connection, BEGIN                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  query(..).execute(uow.conn())   (one or more statements)              │
//! │       │                                                                 │
//! │       ├── uow.commit()     ← COMMIT, connection back to the pool       │
//! │       │                                                                 │
//! │       └── drop(uow) / ?    ← ROLLBACK, connection back to the pool     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every repository method opens exactly one unit and finishes it before
//! returning, so no transaction ever spans an operator prompt. Records read
//! through a unit are plain values, detached from the connection.

use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};

/// An open transaction on a pooled connection.
///
/// Dropping it without calling [`UnitOfWork::commit`] rolls back.
///
/// ## Example
/// ```rust,ignore
/// let mut uow = UnitOfWork::begin(db.pool()).await?;
/// sqlx::query("INSERT INTO salesman (name) VALUES (?1)")
///     .bind("Alice")
///     .execute(uow.conn())
///     .await?;
/// uow.commit().await?;
/// ```
#[derive(Debug)]
pub struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl UnitOfWork {
    /// Acquires a connection and begins a transaction.
    pub async fn begin(pool: &SqlitePool) -> DbResult<Self> {
        let tx = pool.begin().await.map_err(|e| match e {
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            other => DbError::TransactionFailed(other.to_string()),
        })?;

        debug!("Unit of work started");
        Ok(UnitOfWork { tx })
    }

    /// The connection to run statements on.
    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.tx
    }

    /// Commits and releases the connection.
    pub async fn commit(self) -> DbResult<()> {
        self.tx.commit().await.map_err(|e| {
            warn!(error = %e, "Commit failed");
            DbError::TransactionFailed(e.to_string())
        })?;

        debug!("Unit of work committed");
        Ok(())
    }

    /// Rolls back explicitly and releases the connection.
    pub async fn rollback(self) -> DbResult<()> {
        self.tx
            .rollback()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!("Unit of work rolled back");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn salesman_count(db: &Database) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM salesman")
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_commit_persists() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut uow = UnitOfWork::begin(db.pool()).await.unwrap();
        sqlx::query("INSERT INTO salesman (name) VALUES (?1)")
            .bind("Alice")
            .execute(uow.conn())
            .await
            .unwrap();
        uow.commit().await.unwrap();

        assert_eq!(salesman_count(&db).await, 1);
    }

    #[tokio::test]
    async fn test_drop_rolls_back() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        {
            let mut uow = UnitOfWork::begin(db.pool()).await.unwrap();
            sqlx::query("INSERT INTO salesman (name) VALUES (?1)")
                .bind("Alice")
                .execute(uow.conn())
                .await
                .unwrap();
        }

        assert_eq!(salesman_count(&db).await, 0);
    }

    #[tokio::test]
    async fn test_explicit_rollback() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut uow = UnitOfWork::begin(db.pool()).await.unwrap();
        sqlx::query("INSERT INTO salesman (name) VALUES (?1)")
            .bind("Bob")
            .execute(uow.conn())
            .await
            .unwrap();
        uow.rollback().await.unwrap();

        assert_eq!(salesman_count(&db).await, 0);
    }
}
