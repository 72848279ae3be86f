//! # User Repository
//!
//! Database operations for salesman and manager accounts.
//!
//! Both tables have the same shape (`name TEXT PRIMARY KEY`), so one
//! repository serves both. Typed calls pick the table from
//! [`Account::ROLE`]; role-dispatched calls take a [`Role`] known only at
//! runtime and hand back the [`User`] union.
//!
//! ```text
//! get_all::<Salesman>()          SELECT name FROM salesman ORDER BY rowid
//! list(Role::Manager)            SELECT name FROM manager  ORDER BY rowid
//! find(Role::Salesman, "Alice")  SELECT name FROM salesman WHERE name = ?1
//! create(&user)                  INSERT INTO <role table> (name) VALUES (?1)
//! ```

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::unit_of_work::UnitOfWork;
use coffee_core::{Account, Manager, Role, Salesman, User};

/// Repository for account database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = UserRepository::new(pool);
///
/// let everyone = repo.get_all::<Salesman>().await?;
/// let alice = repo.find(Role::Salesman, "Alice").await?;
/// ```
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Lists every account of one role, oldest first.
    pub async fn get_all<A>(&self) -> DbResult<Vec<A>>
    where
        A: Account + for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let table = A::ROLE.table();
        debug!(table, "Listing accounts");

        let sql = format!("SELECT name FROM {table} ORDER BY rowid");

        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let accounts = sqlx::query_as::<_, A>(&sql)
            .fetch_all(uow.conn())
            .await?;
        uow.commit().await?;

        debug!(table, count = accounts.len(), "Listed accounts");
        Ok(accounts)
    }

    /// Looks an account up by its exact name.
    ///
    /// ## Returns
    /// * `Ok(Some(account))` - Account found
    /// * `Ok(None)` - No account with that name
    pub async fn get_by_name<A>(&self, name: &str) -> DbResult<Option<A>>
    where
        A: Account + for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let table = A::ROLE.table();
        debug!(table, name = %name, "Looking up account");

        let sql = format!("SELECT name FROM {table} WHERE name = ?1");

        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let account = sqlx::query_as::<_, A>(&sql)
            .bind(name)
            .fetch_optional(uow.conn())
            .await?;
        uow.commit().await?;

        Ok(account)
    }

    /// Inserts a new account.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - The name is taken
    pub async fn insert<A: Account>(&self, account: &A) -> DbResult<()> {
        self.insert_into(A::ROLE, account.name()).await
    }

    /// Whether an account of `role` named `name` exists.
    pub async fn exists(&self, role: Role, name: &str) -> DbResult<bool> {
        Ok(self.find(role, name).await?.is_some())
    }

    // =========================================================================
    // Role-dispatched access
    // =========================================================================

    /// Lists every account of `role`, oldest first.
    pub async fn list(&self, role: Role) -> DbResult<Vec<User>> {
        Ok(match role {
            Role::Salesman => into_users(self.get_all::<Salesman>().await?),
            Role::Manager => into_users(self.get_all::<Manager>().await?),
        })
    }

    /// Looks up an account of `role` by exact name.
    pub async fn find(&self, role: Role, name: &str) -> DbResult<Option<User>> {
        Ok(match role {
            Role::Salesman => self
                .get_by_name::<Salesman>(name)
                .await?
                .map(Account::into_user),
            Role::Manager => self
                .get_by_name::<Manager>(name)
                .await?
                .map(Account::into_user),
        })
    }

    /// Persists a user in the table of its role.
    pub async fn create(&self, user: &User) -> DbResult<()> {
        self.insert_into(user.role(), user.name()).await
    }

    async fn insert_into(&self, role: Role, name: &str) -> DbResult<()> {
        let table = role.table();
        debug!(table, name = %name, "Inserting account");

        let sql = format!("INSERT INTO {table} (name) VALUES (?1)");

        let mut uow = UnitOfWork::begin(&self.pool).await?;
        sqlx::query(&sql)
            .bind(name)
            .execute(uow.conn())
            .await
            .map_err(|e| DbError::from(e).with_value(name))?;
        uow.commit().await?;

        info!(role = %role, name = %name, "Account created");
        Ok(())
    }
}

fn into_users<A: Account>(accounts: Vec<A>) -> Vec<User> {
    accounts.into_iter().map(Account::into_user).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn repo() -> UserRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().users()
    }

    #[tokio::test]
    async fn test_insert_and_get_by_name() {
        let repo = repo().await;
        repo.insert(&Salesman::new("Alice")).await.unwrap();

        let found = repo.get_by_name::<Salesman>("Alice").await.unwrap();
        assert_eq!(found, Some(Salesman::new("Alice")));

        // Names are exact and case-sensitive, and roles don't mix.
        assert!(repo.get_by_name::<Salesman>("alice").await.unwrap().is_none());
        assert!(repo.get_by_name::<Manager>("Alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_all_keeps_insertion_order() {
        let repo = repo().await;
        for name in ["Zoe", "Alice", "Mike"] {
            repo.insert(&Salesman::new(name)).await.unwrap();
        }

        let names: Vec<String> = repo
            .get_all::<Salesman>()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Zoe", "Alice", "Mike"]);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_rejected() {
        let repo = repo().await;
        repo.insert(&Manager::new("Bob")).await.unwrap();

        let err = repo.insert(&Manager::new("Bob")).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref value, .. } if value == "Bob"));

        // Same name under the other role is a different account.
        repo.insert(&Salesman::new("Bob")).await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected_by_schema() {
        let repo = repo().await;
        assert!(repo.insert(&Salesman::new("  ")).await.is_err());
        assert!(repo.list(Role::Salesman).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_role_dispatch() {
        let repo = repo().await;
        let user = Role::Manager.account("Carol");
        repo.create(&user).await.unwrap();

        assert!(repo.exists(Role::Manager, "Carol").await.unwrap());
        assert!(!repo.exists(Role::Salesman, "Carol").await.unwrap());

        let found = repo.find(Role::Manager, "Carol").await.unwrap();
        assert_eq!(found, Some(user));

        let listed = repo.list(Role::Manager).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].role(), Role::Manager);
    }

    #[tokio::test]
    async fn test_lookup_is_repeatable() {
        let repo = repo().await;
        repo.insert(&Salesman::new("Alice")).await.unwrap();

        let first = repo.find(Role::Salesman, "Alice").await.unwrap();
        let second = repo.find(Role::Salesman, "Alice").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(repo.list(Role::Salesman).await.unwrap().len(), 1);
    }
}
