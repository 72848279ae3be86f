//! # Database Pool Management
//!
//! Connection pool creation and configuration for SQLite.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  coffee-pos startup                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path) ← Configure pool settings                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← Create pool + run migrations            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool                    │                           │
//! │  │  ┌─────┐                                 │                           │
//! │  │  │Conn1│         (max_connections = 1)   │                           │
//! │  │  └─────┘                                 │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       │ One operator, one prompt at a time                             │
//! │       ▼                                                                 │
//! │  users().insert()   ──► UnitOfWork ──► Conn1 ──► released              │
//! │  sales().insert()   ──► UnitOfWork ──► Conn1 ──► released              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled so a manager can read
//! statistics from a second terminal while a salesman is mid-session.

use directories::ProjectDirs;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::product::ProductRepository;
use crate::repository::sale::SaleRepository;
use crate::repository::user::UserRepository;

/// Path understood as "no file, keep everything in memory".
pub const IN_MEMORY: &str = ":memory:";

/// Database file name inside the data directory.
pub const DB_FILE: &str = "coffee.db";

/// Platform data directory, or the working directory if there is none.
///
/// - **Linux**: `~/.local/share/coffee-pos/`
/// - **macOS**: `~/Library/Application Support/com.coffee.pos/`
/// - **Windows**: `%APPDATA%\coffee\pos\data\`
///
/// `coffee-pos` and `seed` both default to this directory, so a freshly
/// seeded menu is the one the terminal opens.
pub fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "coffee", "pos")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `<data dir>/coffee.db`.
pub fn default_database_path() -> PathBuf {
    default_data_dir().join(DB_FILE)
}

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("/path/to/coffee.db")).await?;
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 1 (a single operator never needs more)
    pub max_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    ///
    /// ## Arguments
    /// * `path` - Path to the SQLite database file. The file and its parent
    ///   directory are created if they don't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let db = Database::new(DbConfig::in_memory()).await?;
    /// // Database is isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY),
            max_connections: 1, // In-memory requires single connection
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }

    fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(IN_MEMORY)
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cloning is cheap: the pool is reference counted. Every repository
/// returned here opens one [`UnitOfWork`](crate::UnitOfWork) per call.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("coffee.db")).await?;
/// let latte = db.products().get_by_name::<Beverage>("Latte").await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,
}

impl Database {
    /// Creates a new database connection pool.
    ///
    /// ## What This Does
    /// 1. Creates the database file (and its directory) if missing
    /// 2. Configures SQLite:
    ///    - WAL mode
    ///    - NORMAL synchronous (balance of safety/speed)
    ///    - Foreign keys enabled
    /// 3. Creates the connection pool
    /// 4. Runs migrations (if enabled)
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        let connect_options = if config.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            if let Some(parent) = config.database_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        DbError::ConnectionFailed(format!(
                            "cannot create {}: {}",
                            parent.display(),
                            e
                        ))
                    })?;
                }
            }
            SqliteConnectOptions::new().filename(&config.database_path)
        };

        let connect_options = connect_options
            // Readers don't block the writer
            .journal_mode(SqliteJournalMode::Wal)
            // May lose the last transaction on power loss, never corrupts
            .synchronous(SqliteSynchronous::Normal)
            // SQLite has them disabled by default for backwards compatibility
            .foreign_keys(true)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Runs database migrations.
    ///
    /// Idempotent: applied migrations are tracked in `_sqlx_migrations`.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the salesman/manager repository.
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    /// Returns the beverage/ingredient repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let menu = db.products().get_all::<Beverage>().await?;
    /// ```
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Returns the sale repository.
    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.pool.clone())
    }

    /// Closes the database connection pool.
    ///
    /// ## Note
    /// After calling close, all repository operations will fail.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert_eq!(db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_file_database_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("coffee.db");

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        assert_eq!(db.sales().count().await.unwrap(), 0);
        assert!(path.exists());
        db.close().await;
    }

    #[tokio::test]
    async fn test_closed_pool_rejects_queries() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;
        assert!(db.sales().count().await.is_err());
    }

    #[test]
    fn test_default_database_lives_in_data_dir() {
        let path = default_database_path();
        assert_eq!(path.parent(), Some(default_data_dir().as_path()));
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(DB_FILE));
    }

    #[test]
    fn test_config_defaults() {
        let config = DbConfig::new("/tmp/test.db");

        assert_eq!(config.max_connections, 1);
        assert!(config.run_migrations);
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
    }
}
