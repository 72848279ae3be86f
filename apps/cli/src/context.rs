//! # Application Context
//!
//! Everything a session flow needs, built once in `main` and passed down
//! by reference. There is no global database handle.

use tracing::info;

use crate::config::AppConfig;
use crate::error::CliResult;
use coffee_db::{Database, DbConfig};

#[derive(Debug, Clone)]
pub struct AppContext {
    pub db: Database,
    pub config: AppConfig,
}

impl AppContext {
    pub fn new(db: Database, config: AppConfig) -> Self {
        AppContext { db, config }
    }

    /// Opens (and migrates) the configured database.
    pub async fn connect(config: AppConfig) -> CliResult<Self> {
        let db = Database::new(DbConfig::new(&config.database_path)).await?;
        info!(path = %config.database_path.display(), "Database ready");
        Ok(AppContext::new(db, config))
    }

    /// Releases the connection pool.
    pub async fn close(&self) {
        self.db.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_connect_opens_the_configured_file() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::in_dir(temp.path());

        let ctx = AppContext::connect(config.clone()).await.unwrap();
        assert_eq!(ctx.config, config);
        assert!(ctx.config.database_path.exists());
        assert_eq!(ctx.db.sales().count().await.unwrap(), 0);
        ctx.close().await;
    }
}
