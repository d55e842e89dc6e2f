//! SQLite-backed persistence adapters.

mod audit;
mod settings;
mod util;

use sqlx::Error as SqlxError;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::config::DatabaseSettings;
use crate::infra::error::InfraError;

/// One pool, shared by every repository trait the crate implements.
#[derive(Clone)]
pub struct SqliteRepositories {
    pool: SqlitePool,
}

impl SqliteRepositories {
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, InfraError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect(&settings.url)
            .await
            .map_err(|err| InfraError::database(format!("failed to connect: {err}")))?;

        info!(url = %settings.url, "Connected to sqlite database");
        Ok(Self { pool })
    }

    /// Wrap an existing pool; used by tests running against `sqlite::memory:`.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), InfraError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|err| InfraError::database(format!("migration failed: {err}")))?;
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), SqlxError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
