//! Conexión a PostgreSQL
//!
//! Este módulo abre el pool y aplica el esquema idempotente de `sql/schema.sql`.

use sqlx::{Executor, PgPool};
use tracing::{error, info};

use crate::config::DatabaseConfig;
use crate::utils::errors::AppResult;

const SCHEMA: &str = include_str!("../../sql/schema.sql");

/// Conexión a la base de datos con su pool
#[derive(Clone)]
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Crear un pool de conexiones y asegurar el esquema
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        info!("🔗 Conectando a PostgreSQL: {}", config.masked_url());

        let pool = config.create_pool().await.map_err(|e| {
            error!("❌ Error conectando a la base de datos: {}", e);
            e
        })?;

        let connection = Self { pool };
        connection.ensure_schema().await?;

        info!("✅ Base de datos lista");
        Ok(connection)
    }

    /// Aplica el esquema; todas las sentencias usan `IF NOT EXISTS`
    pub async fn ensure_schema(&self) -> AppResult<()> {
        self.pool.execute(SCHEMA).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
