use crate::models::{Driver, DriverField, NewDriver, WorkloadDelta};
use crate::utils::errors::{map_write_error, AppError};
use sqlx::PgPool;

/// El último registrado gana entre nombres repetidos
const FIND_BY_NAME_SQL: &str = r#"
    SELECT * FROM driver
    WHERE LOWER(TRIM(driver_name)) = LOWER(TRIM($1))
    ORDER BY driver_id DESC
    LIMIT 1
"#;

/// Usa la misma expresión que `idx_driver_city_trimmed`
pub(crate) const FIND_BY_CITY_SQL: &str =
    "SELECT * FROM driver WHERE LOWER(TRIM(driver_city)) = LOWER(TRIM($1)) ORDER BY driver_id";

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, driver: &NewDriver) -> Result<Driver, AppError> {
        let result = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO driver (driver_name, driver_city, driver_workload)
            VALUES ($1, $2, 0)
            RETURNING *
            "#,
        )
        .bind(&driver.name)
        .bind(&driver.city)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error("Driver", e))?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Driver>, AppError> {
        let result = sqlx::query_as::<_, Driver>("SELECT * FROM driver WHERE driver_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Driver>, AppError> {
        let result = sqlx::query_as::<_, Driver>(FIND_BY_NAME_SQL)
            .bind(name.trim())
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn find_by_city(&self, city: &str) -> Result<Vec<Driver>, AppError> {
        let result = sqlx::query_as::<_, Driver>(FIND_BY_CITY_SQL)
            .bind(city)
            .fetch_all(&self.pool)
            .await?;

        Ok(result)
    }

    /// Una sola sentencia: no hay lectura previa que pueda quedar obsoleta
    pub async fn adjust_workload(&self, id: i32, delta: WorkloadDelta) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE driver
            SET driver_workload = driver_workload + $1
            WHERE driver_id = $2 AND driver_workload + $1 >= 0
            "#,
        )
        .bind(delta.amount())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn update_field(
        &self,
        id: i32,
        field: DriverField,
        value: &str,
    ) -> Result<u64, AppError> {
        let query = format!("UPDATE driver SET {} = $1 WHERE driver_id = $2", field.column());

        let result = sqlx::query(&query)
            .bind(value)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error("Driver", e))?;

        Ok(result.rows_affected())
    }
}
