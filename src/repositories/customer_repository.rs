use crate::models::{Customer, CustomerField, NewCustomer};
use crate::utils::errors::{map_write_error, AppError};
use sqlx::PgPool;

const FIND_BY_NAME_SQL: &str = r#"
    SELECT * FROM customer
    WHERE LOWER(TRIM(customer_firstname)) = LOWER(TRIM($1))
      AND LOWER(TRIM(customer_surname)) = LOWER(TRIM($2))
    ORDER BY customer_id DESC
    LIMIT 1
"#;

pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, customer: &NewCustomer) -> Result<Customer, AppError> {
        let result = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customer (
                customer_firstname, customer_surname, customer_phone_num,
                customer_address, customer_city, customer_email
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&customer.first_name)
        .bind(&customer.surname)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(&customer.city)
        .bind(&customer.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error("Customer", e))?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, AppError> {
        let result = sqlx::query_as::<_, Customer>("SELECT * FROM customer WHERE customer_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn find_by_name(
        &self,
        first_name: &str,
        surname: &str,
    ) -> Result<Option<Customer>, AppError> {
        let result = sqlx::query_as::<_, Customer>(FIND_BY_NAME_SQL)
            .bind(first_name.trim())
            .bind(surname.trim())
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    /// La columna sale de un enum cerrado; el valor siempre va como parámetro
    pub async fn update_field(
        &self,
        id: i32,
        field: CustomerField,
        value: Option<&str>,
    ) -> Result<u64, AppError> {
        let query = format!(
            "UPDATE customer SET {} = $1 WHERE customer_id = $2",
            field.column()
        );

        let result = sqlx::query(&query)
            .bind(value)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error("Customer", e))?;

        Ok(result.rows_affected())
    }

    pub async fn with_missing_info(&self) -> Result<Vec<Customer>, AppError> {
        let result = sqlx::query_as::<_, Customer>(
            r#"
            SELECT * FROM customer
            WHERE customer_phone_num IS NULL OR customer_address IS NULL
               OR customer_city IS NULL OR customer_email IS NULL
            ORDER BY customer_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_lookup_trims_stored_names() {
        assert!(FIND_BY_NAME_SQL.contains("LOWER(TRIM(customer_firstname))"));
        assert!(FIND_BY_NAME_SQL.contains("LOWER(TRIM(customer_surname))"));
    }
}
