use crate::models::{NewOrderLine, Order, OrderLine};
use crate::utils::errors::{map_write_error, AppError};
use rust_decimal::Decimal;
use sqlx::PgPool;

pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// El número de pedido lo devuelve el propio INSERT
    pub async fn create(&self, customer_id: i32, restaurant_id: i32) -> Result<Order, AppError> {
        let result = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (customer_id, restaurant_id, total_cost, driver_id, finalised)
            VALUES ($1, $2, NULL, NULL, FALSE)
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(restaurant_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error("Order", e))?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Order>, AppError> {
        let result = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE order_number = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn find_for(
        &self,
        customer_id: i32,
        restaurant_id: i32,
    ) -> Result<Vec<Order>, AppError> {
        let result = sqlx::query_as::<_, Order>(
            r#"
            SELECT * FROM orders
            WHERE customer_id = $1 AND restaurant_id = $2
            ORDER BY order_number
            "#,
        )
        .bind(customer_id)
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn find_incomplete(&self) -> Result<Vec<Order>, AppError> {
        let result = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE total_cost IS NULL OR driver_id IS NULL ORDER BY order_number",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn find_pending(&self) -> Result<Vec<Order>, AppError> {
        let result = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE finalised = FALSE ORDER BY order_number",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn find_open_for_driver(&self, driver_id: i32) -> Result<Vec<Order>, AppError> {
        let result = sqlx::query_as::<_, Order>(
            r#"
            SELECT * FROM orders
            WHERE driver_id = $1 AND finalised = FALSE
            ORDER BY order_number
            "#,
        )
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn set_provision(
        &self,
        id: i32,
        total: Decimal,
        driver_id: i32,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE orders SET total_cost = $1, driver_id = $2
            WHERE order_number = $3 AND finalised = FALSE
            "#,
        )
        .bind(total)
        .bind(driver_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("Order", e))?;

        Ok(result.rows_affected())
    }

    pub async fn set_total(&self, id: i32, total: Decimal) -> Result<u64, AppError> {
        let result = sqlx::query("UPDATE orders SET total_cost = $1 WHERE order_number = $2")
            .bind(total)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error("Order", e))?;

        Ok(result.rows_affected())
    }

    pub async fn mark_finalised(&self, id: i32) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE orders SET finalised = TRUE WHERE order_number = $1 AND finalised = FALSE",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn create_line(&self, line: &NewOrderLine) -> Result<OrderLine, AppError> {
        let result = sqlx::query_as::<_, OrderLine>(
            r#"
            INSERT INTO items_order (
                order_number, item_id, item_quantity, unit_price, item_cost,
                preparation_instructions
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(line.order_id)
        .bind(line.item_id)
        .bind(line.quantity)
        .bind(line.unit_price)
        .bind(line.line_cost())
        .bind(&line.instructions)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error("Order line", e))?;

        Ok(result)
    }

    pub async fn find_lines(&self, order_id: i32) -> Result<Vec<OrderLine>, AppError> {
        let result = sqlx::query_as::<_, OrderLine>(
            "SELECT * FROM items_order WHERE order_number = $1 ORDER BY line_id",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }
}
