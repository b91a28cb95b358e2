use crate::models::{Item, ItemUpdate, NewItem};
use crate::utils::errors::{map_write_error, AppError};
use sqlx::PgPool;

pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, item: &NewItem) -> Result<Item, AppError> {
        let result = sqlx::query_as::<_, Item>(
            "INSERT INTO item (item_name, item_price) VALUES ($1, $2) RETURNING *",
        )
        .bind(&item.name)
        .bind(item.price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error("Item", e))?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Item>, AppError> {
        let result = sqlx::query_as::<_, Item>("SELECT * FROM item WHERE item_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn update(&self, id: i32, update: &ItemUpdate) -> Result<u64, AppError> {
        let result = match update {
            ItemUpdate::Name(name) => {
                sqlx::query("UPDATE item SET item_name = $1 WHERE item_id = $2")
                    .bind(name)
                    .bind(id)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| map_write_error("Item", e))?
            }
            ItemUpdate::Price(price) => {
                sqlx::query("UPDATE item SET item_price = $1 WHERE item_id = $2")
                    .bind(price)
                    .bind(id)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| map_write_error("Item", e))?
            }
        };

        Ok(result.rows_affected())
    }
}
