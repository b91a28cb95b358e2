use crate::models::{NewRestaurant, Restaurant, RestaurantField};
use crate::utils::errors::{map_write_error, AppError};
use sqlx::PgPool;

const FIND_BY_NAME_SQL: &str = r#"
    SELECT * FROM restaurant
    WHERE LOWER(TRIM(restaurant_name)) = LOWER(TRIM($1))
    ORDER BY restaurant_id DESC
    LIMIT 1
"#;

pub struct RestaurantRepository {
    pool: PgPool,
}

impl RestaurantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, restaurant: &NewRestaurant) -> Result<Restaurant, AppError> {
        let result = sqlx::query_as::<_, Restaurant>(
            r#"
            INSERT INTO restaurant (restaurant_name, restaurant_phone_num, restaurant_city)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&restaurant.name)
        .bind(&restaurant.phone)
        .bind(&restaurant.city)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error("Restaurant", e))?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Restaurant>, AppError> {
        let result =
            sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurant WHERE restaurant_id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(result)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Restaurant>, AppError> {
        let result = sqlx::query_as::<_, Restaurant>(FIND_BY_NAME_SQL)
            .bind(name.trim())
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn update_field(
        &self,
        id: i32,
        field: RestaurantField,
        value: Option<&str>,
    ) -> Result<u64, AppError> {
        let query = format!(
            "UPDATE restaurant SET {} = $1 WHERE restaurant_id = $2",
            field.column()
        );

        let result = sqlx::query(&query)
            .bind(value)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error("Restaurant", e))?;

        Ok(result.rows_affected())
    }
}
