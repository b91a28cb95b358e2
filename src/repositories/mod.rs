//! Repositorios
//!
//! `FoodStore` es la frontera de persistencia que usan los servicios. `PgStore`
//! la implementa sobre PostgreSQL componiendo un repositorio por tabla;
//! `InMemoryStore` la implementa en memoria con la misma semántica.
//!
//! Las operaciones de escritura devuelven el número de filas afectadas en lugar
//! de dejarlo en un contador compartido.

pub mod customer_repository;
pub mod driver_repository;
pub mod item_repository;
pub mod memory_store;
pub mod order_repository;
pub mod pg_store;
pub mod restaurant_repository;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::models::{
    Customer, CustomerField, Driver, DriverField, Item, ItemUpdate, NewCustomer, NewDriver,
    NewItem, NewOrderLine, NewRestaurant, Order, OrderLine, Restaurant, RestaurantField,
    WorkloadDelta,
};
use crate::utils::errors::AppResult;

pub use memory_store::InMemoryStore;
pub use pg_store::PgStore;

#[async_trait]
pub trait FoodStore: Send + Sync {
    // Customers
    async fn insert_customer(&self, customer: &NewCustomer) -> AppResult<Customer>;
    async fn find_customer(&self, id: i32) -> AppResult<Option<Customer>>;
    async fn find_customer_by_name(&self, first_name: &str, surname: &str)
        -> AppResult<Option<Customer>>;
    async fn update_customer_field(
        &self,
        id: i32,
        field: CustomerField,
        value: Option<&str>,
    ) -> AppResult<u64>;
    async fn customers_with_missing_info(&self) -> AppResult<Vec<Customer>>;

    // Restaurants
    async fn insert_restaurant(&self, restaurant: &NewRestaurant) -> AppResult<Restaurant>;
    async fn find_restaurant(&self, id: i32) -> AppResult<Option<Restaurant>>;
    async fn find_restaurant_by_name(&self, name: &str) -> AppResult<Option<Restaurant>>;
    async fn update_restaurant_field(
        &self,
        id: i32,
        field: RestaurantField,
        value: Option<&str>,
    ) -> AppResult<u64>;

    // Items
    async fn insert_item(&self, item: &NewItem) -> AppResult<Item>;
    async fn find_item(&self, id: i32) -> AppResult<Option<Item>>;
    async fn update_item(&self, id: i32, update: &ItemUpdate) -> AppResult<u64>;

    // Drivers
    async fn insert_driver(&self, driver: &NewDriver) -> AppResult<Driver>;
    async fn find_driver(&self, id: i32) -> AppResult<Option<Driver>>;
    async fn find_driver_by_name(&self, name: &str) -> AppResult<Option<Driver>>;
    /// Drivers registrados en la ciudad, ordenados por id
    async fn drivers_in_city(&self, city: &str) -> AppResult<Vec<Driver>>;
    /// Incremento/decremento atómico; un decremento nunca baja de cero
    async fn adjust_workload(&self, id: i32, delta: WorkloadDelta) -> AppResult<u64>;
    async fn update_driver_field(&self, id: i32, field: DriverField, value: &str)
        -> AppResult<u64>;

    // Orders
    async fn insert_order(&self, customer_id: i32, restaurant_id: i32) -> AppResult<Order>;
    async fn find_order(&self, id: i32) -> AppResult<Option<Order>>;
    async fn orders_for(&self, customer_id: i32, restaurant_id: i32) -> AppResult<Vec<Order>>;
    async fn incomplete_orders(&self) -> AppResult<Vec<Order>>;
    async fn pending_orders(&self) -> AppResult<Vec<Order>>;
    async fn orders_for_driver(&self, driver_id: i32) -> AppResult<Vec<Order>>;
    async fn set_order_provision(&self, id: i32, total: Decimal, driver_id: i32)
        -> AppResult<u64>;
    async fn set_order_total(&self, id: i32, total: Decimal) -> AppResult<u64>;
    /// Solo marca pedidos no finalizados; devuelve 0 en otro caso
    async fn mark_finalised(&self, id: i32) -> AppResult<u64>;

    // Order lines
    async fn insert_line(&self, line: &NewOrderLine) -> AppResult<OrderLine>;
    async fn lines_for_order(&self, order_id: i32) -> AppResult<Vec<OrderLine>>;
}
