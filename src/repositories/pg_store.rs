//! `FoodStore` sobre PostgreSQL
//!
//! Compone un repositorio por tabla sobre el mismo pool.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::debug;

use super::customer_repository::CustomerRepository;
use super::driver_repository::DriverRepository;
use super::item_repository::ItemRepository;
use super::order_repository::OrderRepository;
use super::restaurant_repository::RestaurantRepository;
use super::FoodStore;
use crate::models::{
    Customer, CustomerField, Driver, DriverField, Item, ItemUpdate, NewCustomer, NewDriver,
    NewItem, NewOrderLine, NewRestaurant, Order, OrderLine, Restaurant, RestaurantField,
    WorkloadDelta,
};
use crate::utils::errors::AppResult;

pub struct PgStore {
    customers: CustomerRepository,
    restaurants: RestaurantRepository,
    items: ItemRepository,
    drivers: DriverRepository,
    orders: OrderRepository,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            customers: CustomerRepository::new(pool.clone()),
            restaurants: RestaurantRepository::new(pool.clone()),
            items: ItemRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool.clone()),
            orders: OrderRepository::new(pool),
        }
    }
}

#[async_trait]
impl FoodStore for PgStore {
    async fn insert_customer(&self, customer: &NewCustomer) -> AppResult<Customer> {
        self.customers.create(customer).await
    }

    async fn find_customer(&self, id: i32) -> AppResult<Option<Customer>> {
        self.customers.find_by_id(id).await
    }

    async fn find_customer_by_name(
        &self,
        first_name: &str,
        surname: &str,
    ) -> AppResult<Option<Customer>> {
        self.customers.find_by_name(first_name, surname).await
    }

    async fn update_customer_field(
        &self,
        id: i32,
        field: CustomerField,
        value: Option<&str>,
    ) -> AppResult<u64> {
        self.customers.update_field(id, field, value).await
    }

    async fn customers_with_missing_info(&self) -> AppResult<Vec<Customer>> {
        self.customers.with_missing_info().await
    }

    async fn insert_restaurant(&self, restaurant: &NewRestaurant) -> AppResult<Restaurant> {
        self.restaurants.create(restaurant).await
    }

    async fn find_restaurant(&self, id: i32) -> AppResult<Option<Restaurant>> {
        self.restaurants.find_by_id(id).await
    }

    async fn find_restaurant_by_name(&self, name: &str) -> AppResult<Option<Restaurant>> {
        self.restaurants.find_by_name(name).await
    }

    async fn update_restaurant_field(
        &self,
        id: i32,
        field: RestaurantField,
        value: Option<&str>,
    ) -> AppResult<u64> {
        self.restaurants.update_field(id, field, value).await
    }

    async fn insert_item(&self, item: &NewItem) -> AppResult<Item> {
        self.items.create(item).await
    }

    async fn find_item(&self, id: i32) -> AppResult<Option<Item>> {
        self.items.find_by_id(id).await
    }

    async fn update_item(&self, id: i32, update: &ItemUpdate) -> AppResult<u64> {
        self.items.update(id, update).await
    }

    async fn insert_driver(&self, driver: &NewDriver) -> AppResult<Driver> {
        self.drivers.create(driver).await
    }

    async fn find_driver(&self, id: i32) -> AppResult<Option<Driver>> {
        self.drivers.find_by_id(id).await
    }

    async fn find_driver_by_name(&self, name: &str) -> AppResult<Option<Driver>> {
        self.drivers.find_by_name(name).await
    }

    async fn drivers_in_city(&self, city: &str) -> AppResult<Vec<Driver>> {
        let drivers = self.drivers.find_by_city(city).await?;
        debug!("🔍 {} drivers registrados en '{}'", drivers.len(), city);
        Ok(drivers)
    }

    async fn adjust_workload(&self, id: i32, delta: WorkloadDelta) -> AppResult<u64> {
        self.drivers.adjust_workload(id, delta).await
    }

    async fn update_driver_field(
        &self,
        id: i32,
        field: DriverField,
        value: &str,
    ) -> AppResult<u64> {
        self.drivers.update_field(id, field, value).await
    }

    async fn insert_order(&self, customer_id: i32, restaurant_id: i32) -> AppResult<Order> {
        self.orders.create(customer_id, restaurant_id).await
    }

    async fn find_order(&self, id: i32) -> AppResult<Option<Order>> {
        self.orders.find_by_id(id).await
    }

    async fn orders_for(&self, customer_id: i32, restaurant_id: i32) -> AppResult<Vec<Order>> {
        self.orders.find_for(customer_id, restaurant_id).await
    }

    async fn incomplete_orders(&self) -> AppResult<Vec<Order>> {
        self.orders.find_incomplete().await
    }

    async fn pending_orders(&self) -> AppResult<Vec<Order>> {
        self.orders.find_pending().await
    }

    async fn orders_for_driver(&self, driver_id: i32) -> AppResult<Vec<Order>> {
        self.orders.find_open_for_driver(driver_id).await
    }

    async fn set_order_provision(
        &self,
        id: i32,
        total: Decimal,
        driver_id: i32,
    ) -> AppResult<u64> {
        self.orders.set_provision(id, total, driver_id).await
    }

    async fn set_order_total(&self, id: i32, total: Decimal) -> AppResult<u64> {
        self.orders.set_total(id, total).await
    }

    async fn mark_finalised(&self, id: i32) -> AppResult<u64> {
        self.orders.mark_finalised(id).await
    }

    async fn insert_line(&self, line: &NewOrderLine) -> AppResult<OrderLine> {
        self.orders.create_line(line).await
    }

    async fn lines_for_order(&self, order_id: i32) -> AppResult<Vec<OrderLine>> {
        self.orders.find_lines(order_id).await
    }
}
