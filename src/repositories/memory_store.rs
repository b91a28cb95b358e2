//! `FoodStore` en memoria
//!
//! Mismas reglas que el esquema de PostgreSQL:
//! - una secuencia de ids por tabla, como `SERIAL`
//! - iteración por id
//! - claves foráneas comprobadas al insertar pedidos y líneas
//! - longitudes de `VARCHAR` y rango de `NUMERIC(10, 2)`
//! - carga de trabajo que nunca baja de cero

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use super::FoodStore;
use crate::models::driver::same_city;
use crate::models::{
    Customer, CustomerField, Driver, DriverField, Item, ItemUpdate, NewCustomer, NewDriver,
    NewItem, NewOrderLine, NewRestaurant, Order, OrderLine, Restaurant, RestaurantField,
    WorkloadDelta, ITEM_NAME_MAX_LEN,
};
use crate::utils::errors::{rejected_input, rejected_input_reason, AppError, AppResult};
use crate::utils::validation::fits_money_column;

/// Secuencia de una tabla
#[derive(Default)]
struct Serial(i32);

impl Serial {
    fn next(&mut self) -> i32 {
        self.0 += 1;
        self.0
    }
}

#[derive(Default)]
struct Tables {
    customers: BTreeMap<i32, Customer>,
    restaurants: BTreeMap<i32, Restaurant>,
    items: BTreeMap<i32, Item>,
    drivers: BTreeMap<i32, Driver>,
    orders: BTreeMap<i32, Order>,
    lines: BTreeMap<i32, OrderLine>,
    customer_ids: Serial,
    restaurant_ids: Serial,
    item_ids: Serial,
    driver_ids: Serial,
    order_ids: Serial,
    line_ids: Serial,
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

fn matches_name(stored: &str, wanted: &str) -> bool {
    stored.trim().to_lowercase() == wanted.trim().to_lowercase()
}

// Mismos códigos que devolvería PostgreSQL (22001 y 22003)
fn check_text(resource: &str, value: Option<&str>, max: u64) -> AppResult<()> {
    match value {
        Some(text) if text.chars().count() as u64 > max => Err(rejected(resource, "22001")),
        _ => Ok(()),
    }
}

fn check_amount(resource: &str, amounts: &[Decimal]) -> AppResult<()> {
    if amounts.iter().all(fits_money_column) {
        Ok(())
    } else {
        Err(rejected(resource, "22003"))
    }
}

fn rejected(resource: &str, code: &str) -> AppError {
    rejected_input(resource, rejected_input_reason(code).unwrap_or_default())
}

#[async_trait]
impl FoodStore for InMemoryStore {
    async fn insert_customer(&self, customer: &NewCustomer) -> AppResult<Customer> {
        for (field, value) in [
            (CustomerField::FirstName, Some(customer.first_name.as_str())),
            (CustomerField::Surname, Some(customer.surname.as_str())),
            (CustomerField::Phone, customer.phone.as_deref()),
            (CustomerField::Address, customer.address.as_deref()),
            (CustomerField::City, customer.city.as_deref()),
            (CustomerField::Email, customer.email.as_deref()),
        ] {
            check_text("Customer", value, field.max_len())?;
        }
        let mut tables = self.tables.write().await;
        let id = tables.customer_ids.next();
        let row = Customer {
            id,
            first_name: customer.first_name.clone(),
            surname: customer.surname.clone(),
            phone: customer.phone.clone(),
            address: customer.address.clone(),
            city: customer.city.clone(),
            email: customer.email.clone(),
        };
        tables.customers.insert(id, row.clone());
        Ok(row)
    }

    async fn find_customer(&self, id: i32) -> AppResult<Option<Customer>> {
        Ok(self.tables.read().await.customers.get(&id).cloned())
    }

    async fn find_customer_by_name(
        &self,
        first_name: &str,
        surname: &str,
    ) -> AppResult<Option<Customer>> {
        let tables = self.tables.read().await;
        Ok(tables
            .customers
            .values()
            .rev()
            .find(|c| matches_name(&c.first_name, first_name) && matches_name(&c.surname, surname))
            .cloned())
    }

    async fn update_customer_field(
        &self,
        id: i32,
        field: CustomerField,
        value: Option<&str>,
    ) -> AppResult<u64> {
        check_text("Customer", value, field.max_len())?;
        let mut tables = self.tables.write().await;
        let Some(customer) = tables.customers.get_mut(&id) else {
            return Ok(0);
        };
        match field {
            CustomerField::FirstName | CustomerField::Surname => {
                let value = value.ok_or_else(|| {
                    AppError::InvalidInput(format!("{} cannot be empty", field.label()))
                })?;
                if field == CustomerField::FirstName {
                    customer.first_name = value.to_string();
                } else {
                    customer.surname = value.to_string();
                }
            }
            CustomerField::Phone => customer.phone = owned(value),
            CustomerField::Address => customer.address = owned(value),
            CustomerField::City => customer.city = owned(value),
            CustomerField::Email => customer.email = owned(value),
        }
        Ok(1)
    }

    async fn customers_with_missing_info(&self) -> AppResult<Vec<Customer>> {
        let tables = self.tables.read().await;
        Ok(tables
            .customers
            .values()
            .filter(|c| c.has_missing_info())
            .cloned()
            .collect())
    }

    async fn insert_restaurant(&self, restaurant: &NewRestaurant) -> AppResult<Restaurant> {
        check_text("Restaurant", Some(restaurant.name.as_str()), RestaurantField::Name.max_len())?;
        check_text("Restaurant", restaurant.phone.as_deref(), RestaurantField::Phone.max_len())?;
        check_text("Restaurant", Some(restaurant.city.as_str()), RestaurantField::City.max_len())?;
        let mut tables = self.tables.write().await;
        let id = tables.restaurant_ids.next();
        let row = Restaurant {
            id,
            name: restaurant.name.clone(),
            phone: restaurant.phone.clone(),
            city: restaurant.city.clone(),
        };
        tables.restaurants.insert(id, row.clone());
        Ok(row)
    }

    async fn find_restaurant(&self, id: i32) -> AppResult<Option<Restaurant>> {
        Ok(self.tables.read().await.restaurants.get(&id).cloned())
    }

    async fn find_restaurant_by_name(&self, name: &str) -> AppResult<Option<Restaurant>> {
        let tables = self.tables.read().await;
        Ok(tables
            .restaurants
            .values()
            .rev()
            .find(|r| matches_name(&r.name, name))
            .cloned())
    }

    async fn update_restaurant_field(
        &self,
        id: i32,
        field: RestaurantField,
        value: Option<&str>,
    ) -> AppResult<u64> {
        check_text("Restaurant", value, field.max_len())?;
        let mut tables = self.tables.write().await;
        let Some(restaurant) = tables.restaurants.get_mut(&id) else {
            return Ok(0);
        };
        match (field, value) {
            (RestaurantField::Phone, value) => restaurant.phone = owned(value),
            (RestaurantField::Name, Some(value)) => restaurant.name = value.to_string(),
            (RestaurantField::City, Some(value)) => restaurant.city = value.to_string(),
            (field, None) => {
                return Err(AppError::InvalidInput(format!(
                    "{} cannot be empty",
                    field.label()
                )))
            }
        }
        Ok(1)
    }

    async fn insert_item(&self, item: &NewItem) -> AppResult<Item> {
        check_text("Item", Some(item.name.as_str()), ITEM_NAME_MAX_LEN)?;
        check_amount("Item", &[item.price])?;
        let mut tables = self.tables.write().await;
        let id = tables.item_ids.next();
        let row = Item {
            id,
            name: item.name.clone(),
            price: item.price,
        };
        tables.items.insert(id, row.clone());
        Ok(row)
    }

    async fn find_item(&self, id: i32) -> AppResult<Option<Item>> {
        Ok(self.tables.read().await.items.get(&id).cloned())
    }

    async fn update_item(&self, id: i32, update: &ItemUpdate) -> AppResult<u64> {
        match update {
            ItemUpdate::Name(name) => check_text("Item", Some(name.as_str()), ITEM_NAME_MAX_LEN)?,
            ItemUpdate::Price(price) => check_amount("Item", &[*price])?,
        }
        let mut tables = self.tables.write().await;
        let Some(item) = tables.items.get_mut(&id) else {
            return Ok(0);
        };
        match update {
            ItemUpdate::Name(name) => item.name = name.clone(),
            ItemUpdate::Price(price) => item.price = *price,
        }
        Ok(1)
    }

    async fn insert_driver(&self, driver: &NewDriver) -> AppResult<Driver> {
        check_text("Driver", Some(driver.name.as_str()), DriverField::Name.max_len())?;
        check_text("Driver", Some(driver.city.as_str()), DriverField::City.max_len())?;
        let mut tables = self.tables.write().await;
        let id = tables.driver_ids.next();
        let row = Driver {
            id,
            name: driver.name.clone(),
            city: driver.city.clone(),
            workload: 0,
        };
        tables.drivers.insert(id, row.clone());
        Ok(row)
    }

    async fn find_driver(&self, id: i32) -> AppResult<Option<Driver>> {
        Ok(self.tables.read().await.drivers.get(&id).cloned())
    }

    async fn find_driver_by_name(&self, name: &str) -> AppResult<Option<Driver>> {
        let tables = self.tables.read().await;
        Ok(tables
            .drivers
            .values()
            .rev()
            .find(|d| matches_name(&d.name, name))
            .cloned())
    }

    async fn drivers_in_city(&self, city: &str) -> AppResult<Vec<Driver>> {
        let tables = self.tables.read().await;
        Ok(tables
            .drivers
            .values()
            .filter(|d| same_city(&d.city, city))
            .cloned()
            .collect())
    }

    async fn adjust_workload(&self, id: i32, delta: WorkloadDelta) -> AppResult<u64> {
        let mut tables = self.tables.write().await;
        match tables.drivers.get_mut(&id) {
            Some(driver) if driver.workload + delta.amount() >= 0 => {
                driver.workload += delta.amount();
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn update_driver_field(
        &self,
        id: i32,
        field: DriverField,
        value: &str,
    ) -> AppResult<u64> {
        check_text("Driver", Some(value), field.max_len())?;
        let mut tables = self.tables.write().await;
        let Some(driver) = tables.drivers.get_mut(&id) else {
            return Ok(0);
        };
        match field {
            DriverField::Name => driver.name = value.to_string(),
            DriverField::City => driver.city = value.to_string(),
        }
        Ok(1)
    }

    async fn insert_order(&self, customer_id: i32, restaurant_id: i32) -> AppResult<Order> {
        let mut tables = self.tables.write().await;
        if !tables.customers.contains_key(&customer_id)
            || !tables.restaurants.contains_key(&restaurant_id)
        {
            return Err(AppError::InvalidReference(
                "Order references a record that does not exist".to_string(),
            ));
        }
        let id = tables.order_ids.next();
        let row = Order {
            id,
            customer_id,
            restaurant_id,
            total_cost: None,
            driver_id: None,
            finalised: false,
            created_at: Utc::now(),
        };
        tables.orders.insert(id, row.clone());
        Ok(row)
    }

    async fn find_order(&self, id: i32) -> AppResult<Option<Order>> {
        Ok(self.tables.read().await.orders.get(&id).cloned())
    }

    async fn orders_for(&self, customer_id: i32, restaurant_id: i32) -> AppResult<Vec<Order>> {
        let tables = self.tables.read().await;
        Ok(tables
            .orders
            .values()
            .filter(|o| o.customer_id == customer_id && o.restaurant_id == restaurant_id)
            .cloned()
            .collect())
    }

    async fn incomplete_orders(&self) -> AppResult<Vec<Order>> {
        let tables = self.tables.read().await;
        Ok(tables
            .orders
            .values()
            .filter(|o| o.is_incomplete())
            .cloned()
            .collect())
    }

    async fn pending_orders(&self) -> AppResult<Vec<Order>> {
        let tables = self.tables.read().await;
        Ok(tables
            .orders
            .values()
            .filter(|o| !o.finalised)
            .cloned()
            .collect())
    }

    async fn orders_for_driver(&self, driver_id: i32) -> AppResult<Vec<Order>> {
        let tables = self.tables.read().await;
        Ok(tables
            .orders
            .values()
            .filter(|o| o.driver_id == Some(driver_id) && !o.finalised)
            .cloned()
            .collect())
    }

    async fn set_order_provision(
        &self,
        id: i32,
        total: Decimal,
        driver_id: i32,
    ) -> AppResult<u64> {
        check_amount("Order", &[total])?;
        let mut tables = self.tables.write().await;
        if !tables.drivers.contains_key(&driver_id) {
            return Err(AppError::InvalidReference(format!(
                "Driver {} does not exist",
                driver_id
            )));
        }
        match tables.orders.get_mut(&id) {
            Some(order) if !order.finalised => {
                order.total_cost = Some(total);
                order.driver_id = Some(driver_id);
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn set_order_total(&self, id: i32, total: Decimal) -> AppResult<u64> {
        check_amount("Order", &[total])?;
        let mut tables = self.tables.write().await;
        match tables.orders.get_mut(&id) {
            Some(order) => {
                order.total_cost = Some(total);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn mark_finalised(&self, id: i32) -> AppResult<u64> {
        let mut tables = self.tables.write().await;
        match tables.orders.get_mut(&id) {
            Some(order) if !order.finalised => {
                order.finalised = true;
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn insert_line(&self, line: &NewOrderLine) -> AppResult<OrderLine> {
        check_amount("Order line", &[line.unit_price, line.line_cost()])?;
        let mut tables = self.tables.write().await;
        if !tables.orders.contains_key(&line.order_id) || !tables.items.contains_key(&line.item_id)
        {
            return Err(AppError::InvalidReference(
                "Order line references a record that does not exist".to_string(),
            ));
        }
        let id = tables.line_ids.next();
        let row = OrderLine {
            id,
            order_id: line.order_id,
            item_id: line.item_id,
            quantity: line.quantity,
            unit_price: line.unit_price,
            line_cost: line.line_cost(),
            instructions: line.instructions.clone(),
        };
        tables.lines.insert(id, row.clone());
        Ok(row)
    }

    async fn lines_for_order(&self, order_id: i32) -> AppResult<Vec<OrderLine>> {
        let tables = self.tables.read().await;
        Ok(tables
            .lines
            .values()
            .filter(|l| l.order_id == order_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_driver(name: &str, city: &str) -> NewDriver {
        NewDriver {
            name: name.to_string(),
            city: city.to_string(),
        }
    }

    #[tokio::test]
    async fn test_workload_never_goes_negative() {
        let store = InMemoryStore::new();
        let driver = store.insert_driver(&new_driver("Sipho", "Pretoria")).await.unwrap();

        assert_eq!(store.adjust_workload(driver.id, WorkloadDelta::Decrement).await.unwrap(), 0);
        assert_eq!(store.adjust_workload(driver.id, WorkloadDelta::Increment).await.unwrap(), 1);
        assert_eq!(store.find_driver(driver.id).await.unwrap().unwrap().workload, 1);
        assert_eq!(store.adjust_workload(999, WorkloadDelta::Increment).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_insert_order_checks_references() {
        let store = InMemoryStore::new();
        let err = store.insert_order(1, 2).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidReference(_)));
        assert!(store.pending_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_drivers_in_city_keeps_id_order() {
        let store = InMemoryStore::new();
        let a = store.insert_driver(&new_driver("A", "Pretoria")).await.unwrap();
        store.insert_driver(&new_driver("B", "Durban")).await.unwrap();
        let c = store.insert_driver(&new_driver("C", "pretoria")).await.unwrap();

        let ids: Vec<i32> = store
            .drivers_in_city("PRETORIA")
            .await
            .unwrap()
            .iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }

    #[tokio::test]
    async fn test_find_by_name_prefers_latest() {
        let store = InMemoryStore::new();
        store.insert_driver(&new_driver("Sam Dube", "Pretoria")).await.unwrap();
        let latest = store.insert_driver(&new_driver("Sam Dube", "Durban")).await.unwrap();

        let found = store.find_driver_by_name("sam dube").await.unwrap().unwrap();
        assert_eq!(found.id, latest.id);
    }
    #[tokio::test]
    async fn test_each_table_has_its_own_sequence() {
        let store = InMemoryStore::new();
        let customer = store
            .insert_customer(&NewCustomer {
                first_name: "Thandi".to_string(),
                surname: "Mokoena".to_string(),
                phone: None,
                address: None,
                city: None,
                email: None,
            })
            .await
            .unwrap();
        let restaurant = store
            .insert_restaurant(&NewRestaurant {
                name: "Burger Barn".to_string(),
                phone: None,
                city: "Pretoria".to_string(),
            })
            .await
            .unwrap();
        let driver = store.insert_driver(&new_driver("Sipho", "Pretoria")).await.unwrap();
        let order = store.insert_order(customer.id, restaurant.id).await.unwrap();

        assert_eq!(customer.id, 1);
        assert_eq!(restaurant.id, 1);
        assert_eq!(driver.id, 1);
        assert_eq!(order.id, 1);
    }

    #[tokio::test]
    async fn test_stored_whitespace_still_matches() {
        let store = InMemoryStore::new();
        let padded = store.insert_driver(&new_driver("  Sipho ", "Pretoria")).await.unwrap();

        let found = store.find_driver_by_name("sipho").await.unwrap().unwrap();
        assert_eq!(found.id, padded.id);
    }

    #[tokio::test]
    async fn test_column_limits_are_enforced() {
        let store = InMemoryStore::new();

        let err = store
            .insert_driver(&new_driver(&"x".repeat(151), "Pretoria"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        let err = store
            .insert_item(&NewItem {
                name: "Burger".to_string(),
                price: Decimal::from(100_000_000),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        let item = store
            .insert_item(&NewItem {
                name: "Burger".to_string(),
                price: Decimal::new(5000, 2),
            })
            .await
            .unwrap();
        let err = store
            .update_item(item.id, &ItemUpdate::Price(Decimal::from(100_000_000)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(store.find_item(item.id).await.unwrap().unwrap().price, Decimal::new(5000, 2));
    }
}
