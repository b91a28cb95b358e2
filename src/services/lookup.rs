//! Resolución de referencias y carga de vistas de pedido
//!
//! Sustituye los "id 0 = no encontrado" por `Option`/`NotFound` explícitos.

use crate::models::{Customer, LineDetails, OrderDetails, Restaurant};
use crate::repositories::FoodStore;
use crate::utils::errors::{not_found_error, AppResult};

/// Referencia a un customer tal como la da el operador
#[derive(Debug, Clone, PartialEq)]
pub enum CustomerRef {
    Id(i32),
    Name { first_name: String, surname: String },
}

impl CustomerRef {
    pub fn by_name(first_name: &str, surname: &str) -> Self {
        CustomerRef::Name {
            first_name: first_name.trim().to_string(),
            surname: surname.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RestaurantRef {
    Id(i32),
    Name(String),
}

pub async fn resolve_customer(store: &dyn FoodStore, reference: &CustomerRef) -> AppResult<Customer> {
    match reference {
        CustomerRef::Id(id) => store
            .find_customer(*id)
            .await?
            .ok_or_else(|| not_found_error("Customer", &id.to_string())),
        CustomerRef::Name {
            first_name,
            surname,
        } => store
            .find_customer_by_name(first_name, surname)
            .await?
            .ok_or_else(|| not_found_error("Customer", &format!("{} {}", first_name, surname))),
    }
}

pub async fn resolve_restaurant(
    store: &dyn FoodStore,
    reference: &RestaurantRef,
) -> AppResult<Restaurant> {
    match reference {
        RestaurantRef::Id(id) => store
            .find_restaurant(*id)
            .await?
            .ok_or_else(|| not_found_error("Restaurant", &id.to_string())),
        RestaurantRef::Name(name) => store
            .find_restaurant_by_name(name)
            .await?
            .ok_or_else(|| not_found_error("Restaurant", name)),
    }
}

/// Pedido con customer, restaurant, driver y líneas resueltos
pub async fn load_order_details(store: &dyn FoodStore, order_id: i32) -> AppResult<OrderDetails> {
    let order = store
        .find_order(order_id)
        .await?
        .ok_or_else(|| not_found_error("Order", &order_id.to_string()))?;

    let customer = store.find_customer(order.customer_id).await?;
    let restaurant = store.find_restaurant(order.restaurant_id).await?;
    let driver = match order.driver_id {
        Some(id) => store.find_driver(id).await?,
        None => None,
    };

    let mut lines = Vec::new();
    for line in store.lines_for_order(order.id).await? {
        let item_name = store.find_item(line.item_id).await?.map(|item| item.name);
        lines.push(LineDetails { line, item_name });
    }

    Ok(OrderDetails {
        order,
        customer,
        restaurant,
        driver,
        lines,
    })
}
