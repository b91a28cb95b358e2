//! Alta y edición de datos de referencia (customers, restaurants, items, drivers)
//!
//! Las entradas se validan antes de tocar el almacenamiento. Un campo requerido
//! no se puede vaciar; uno opcional vacío se guarda como NULL.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;
use validator::{validate_email, validate_length, Validate};

use crate::models::{
    Customer, CustomerField, Driver, DriverField, Item, ItemUpdate, NewCustomer, NewDriver,
    NewItem, NewRestaurant, Restaurant, RestaurantField, ITEM_NAME_MAX_LEN,
};
use crate::repositories::FoodStore;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::{
    format_money, max_amount, optional_text, validate_phone, validate_price,
};

pub struct RegistryService {
    store: Arc<dyn FoodStore>,
}

fn required(label: &str, value: Option<String>) -> AppResult<String> {
    value.ok_or_else(|| AppError::InvalidInput(format!("{} cannot be empty", label)))
}

fn check_phone(value: &Option<String>) -> AppResult<()> {
    match value {
        Some(phone) if validate_phone(phone).is_err() => Err(AppError::InvalidInput(format!(
            "'{}' is not a valid phone number (digits only)",
            phone
        ))),
        _ => Ok(()),
    }
}

fn check_length(label: &str, value: Option<&str>, max: u64) -> AppResult<()> {
    match value {
        Some(text) if !validate_length(text, None, Some(max), None) => Err(
            AppError::InvalidInput(format!("{} must be at most {} characters", label, max)),
        ),
        _ => Ok(()),
    }
}

fn ensure_updated(rows: u64, resource: &str, id: i32) -> AppResult<()> {
    if rows == 0 {
        return Err(not_found_error(resource, &id.to_string()));
    }
    Ok(())
}

impl RegistryService {
    pub fn new(store: Arc<dyn FoodStore>) -> Self {
        Self { store }
    }

    // Customers

    pub async fn create_customer(&self, request: NewCustomer) -> AppResult<Customer> {
        request.validate()?;
        let customer = self.store.insert_customer(&request).await?;
        info!("👤 Customer {} registrado ({})", customer.id, customer.full_name());
        Ok(customer)
    }

    pub async fn find_customer_by_name(
        &self,
        first_name: &str,
        surname: &str,
    ) -> AppResult<Option<Customer>> {
        self.store.find_customer_by_name(first_name, surname).await
    }

    pub async fn update_customer(&self, id: i32, field: CustomerField, raw: &str) -> AppResult<()> {
        let value = optional_text(raw);
        if field.is_required() {
            required(field.label(), value.clone())?;
        }
        check_length(field.label(), value.as_deref(), field.max_len())?;
        match field {
            CustomerField::Phone => check_phone(&value)?,
            CustomerField::Email => {
                if let Some(email) = &value {
                    if !validate_email(email.as_str()) {
                        return Err(AppError::InvalidInput(format!(
                            "'{}' is not a valid email address",
                            email
                        )));
                    }
                }
            }
            _ => {}
        }

        let rows = self
            .store
            .update_customer_field(id, field, value.as_deref())
            .await?;
        ensure_updated(rows, "Customer", id)?;
        info!("✏️ Customer {}: {} actualizado", id, field.label());
        Ok(())
    }

    /// Customers a los que les falta algún dato de contacto
    pub async fn customers_with_missing_info(&self) -> AppResult<Vec<Customer>> {
        self.store.customers_with_missing_info().await
    }

    // Restaurants

    pub async fn create_restaurant(&self, request: NewRestaurant) -> AppResult<Restaurant> {
        request.validate()?;
        let restaurant = self.store.insert_restaurant(&request).await?;
        info!("🍽️ Restaurant {} registrado ({})", restaurant.id, restaurant.name);
        Ok(restaurant)
    }

    pub async fn find_restaurant_by_name(&self, name: &str) -> AppResult<Option<Restaurant>> {
        self.store.find_restaurant_by_name(name).await
    }

    pub async fn update_restaurant(
        &self,
        id: i32,
        field: RestaurantField,
        raw: &str,
    ) -> AppResult<()> {
        let value = optional_text(raw);
        if field.is_required() {
            required(field.label(), value.clone())?;
        }
        check_length(field.label(), value.as_deref(), field.max_len())?;
        if field == RestaurantField::Phone {
            check_phone(&value)?;
        }

        let rows = self
            .store
            .update_restaurant_field(id, field, value.as_deref())
            .await?;
        ensure_updated(rows, "Restaurant", id)?;
        info!("✏️ Restaurant {}: {} actualizado", id, field.label());
        Ok(())
    }

    // Items

    pub async fn create_item(&self, request: NewItem) -> AppResult<Item> {
        request.validate()?;
        let item = self.store.insert_item(&request).await?;
        info!("🍔 Item {} registrado ({} a {})", item.id, item.name, item.price);
        Ok(item)
    }

    pub async fn find_item(&self, id: i32) -> AppResult<Item> {
        self.store
            .find_item(id)
            .await?
            .ok_or_else(|| not_found_error("Item", &id.to_string()))
    }

    pub async fn rename_item(&self, id: i32, raw: &str) -> AppResult<()> {
        let name = required("Item Name", optional_text(raw))?;
        check_length("Item Name", Some(name.as_str()), ITEM_NAME_MAX_LEN)?;
        self.apply_item_update(id, ItemUpdate::Name(name)).await
    }

    /// Solo afecta a líneas futuras; las existentes conservan su precio capturado
    pub async fn reprice_item(&self, id: i32, price: Decimal) -> AppResult<()> {
        if validate_price(&price).is_err() {
            return Err(AppError::InvalidInput(format!(
                "Price must be between 0.00 and {}, got {}",
                format_money(max_amount()),
                price
            )));
        }
        self.apply_item_update(id, ItemUpdate::Price(price)).await
    }

    async fn apply_item_update(&self, id: i32, update: ItemUpdate) -> AppResult<()> {
        let rows = self.store.update_item(id, &update).await?;
        ensure_updated(rows, "Item", id)?;
        info!("✏️ Item {} actualizado: {:?}", id, update);
        Ok(())
    }

    // Drivers

    pub async fn create_driver(&self, request: NewDriver) -> AppResult<Driver> {
        request.validate()?;
        let driver = self.store.insert_driver(&request).await?;
        info!("🚗 Driver {} registrado en {}", driver.id, driver.city);
        Ok(driver)
    }

    pub async fn find_driver_by_name(&self, name: &str) -> AppResult<Option<Driver>> {
        self.store.find_driver_by_name(name).await
    }

    /// La carga no se toca: los pedidos ya asignados siguen contando
    pub async fn update_driver(&self, id: i32, field: DriverField, raw: &str) -> AppResult<()> {
        let value = required(field.label(), optional_text(raw))?;
        check_length(field.label(), Some(value.as_str()), field.max_len())?;
        let rows = self.store.update_driver_field(id, field, &value).await?;
        ensure_updated(rows, "Driver", id)?;
        info!("✏️ Driver {}: {} actualizado", id, field.label());
        Ok(())
    }
}
