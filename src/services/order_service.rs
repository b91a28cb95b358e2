//! Servicio de pedidos
//!
//! Orquesta el ciclo de vida completo:
//! - `open`: crea el pedido con customer y restaurant resueltos
//! - `add_line`: captura el precio actual del item en la línea
//! - `provision_totals`: suma las líneas, asigna driver y suma carga
//! - `finalise`: marca el pedido, libera al driver y emite la factura
//! - `reissue_invoice`: vuelve a escribir la factura de un pedido finalizado
//!
//! La carga de un driver solo se incrementa al aprovisionar y solo se
//! decrementa al finalizar, por lo que coincide con sus pedidos abiertos.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{error, info, warn};
use validator::Validate;

use super::driver_allocation_service::DriverAllocator;
use super::invoice_service::{EmittedInvoice, InvoiceRenderer};
use super::lookup::{
    load_order_details, resolve_customer, resolve_restaurant, CustomerRef, RestaurantRef,
};
use crate::models::order::sum_line_costs;
use crate::models::{Driver, NewOrderLine, Order, OrderDetails, OrderLine, WorkloadDelta};
use crate::repositories::FoodStore;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::{fits_money_column, format_money, max_amount};

/// Línea pedida por el operador, antes de capturar el precio
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct LineRequest {
    pub item_id: i32,

    /// Mismo límite que `MAX_QUANTITY`
    #[validate(range(min = 1, max = 1000))]
    pub quantity: i32,

    pub instructions: Option<String>,
}

/// Resultado de finalizar un pedido
#[derive(Debug, Clone)]
pub struct FinalisedOrder {
    pub order: Order,
    pub invoice: String,
    /// Presente si la factura no llegó al fichero
    pub invoice_error: Option<String>,
}

pub struct OrderService {
    store: Arc<dyn FoodStore>,
    allocator: DriverAllocator,
    invoices: InvoiceRenderer,
}

impl OrderService {
    pub fn new(store: Arc<dyn FoodStore>, allocator: DriverAllocator, invoices: InvoiceRenderer) -> Self {
        Self {
            store,
            allocator,
            invoices,
        }
    }

    pub fn invoices(&self) -> &InvoiceRenderer {
        &self.invoices
    }

    /// Crea un pedido abierto (sin total ni driver)
    pub async fn open(&self, customer: CustomerRef, restaurant: RestaurantRef) -> AppResult<Order> {
        let customer = resolve_customer(self.store.as_ref(), &customer).await?;
        let restaurant = resolve_restaurant(self.store.as_ref(), &restaurant).await?;

        let order = self.store.insert_order(customer.id, restaurant.id).await?;
        info!(
            "📝 Pedido {} abierto para {} en {}",
            order.id,
            customer.full_name(),
            restaurant.name
        );
        Ok(order)
    }

    /// Añade una línea con el precio del item en este momento
    pub async fn add_line(&self, order_id: i32, request: &LineRequest) -> AppResult<OrderLine> {
        request.validate()?;

        let order = self.find_open_order(order_id).await?;
        let item = self
            .store
            .find_item(request.item_id)
            .await?
            .ok_or_else(|| not_found_error("Item", &request.item_id.to_string()))?;

        let new_line = NewOrderLine {
            order_id: order.id,
            item_id: item.id,
            quantity: request.quantity,
            unit_price: item.price,
            instructions: request.instructions.clone(),
        };
        let current = sum_line_costs(&self.store.lines_for_order(order.id).await?);
        let total = current.checked_add(new_line.line_cost());
        if !total.map_or(false, |t| fits_money_column(&t)) {
            return Err(AppError::InvalidInput(format!(
                "Order {} total would exceed {}",
                order.id,
                format_money(max_amount())
            )));
        }

        let line = self.store.insert_line(&new_line).await?;

        info!(
            "➕ {} x {} añadido al pedido {} (coste {})",
            line.quantity, item.name, order.id, line.line_cost
        );
        Ok(line)
    }

    /// Calcula el total y asigna el driver menos cargado de la ciudad del restaurante.
    ///
    /// Si no hay driver en la ciudad no se escribe nada y el pedido sigue incompleto.
    /// Un pedido que ya tiene driver solo recalcula el total.
    pub async fn provision_totals(&self, order_id: i32) -> AppResult<Order> {
        let order = self.find_open_order(order_id).await?;
        if order.driver_id.is_some() {
            self.recompute_total(order.id).await?;
            return self.reload(order.id).await;
        }

        let restaurant = self
            .store
            .find_restaurant(order.restaurant_id)
            .await?
            .ok_or_else(|| not_found_error("Restaurant", &order.restaurant_id.to_string()))?;

        let total = sum_line_costs(&self.store.lines_for_order(order.id).await?);
        let driver = self.allocator.allocate(&restaurant.city).await?;

        let incremented = self
            .allocator
            .adjust_workload(driver.id, WorkloadDelta::Increment)
            .await?;
        if incremented == 0 {
            return Err(not_found_error("Driver", &driver.id.to_string()));
        }

        match self.store.set_order_provision(order.id, total, driver.id).await {
            Ok(rows) if rows > 0 => {}
            outcome => {
                self.compensate(&driver, order.id).await;
                return match outcome {
                    Err(e) => Err(e),
                    Ok(_) => Err(AppError::AlreadyFinalised(order.id)),
                };
            }
        }

        info!(
            "✅ Pedido {} aprovisionado: total {} con driver {}",
            order.id, total, driver.name
        );
        self.reload(order.id).await
    }

    /// Recalcula el total desde las líneas capturadas. Idempotente.
    pub async fn recompute_total(&self, order_id: i32) -> AppResult<Decimal> {
        let total = sum_line_costs(&self.store.lines_for_order(order_id).await?);
        let rows = self.store.set_order_total(order_id, total).await?;
        if rows == 0 {
            return Err(not_found_error("Order", &order_id.to_string()));
        }
        Ok(total)
    }

    /// Añade varias líneas y deja el pedido aprovisionado
    pub async fn add_items(&self, order_id: i32, requests: &[LineRequest]) -> AppResult<Order> {
        for request in requests {
            self.add_line(order_id, request).await?;
        }
        self.provision_totals(order_id).await
    }

    /// Marca el pedido como finalizado, libera al driver y emite la factura.
    ///
    /// El pedido queda finalizado aunque la factura no se pueda escribir; en ese
    /// caso `invoice_error` lleva el motivo y `reissue_invoice` la reintenta.
    pub async fn finalise(&self, order_id: i32) -> AppResult<FinalisedOrder> {
        let order = self.find_open_order(order_id).await?;

        if self.store.mark_finalised(order.id).await? == 0 {
            return Err(AppError::AlreadyFinalised(order.id));
        }
        if order.driver_id.is_none() {
            warn!("⚠️ Pedido {} finalizado sin driver asignado", order.id);
        }
        self.allocator.release(order.driver_id).await?;

        let emitted = self.invoices.emit(order.id).await?;
        info!("🏁 Pedido {} finalizado", order.id);

        Ok(FinalisedOrder {
            order: self.reload(order.id).await?,
            invoice: emitted.text,
            invoice_error: emitted.write_error,
        })
    }

    /// Vuelve a emitir la factura de un pedido ya finalizado
    pub async fn reissue_invoice(&self, order_id: i32) -> AppResult<EmittedInvoice> {
        let order = self.reload(order_id).await?;
        if !order.finalised {
            return Err(AppError::InvalidInput(format!(
                "Order {} has not been finalised yet",
                order.id
            )));
        }
        info!("🧾 Reemitiendo la factura del pedido {}", order.id);
        self.invoices.emit(order.id).await
    }

    pub async fn order_details(&self, order_id: i32) -> AppResult<OrderDetails> {
        load_order_details(self.store.as_ref(), order_id).await
    }

    /// Pedidos de un customer en un restaurante, por nombre
    pub async fn find_orders_for(
        &self,
        customer: CustomerRef,
        restaurant: RestaurantRef,
    ) -> AppResult<Vec<OrderDetails>> {
        let customer = resolve_customer(self.store.as_ref(), &customer).await?;
        let restaurant = resolve_restaurant(self.store.as_ref(), &restaurant).await?;

        let orders = self.store.orders_for(customer.id, restaurant.id).await?;
        self.with_details(orders).await
    }

    pub async fn incomplete_orders(&self) -> AppResult<Vec<OrderDetails>> {
        let orders = self.store.incomplete_orders().await?;
        self.with_details(orders).await
    }

    /// Pedidos que aún no se han finalizado
    pub async fn pending_orders(&self) -> AppResult<Vec<OrderDetails>> {
        let orders = self.store.pending_orders().await?;
        self.with_details(orders).await
    }

    /// Pedidos abiertos asignados al driver con ese nombre
    pub async fn orders_for_driver(&self, driver_name: &str) -> AppResult<(Driver, Vec<OrderDetails>)> {
        let driver = self
            .store
            .find_driver_by_name(driver_name)
            .await?
            .ok_or_else(|| not_found_error("Driver", driver_name.trim()))?;

        let orders = self.store.orders_for_driver(driver.id).await?;
        let details = self.with_details(orders).await?;
        Ok((driver, details))
    }

    async fn find_open_order(&self, order_id: i32) -> AppResult<Order> {
        let order = self.reload(order_id).await?;
        if order.finalised {
            return Err(AppError::AlreadyFinalised(order.id));
        }
        Ok(order)
    }

    async fn reload(&self, order_id: i32) -> AppResult<Order> {
        self.store
            .find_order(order_id)
            .await?
            .ok_or_else(|| not_found_error("Order", &order_id.to_string()))
    }

    async fn with_details(&self, orders: Vec<Order>) -> AppResult<Vec<OrderDetails>> {
        let mut details = Vec::with_capacity(orders.len());
        for order in orders {
            details.push(load_order_details(self.store.as_ref(), order.id).await?);
        }
        Ok(details)
    }

    // Deshace el incremento cuando el pedido no llegó a guardar el driver
    async fn compensate(&self, driver: &Driver, order_id: i32) {
        if let Err(e) = self
            .allocator
            .adjust_workload(driver.id, WorkloadDelta::Decrement)
            .await
        {
            error!(
                "❌ No se pudo revertir la carga del driver {} para el pedido {}: {}",
                driver.id, order_id, e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Customer, CustomerField, DriverField, Item, ItemUpdate, NewCustomer, NewDriver, NewItem,
        NewRestaurant, Restaurant, RestaurantField,
    };
    use crate::repositories::InMemoryStore;
    use crate::utils::validation::MAX_QUANTITY;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT_FIXTURE: AtomicUsize = AtomicUsize::new(0);

    struct Fixture {
        store: Arc<InMemoryStore>,
        service: OrderService,
        customer_id: i32,
        restaurant_id: i32,
        burger_id: i32,
        chips_id: i32,
    }

    fn invoice_path() -> PathBuf {
        std::env::temp_dir().join(format!(
            "food_quick_order_service_{}_{}.txt",
            std::process::id(),
            NEXT_FIXTURE.fetch_add(1, Ordering::SeqCst)
        ))
    }

    fn service_over(store: Arc<dyn FoodStore>, path: PathBuf) -> OrderService {
        OrderService::new(
            store.clone(),
            DriverAllocator::new(store.clone()),
            InvoiceRenderer::new(store, path),
        )
    }

    async fn fixture(with_driver: bool) -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        let customer = store
            .insert_customer(&NewCustomer {
                first_name: "Thandi".to_string(),
                surname: "Mokoena".to_string(),
                phone: Some("0825551234".to_string()),
                address: Some("12 Church Street".to_string()),
                city: Some("Pretoria".to_string()),
                email: None,
            })
            .await
            .unwrap();
        let restaurant = store
            .insert_restaurant(&NewRestaurant {
                name: "Burger Barn".to_string(),
                phone: Some("0125550000".to_string()),
                city: "Pretoria".to_string(),
            })
            .await
            .unwrap();
        let burger = store
            .insert_item(&NewItem {
                name: "Burger".to_string(),
                price: Decimal::new(5000, 2),
            })
            .await
            .unwrap();
        let chips = store
            .insert_item(&NewItem {
                name: "Chips".to_string(),
                price: Decimal::new(3000, 2),
            })
            .await
            .unwrap();
        if with_driver {
            store
                .insert_driver(&NewDriver {
                    name: "Sipho".to_string(),
                    city: "Pretoria".to_string(),
                })
                .await
                .unwrap();
        }

        let service = service_over(store.clone(), invoice_path());

        Fixture {
            store,
            service,
            customer_id: customer.id,
            restaurant_id: restaurant.id,
            burger_id: burger.id,
            chips_id: chips.id,
        }
    }

    fn request(item_id: i32, quantity: i32) -> LineRequest {
        LineRequest {
            item_id,
            quantity,
            instructions: None,
        }
    }

    async fn open_order(f: &Fixture, service: &OrderService) -> Order {
        service
            .open(CustomerRef::Id(f.customer_id), RestaurantRef::Id(f.restaurant_id))
            .await
            .unwrap()
    }

    #[test]
    fn test_quantity_range_matches_max_quantity() {
        assert!(request(1, 1).validate().is_ok());
        assert!(request(1, MAX_QUANTITY).validate().is_ok());
        assert!(request(1, 0).validate().is_err());
        assert!(request(1, MAX_QUANTITY + 1).validate().is_err());
    }

    #[tokio::test]
    async fn test_rejects_zero_quantity() {
        let f = fixture(true).await;
        let order = open_order(&f, &f.service).await;

        let err = f.service.add_line(order.id, &request(f.burger_id, 0)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(!err.is_fatal());
        assert!(f.store.lines_for_order(order.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_oversized_orders_are_rejected() {
        let f = fixture(true).await;
        let order = open_order(&f, &f.service).await;

        let err = f
            .service
            .add_line(order.id, &request(f.burger_id, 2_000_000))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let pricey = f
            .store
            .insert_item(&NewItem {
                name: "Catering".to_string(),
                price: max_amount(),
            })
            .await
            .unwrap();
        f.service.add_line(order.id, &request(pricey.id, 1)).await.unwrap();
        let err = f
            .service
            .add_line(order.id, &request(f.chips_id, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(f.store.lines_for_order(order.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_no_driver_leaves_order_incomplete() {
        let f = fixture(false).await;
        let order = open_order(&f, &f.service).await;

        let err = f
            .service
            .add_items(order.id, &[request(f.burger_id, 1)])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NoDriverAvailable(_)));

        let stored = f.store.find_order(order.id).await.unwrap().unwrap();
        assert!(stored.total_cost.is_none());
        assert!(stored.driver_id.is_none());
        assert!(stored.is_incomplete());
    }

    #[tokio::test]
    async fn test_provision_twice_does_not_double_count() {
        let f = fixture(true).await;
        let order = open_order(&f, &f.service).await;

        let first = f
            .service
            .add_items(order.id, &[request(f.burger_id, 2)])
            .await
            .unwrap();
        let second = f
            .service
            .add_items(order.id, &[request(f.chips_id, 1)])
            .await
            .unwrap();

        assert_eq!(first.driver_id, second.driver_id);
        assert_eq!(second.total_cost, Some(Decimal::new(13000, 2)));

        let driver_id = second.driver_id.unwrap();
        assert_eq!(f.store.find_driver(driver_id).await.unwrap().unwrap().workload, 1);
    }

    #[tokio::test]
    async fn test_add_line_to_finalised_order() {
        let f = fixture(true).await;
        let order = open_order(&f, &f.service).await;
        f.service.add_items(order.id, &[request(f.burger_id, 1)]).await.unwrap();
        let finalised = f.service.finalise(order.id).await.unwrap();
        let _ = tokio::fs::remove_file(f.service.invoices().path()).await;

        assert!(finalised.order.finalised);
        assert!(finalised.invoice_error.is_none());
        let err = f.service.add_line(order.id, &request(f.chips_id, 1)).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyFinalised(id) if id == order.id));
    }

    #[tokio::test]
    async fn test_open_with_unknown_restaurant() {
        let f = fixture(true).await;
        let err = f
            .service
            .open(
                CustomerRef::by_name("Thandi", "Mokoena"),
                RestaurantRef::Name("Pizza Palace".to_string()),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_invoice_write_failure_keeps_order_finalised() {
        let f = fixture(true).await;
        // Un directorio como destino hace fallar el append
        let broken = service_over(f.store.clone(), std::env::temp_dir());
        let order = open_order(&f, &broken).await;
        let order = broken
            .add_items(order.id, &[request(f.burger_id, 1)])
            .await
            .unwrap();
        let driver_id = order.driver_id.unwrap();

        let finalised = broken.finalise(order.id).await.unwrap();
        assert!(finalised.order.finalised);
        assert!(finalised.invoice_error.is_some());
        assert!(finalised.invoice.contains("Sipho is nearest to the restaurant"));
        assert_eq!(f.store.find_driver(driver_id).await.unwrap().unwrap().workload, 0);

        let reissued = f.service.reissue_invoice(order.id).await.unwrap();
        assert!(reissued.write_error.is_none());
        assert_eq!(reissued.text, finalised.invoice);
        let path = f.service.invoices().path().to_path_buf();
        let log = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(log, format!("{}\n", finalised.invoice));
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_reissue_requires_finalised_order() {
        let f = fixture(true).await;
        let order = open_order(&f, &f.service).await;

        let err = f.service.reissue_invoice(order.id).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(!f.service.invoices().path().exists());
    }

    #[derive(Clone, Copy)]
    enum ProvisionFailure {
        NoRows,
        StoreError,
    }

    /// Delega en `InMemoryStore` salvo al guardar el aprovisionamiento
    struct FailingProvision {
        inner: Arc<InMemoryStore>,
        failure: ProvisionFailure,
    }

    #[async_trait]
    impl FoodStore for FailingProvision {
        async fn insert_customer(&self, customer: &NewCustomer) -> AppResult<Customer> {
            self.inner.insert_customer(customer).await
        }
        async fn find_customer(&self, id: i32) -> AppResult<Option<Customer>> {
            self.inner.find_customer(id).await
        }
        async fn find_customer_by_name(
            &self,
            first_name: &str,
            surname: &str,
        ) -> AppResult<Option<Customer>> {
            self.inner.find_customer_by_name(first_name, surname).await
        }
        async fn update_customer_field(
            &self,
            id: i32,
            field: CustomerField,
            value: Option<&str>,
        ) -> AppResult<u64> {
            self.inner.update_customer_field(id, field, value).await
        }
        async fn customers_with_missing_info(&self) -> AppResult<Vec<Customer>> {
            self.inner.customers_with_missing_info().await
        }
        async fn insert_restaurant(&self, restaurant: &NewRestaurant) -> AppResult<Restaurant> {
            self.inner.insert_restaurant(restaurant).await
        }
        async fn find_restaurant(&self, id: i32) -> AppResult<Option<Restaurant>> {
            self.inner.find_restaurant(id).await
        }
        async fn find_restaurant_by_name(&self, name: &str) -> AppResult<Option<Restaurant>> {
            self.inner.find_restaurant_by_name(name).await
        }
        async fn update_restaurant_field(
            &self,
            id: i32,
            field: RestaurantField,
            value: Option<&str>,
        ) -> AppResult<u64> {
            self.inner.update_restaurant_field(id, field, value).await
        }
        async fn insert_item(&self, item: &NewItem) -> AppResult<Item> {
            self.inner.insert_item(item).await
        }
        async fn find_item(&self, id: i32) -> AppResult<Option<Item>> {
            self.inner.find_item(id).await
        }
        async fn update_item(&self, id: i32, update: &ItemUpdate) -> AppResult<u64> {
            self.inner.update_item(id, update).await
        }
        async fn insert_driver(&self, driver: &NewDriver) -> AppResult<Driver> {
            self.inner.insert_driver(driver).await
        }
        async fn find_driver(&self, id: i32) -> AppResult<Option<Driver>> {
            self.inner.find_driver(id).await
        }
        async fn find_driver_by_name(&self, name: &str) -> AppResult<Option<Driver>> {
            self.inner.find_driver_by_name(name).await
        }
        async fn drivers_in_city(&self, city: &str) -> AppResult<Vec<Driver>> {
            self.inner.drivers_in_city(city).await
        }
        async fn adjust_workload(&self, id: i32, delta: WorkloadDelta) -> AppResult<u64> {
            self.inner.adjust_workload(id, delta).await
        }
        async fn update_driver_field(
            &self,
            id: i32,
            field: DriverField,
            value: &str,
        ) -> AppResult<u64> {
            self.inner.update_driver_field(id, field, value).await
        }
        async fn insert_order(&self, customer_id: i32, restaurant_id: i32) -> AppResult<Order> {
            self.inner.insert_order(customer_id, restaurant_id).await
        }
        async fn find_order(&self, id: i32) -> AppResult<Option<Order>> {
            self.inner.find_order(id).await
        }
        async fn orders_for(&self, customer_id: i32, restaurant_id: i32) -> AppResult<Vec<Order>> {
            self.inner.orders_for(customer_id, restaurant_id).await
        }
        async fn incomplete_orders(&self) -> AppResult<Vec<Order>> {
            self.inner.incomplete_orders().await
        }
        async fn pending_orders(&self) -> AppResult<Vec<Order>> {
            self.inner.pending_orders().await
        }
        async fn orders_for_driver(&self, driver_id: i32) -> AppResult<Vec<Order>> {
            self.inner.orders_for_driver(driver_id).await
        }
        async fn set_order_provision(
            &self,
            _id: i32,
            _total: Decimal,
            _driver_id: i32,
        ) -> AppResult<u64> {
            match self.failure {
                ProvisionFailure::NoRows => Ok(0),
                ProvisionFailure::StoreError => {
                    Err(AppError::Database(sqlx::Error::PoolTimedOut))
                }
            }
        }
        async fn set_order_total(&self, id: i32, total: Decimal) -> AppResult<u64> {
            self.inner.set_order_total(id, total).await
        }
        async fn mark_finalised(&self, id: i32) -> AppResult<u64> {
            self.inner.mark_finalised(id).await
        }
        async fn insert_line(&self, line: &NewOrderLine) -> AppResult<OrderLine> {
            self.inner.insert_line(line).await
        }
        async fn lines_for_order(&self, order_id: i32) -> AppResult<Vec<OrderLine>> {
            self.inner.lines_for_order(order_id).await
        }
    }

    async fn provision_with(failure: ProvisionFailure) -> (Fixture, Order, AppError) {
        let f = fixture(true).await;
        let failing = FailingProvision {
            inner: f.store.clone(),
            failure,
        };
        let service = service_over(Arc::new(failing), invoice_path());

        let order = open_order(&f, &service).await;
        let err = service
            .add_items(order.id, &[request(f.burger_id, 1)])
            .await
            .unwrap_err();
        (f, order, err)
    }

    #[tokio::test]
    async fn test_failed_provision_write_restores_workload() {
        let (f, order, err) = provision_with(ProvisionFailure::StoreError).await;
        assert!(matches!(err, AppError::Database(_)));

        let sipho = f.store.find_driver_by_name("Sipho").await.unwrap().unwrap();
        assert_eq!(sipho.workload, 0);
        let stored = f.store.find_order(order.id).await.unwrap().unwrap();
        assert!(stored.driver_id.is_none());
    }

    #[tokio::test]
    async fn test_unwritten_provision_restores_workload() {
        let (f, order, err) = provision_with(ProvisionFailure::NoRows).await;
        assert!(matches!(err, AppError::AlreadyFinalised(id) if id == order.id));

        let sipho = f.store.find_driver_by_name("Sipho").await.unwrap().unwrap();
        assert_eq!(sipho.workload, 0);
        assert_eq!(f.store.lines_for_order(order.id).await.unwrap().len(), 1);
    }
}
