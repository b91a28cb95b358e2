//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a cada acción del menú.

use std::path::PathBuf;
use std::sync::Arc;

use crate::repositories::FoodStore;
use crate::services::{DriverAllocator, InvoiceRenderer, OrderService, RegistryService};

pub struct AppState {
    pub store: Arc<dyn FoodStore>,
    pub orders: OrderService,
    pub registry: RegistryService,
}

impl AppState {
    /// Construye los servicios sobre un mismo almacenamiento
    pub fn new(store: Arc<dyn FoodStore>, invoice_path: impl Into<PathBuf>) -> Self {
        let allocator = DriverAllocator::new(store.clone());
        let invoices = InvoiceRenderer::new(store.clone(), invoice_path);

        Self {
            orders: OrderService::new(store.clone(), allocator, invoices),
            registry: RegistryService::new(store.clone()),
            store,
        }
    }
}
