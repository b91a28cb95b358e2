//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: ciclo de vida de
//! pedidos, asignación de drivers, facturas y mantenimiento de datos de referencia.
//! Los servicios trabajan contra `FoodStore`, nunca contra SQL directamente.

pub mod driver_allocation_service;
pub mod invoice_service;
pub mod lookup;
pub mod order_service;
pub mod registry_service;

pub use driver_allocation_service::{select_least_loaded, DriverAllocator};
pub use invoice_service::{EmittedInvoice, InvoiceRenderer};
pub use lookup::{CustomerRef, RestaurantRef};
pub use order_service::{FinalisedOrder, LineRequest, OrderService};
pub use registry_service::RegistryService;
