//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean las tablas de PostgreSQL
//! y los requests de creación validados.

pub mod customer;
pub mod driver;
pub mod item;
pub mod order;
pub mod restaurant;

pub use customer::{Customer, CustomerField, NewCustomer};
pub use driver::{Driver, DriverField, NewDriver, WorkloadDelta};
pub use item::{Item, ItemUpdate, NewItem, ITEM_NAME_MAX_LEN};
pub use order::{LineDetails, NewOrderLine, Order, OrderDetails, OrderLine, OrderStage};
pub use restaurant::{NewRestaurant, Restaurant, RestaurantField};
