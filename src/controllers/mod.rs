//! Controllers module
//!
//! Una acción de menú por método. Los controllers leen de la consola,
//! delegan en los servicios y muestran el resultado.

pub mod customer_controller;
pub mod driver_controller;
pub mod item_controller;
pub mod order_controller;
pub mod restaurant_controller;

pub use customer_controller::CustomerController;
pub use driver_controller::DriverController;
pub use item_controller::ItemController;
pub use order_controller::OrderController;
pub use restaurant_controller::RestaurantController;
