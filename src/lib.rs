//! Food Quick
//!
//! Consola de gestión de pedidos a domicilio: registro de customers,
//! restaurants, items y drivers, captura de pedidos, asignación del driver
//! menos cargado de la ciudad y emisión de facturas.

pub mod cli;
pub mod config;
pub mod controllers;
pub mod database;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod utils;

pub use state::AppState;
pub use utils::errors::{AppError, AppResult};
