//! Asignación de drivers y balanceo de carga
//!
//! Para una ciudad se elige el driver con menor `workload`; los empates se
//! resuelven por el id más bajo, así el resultado no depende del orden en que
//! el almacenamiento devuelva las filas.

use std::sync::Arc;

use tracing::{info, warn};

use crate::models::{Driver, WorkloadDelta};
use crate::repositories::FoodStore;
use crate::utils::errors::{AppError, AppResult};

/// Driver con menor carga; empate -> menor id
pub fn select_least_loaded(drivers: &[Driver]) -> Option<&Driver> {
    drivers.iter().min_by_key(|driver| (driver.workload, driver.id))
}

#[derive(Clone)]
pub struct DriverAllocator {
    store: Arc<dyn FoodStore>,
}

impl DriverAllocator {
    pub fn new(store: Arc<dyn FoodStore>) -> Self {
        Self { store }
    }

    /// Elige el driver menos cargado de la ciudad
    pub async fn allocate(&self, city: &str) -> AppResult<Driver> {
        let drivers = self.store.drivers_in_city(city).await?;

        let chosen = select_least_loaded(&drivers)
            .cloned()
            .ok_or_else(|| AppError::NoDriverAvailable(city.trim().to_string()))?;

        info!(
            "🚗 Driver {} ({}) asignado en {} con carga {} de {} candidatos",
            chosen.id,
            chosen.name,
            city,
            chosen.workload,
            drivers.len()
        );
        Ok(chosen)
    }

    /// Ajuste atómico en el almacenamiento. Cero filas = driver desconocido
    /// (o decremento sobre carga cero): se registra y se devuelve, no es un error.
    pub async fn adjust_workload(&self, driver_id: i32, delta: WorkloadDelta) -> AppResult<u64> {
        let rows = self.store.adjust_workload(driver_id, delta).await?;
        if rows == 0 {
            warn!(
                "⚠️ Ajuste de carga {:?} sin efecto para el driver {}",
                delta, driver_id
            );
        } else {
            info!("📊 Carga del driver {} ajustada ({:?})", driver_id, delta);
        }
        Ok(rows)
    }

    /// Libera el hueco del driver de un pedido; sin driver no hace nada
    pub async fn release(&self, driver_id: Option<i32>) -> AppResult<u64> {
        match driver_id {
            Some(id) => self.adjust_workload(id, WorkloadDelta::Decrement).await,
            None => {
                info!("ℹ️ Pedido sin driver asignado, no hay carga que liberar");
                Ok(0)
            }
        }
    }
}
