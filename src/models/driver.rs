//! Modelo de Driver
//!
//! `workload` cuenta los pedidos abiertos (no finalizados) asignados al driver.
//! Solo cambia a través de `WorkloadDelta`, nunca con un valor absoluto.

use sqlx::FromRow;
use validator::Validate;

use crate::utils::validation::validate_not_blank;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Driver {
    #[sqlx(rename = "driver_id")]
    pub id: i32,
    #[sqlx(rename = "driver_name")]
    pub name: String,
    #[sqlx(rename = "driver_city")]
    pub city: String,
    #[sqlx(rename = "driver_workload")]
    pub workload: i32,
}

#[derive(Debug, Clone, Validate)]
pub struct NewDriver {
    #[validate(custom = "validate_not_blank", length(max = 150))]
    pub name: String,

    #[validate(custom = "validate_not_blank", length(max = 100))]
    pub city: String,
}

/// Ajuste del contador de carga de trabajo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadDelta {
    Increment,
    Decrement,
}

impl WorkloadDelta {
    pub fn amount(&self) -> i32 {
        match self {
            WorkloadDelta::Increment => 1,
            WorkloadDelta::Decrement => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverField {
    Name,
    City,
}

impl DriverField {
    pub const ALL: [DriverField; 2] = [DriverField::Name, DriverField::City];

    pub fn column(&self) -> &'static str {
        match self {
            DriverField::Name => "driver_name",
            DriverField::City => "driver_city",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DriverField::Name => "Driver Name",
            DriverField::City => "Driver Location (City)",
        }
    }

    pub fn max_len(&self) -> u64 {
        match self {
            DriverField::Name => 150,
            DriverField::City => 100,
        }
    }
}

/// Comparación de ciudades usada para el grupo de drivers
pub fn same_city(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
