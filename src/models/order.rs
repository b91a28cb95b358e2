//! Modelo de Order y de sus líneas
//!
//! Ciclo de vida de un pedido:
//! - abierto: customer y restaurant conocidos, sin total ni driver
//! - aprovisionado: líneas añadidas, total calculado, driver asignado
//! - finalizado: driver liberado, factura emitida
//!
//! El coste de cada línea se captura al añadirla (`quantity × unit_price`) y no se
//! vuelve a derivar del precio actual del item.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use super::customer::Customer;
use super::driver::Driver;
use super::restaurant::Restaurant;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Order {
    #[sqlx(rename = "order_number")]
    pub id: i32,
    pub customer_id: i32,
    pub restaurant_id: i32,
    pub total_cost: Option<Decimal>,
    pub driver_id: Option<i32>,
    pub finalised: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStage {
    Opened,
    Provisioned,
    Finalised,
}

impl OrderStage {
    pub fn label(&self) -> &'static str {
        match self {
            OrderStage::Opened => "Opened",
            OrderStage::Provisioned => "Provisioned",
            OrderStage::Finalised => "Finalised",
        }
    }
}

impl Order {
    pub fn stage(&self) -> OrderStage {
        if self.finalised {
            OrderStage::Finalised
        } else if self.total_cost.is_some() && self.driver_id.is_some() {
            OrderStage::Provisioned
        } else {
            OrderStage::Opened
        }
    }

    /// Pedido al que todavía le falta total o driver
    pub fn is_incomplete(&self) -> bool {
        self.total_cost.is_none() || self.driver_id.is_none()
    }
}

/// Línea de pedido (tabla items_order)
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct OrderLine {
    #[sqlx(rename = "line_id")]
    pub id: i32,
    #[sqlx(rename = "order_number")]
    pub order_id: i32,
    pub item_id: i32,
    #[sqlx(rename = "item_quantity")]
    pub quantity: i32,
    pub unit_price: Decimal,
    #[sqlx(rename = "item_cost")]
    pub line_cost: Decimal,
    #[sqlx(rename = "preparation_instructions")]
    pub instructions: Option<String>,
}

/// Línea a insertar, con el precio ya capturado
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderLine {
    pub order_id: i32,
    pub item_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub instructions: Option<String>,
}

impl NewOrderLine {
    pub fn line_cost(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

/// Suma de los costes capturados de las líneas
pub fn sum_line_costs(lines: &[OrderLine]) -> Decimal {
    lines.iter().map(|line| line.line_cost).sum()
}

/// Línea con el nombre del item resuelto, para mostrar y facturar
#[derive(Debug, Clone, PartialEq)]
pub struct LineDetails {
    pub line: OrderLine,
    pub item_name: Option<String>,
}

/// Vista completa de un pedido con sus referencias resueltas
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetails {
    pub order: Order,
    pub customer: Option<Customer>,
    pub restaurant: Option<Restaurant>,
    pub driver: Option<Driver>,
    pub lines: Vec<LineDetails>,
}
