//! Generación de facturas
//!
//! La factura se compone a partir de un `OrderDetails` ya resuelto y se añade al
//! final del fichero configurado (`INVOICE_PATH`). Cada factura termina con una
//! línea en blanco para separarla de la siguiente.
//!
//! Un fallo al escribir el fichero no anula el pedido: se registra en
//! `EmittedInvoice::write_error` y la factura puede volver a emitirse.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::lookup::load_order_details;
use crate::models::OrderDetails;
use crate::repositories::FoodStore;
use crate::utils::errors::AppResult;
use crate::utils::validation::format_money;

/// Factura compuesta y resultado de guardarla
#[derive(Debug, Clone)]
pub struct EmittedInvoice {
    pub text: String,
    pub write_error: Option<String>,
}

pub struct InvoiceRenderer {
    store: Arc<dyn FoodStore>,
    path: PathBuf,
    // Serializa los appends para que dos facturas no se intercalen
    write_lock: Mutex<()>,
}

impl InvoiceRenderer {
    pub fn new(store: Arc<dyn FoodStore>, path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Texto de la factura. Los datos ausentes se imprimen vacíos.
    pub fn render(details: &OrderDetails) -> String {
        let customer = details.customer.as_ref();
        let restaurant = details.restaurant.as_ref();

        let customer_name = customer.map(|c| c.full_name()).unwrap_or_default();
        let email = customer.and_then(|c| c.email.clone()).unwrap_or_default();
        let phone = customer.and_then(|c| c.phone.clone()).unwrap_or_default();
        let customer_city = customer.and_then(|c| c.city.clone()).unwrap_or_default();
        let address = customer.and_then(|c| c.address.clone()).unwrap_or_default();
        let restaurant_name = restaurant.map(|r| r.name.clone()).unwrap_or_default();
        let restaurant_city = restaurant.map(|r| r.city.clone()).unwrap_or_default();
        let restaurant_phone = restaurant.and_then(|r| r.phone.clone()).unwrap_or_default();

        let mut lines = vec![
            "Invoice".to_string(),
            String::new(),
            format!("Order Number: {}", details.order.id),
            format!("Customer: {}", customer_name),
            format!("Email: {}", email),
            format!("Phone number: {}", phone),
            format!("Location: {}", customer_city),
            String::new(),
            format!(
                "You have ordered the following from {} in {}:",
                restaurant_name, restaurant_city
            ),
            String::new(),
        ];

        for entry in &details.lines {
            let instructions = entry.line.instructions.as_deref().unwrap_or("");
            let text = format!(
                "{} x {} (R{}) Special Instructions: {}",
                entry.line.quantity,
                entry.item_name.as_deref().unwrap_or("Unknown item"),
                format_money(entry.line.unit_price),
                instructions
            );
            lines.push(text.trim_end().to_string());
        }

        lines.push(String::new());
        let total = details.order.total_cost.map(format_money).unwrap_or_default();
        lines.push(format!("Total: {}", total));

        match &details.driver {
            Some(driver) => lines.push(format!(
                "{} is nearest to the restaurant and so they will be delivering your order at:",
                driver.name
            )),
            None => lines.push("No driver assigned to deliver your order at:".to_string()),
        }
        lines.push(address);
        lines.push(String::new());
        lines.push(format!(
            "If you need to contact the restaurant, their number is {}",
            restaurant_phone
        ));

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    /// Añade la factura al fichero, creándolo si no existe
    pub async fn append(&self, invoice: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(invoice.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.flush().await?;

        info!("🧾 Factura añadida a {}", self.path.display());
        Ok(())
    }

    /// Compone la factura del pedido y la guarda.
    ///
    /// Los errores al leer el pedido se propagan; un error al escribir el fichero
    /// queda en `write_error`.
    pub async fn emit(&self, order_id: i32) -> AppResult<EmittedInvoice> {
        let details = load_order_details(self.store.as_ref(), order_id).await?;
        let text = Self::render(&details);

        let write_error = match self.append(&text).await {
            Ok(()) => None,
            Err(e) => {
                warn!(
                    "⚠️ No se pudo escribir la factura del pedido {} en {}: {}",
                    order_id,
                    self.path.display(),
                    e
                );
                Some(e.to_string())
            }
        };

        Ok(EmittedInvoice { text, write_error })
    }
}
