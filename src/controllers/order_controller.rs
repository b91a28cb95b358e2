//! Acciones de menú sobre pedidos
//!
//! Los pedidos se localizan por número o, si el operador no lo tiene, listando
//! los pedidos de un customer en un restaurante.

use std::io::{BufRead, Write};

use super::customer_controller::CustomerController;
use crate::cli::display::{format_customer, format_order};
use crate::cli::input::Console;
use crate::cli::menu::numbered;
use crate::models::OrderDetails;
use crate::services::{CustomerRef, LineRequest, RestaurantRef};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{format_money, optional_text, MAX_QUANTITY};

pub struct OrderController<'a> {
    state: &'a AppState,
}

impl<'a> OrderController<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn capture<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> AppResult<()> {
        console.heading("Capture New Order")?;

        let customer = if console.read_yes_no("Is this an existing customer? (Y/N): ")? {
            let first_name = console.read_required("Customer first name: ")?;
            let surname = console.read_required("Customer surname: ")?;
            CustomerRef::by_name(&first_name, &surname)
        } else {
            let created = CustomerController::new(self.state).capture(console).await?;
            CustomerRef::Id(created.id)
        };
        let restaurant = console.read_required("Restaurant name: ")?;

        let order = self
            .state
            .orders
            .open(customer, RestaurantRef::Name(restaurant))
            .await?;
        console.success(&format!("Order number {} created.", order.id))?;

        let lines = self.read_lines(console).await?;
        if lines.is_empty() {
            console.say(format!(
                "No items added. Order {} stays incomplete until items are added.",
                order.id
            ))?;
            return Ok(());
        }

        self.state.orders.add_items(order.id, &lines).await?;
        self.show(console, order.id).await
    }

    pub async fn add_items<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> AppResult<()> {
        console.heading("Add Items To Existing Order")?;
        let Some(order_id) = self.choose_order(console).await? else {
            return Ok(());
        };

        let details = self.state.orders.order_details(order_id).await?;
        if details.order.finalised {
            return Err(AppError::AlreadyFinalised(order_id));
        }

        let lines = self.read_lines(console).await?;
        if lines.is_empty() {
            console.say("No items added.")?;
            return Ok(());
        }

        self.state.orders.add_items(order_id, &lines).await?;
        self.show(console, order_id).await
    }

    pub async fn find<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> AppResult<()> {
        console.heading("Find and Display Order")?;
        if let Some(order_id) = self.choose_order(console).await? {
            self.show(console, order_id).await?;
        }
        Ok(())
    }

    /// Pedidos sin total o sin driver, seguidos de customers con datos incompletos
    pub async fn list_incomplete<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> AppResult<()> {
        console.heading("Orders With Incomplete Information")?;
        let orders = self.state.orders.incomplete_orders().await?;
        print_orders(console, &orders, "There are no incomplete orders.")?;

        console.heading("Customers With Missing Details")?;
        let customers = self.state.registry.customers_with_missing_info().await?;
        if customers.is_empty() {
            console.say("All customers have complete details.")?;
        }
        for customer in &customers {
            console.say(format_customer(customer))?;
        }
        Ok(())
    }

    pub async fn list_pending<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> AppResult<()> {
        console.heading("Pending Orders")?;
        let orders = self.state.orders.pending_orders().await?;
        print_orders(console, &orders, "There are no pending orders.")
    }

    pub async fn list_for_driver<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> AppResult<()> {
        console.heading("Orders Allocated To A Specific Driver")?;
        let name = console.read_required("Driver name: ")?;
        let (driver, orders) = self.state.orders.orders_for_driver(&name).await?;

        console.say(format!(
            "{} ({}) has {} open order(s).",
            driver.name,
            driver.city,
            orders.len()
        ))?;
        print_orders(console, &orders, "No orders are allocated to this driver.")
    }

    pub async fn finalise<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> AppResult<()> {
        console.heading("Finalise Order")?;
        let Some(order_id) = self.choose_order(console).await? else {
            return Ok(());
        };

        let finalised = match self.state.orders.finalise(order_id).await {
            Ok(finalised) => finalised,
            Err(AppError::AlreadyFinalised(id)) => {
                console.failure(&AppError::AlreadyFinalised(id).user_message())?;
                if console.read_yes_no("Write its invoice again? (Y/N): ")? {
                    let emitted = self.state.orders.reissue_invoice(id).await?;
                    console.say(&emitted.text)?;
                    self.report_invoice_write(console, id, emitted.write_error.as_deref())?;
                }
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        console.say(&finalised.invoice)?;
        console.success(&format!("Order {} finalised.", finalised.order.id))?;
        self.report_invoice_write(console, finalised.order.id, finalised.invoice_error.as_deref())
    }

    fn report_invoice_write<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        order_id: i32,
        write_error: Option<&str>,
    ) -> AppResult<()> {
        let path = self.state.orders.invoices().path().display();
        match write_error {
            None => console.success(&format!("Invoice written to {}.", path))?,
            Some(reason) => console.failure(&format!(
                "The invoice for order {} could not be written to {}: {}. \
                 Choose Finalise Order again to retry.",
                order_id, path, reason
            ))?,
        }
        Ok(())
    }

    /// Número de pedido, preguntándolo directamente o buscando por nombres
    async fn choose_order<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> AppResult<Option<i32>> {
        if console.read_yes_no("Do you have an order Number? (Y/N): ")? {
            return Ok(Some(console.read_integer("Order number: ")?));
        }

        let first_name = console.read_required("Customer first name: ")?;
        let surname = console.read_required("Customer surname: ")?;
        let restaurant = console.read_required("Restaurant name: ")?;

        let orders = self
            .state
            .orders
            .find_orders_for(
                CustomerRef::by_name(&first_name, &surname),
                RestaurantRef::Name(restaurant),
            )
            .await?;
        if orders.is_empty() {
            console.failure("No orders found for that customer and restaurant.")?;
            return Ok(None);
        }

        print_orders(console, &orders, "")?;
        Ok(Some(console.read_integer("Order number: ")?))
    }

    /// Sub-menú "Add Items"; valida cada item antes de aceptarlo
    async fn read_lines<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> AppResult<Vec<LineRequest>> {
        let mut lines = Vec::new();
        loop {
            console.heading("Add Items")?;
            console.say(numbered(&["Add Item", "Finished"]))?;
            match console.read_integer("Enter a number: ")? {
                1 => {}
                2 => return Ok(lines),
                _ => {
                    console.failure("Invalid number entered.")?;
                    continue;
                }
            }

            let item_id = console.read_integer("Item number: ")?;
            let item = match self.state.registry.find_item(item_id).await {
                Ok(item) => item,
                Err(e) if !e.is_fatal() => {
                    console.failure(&e.user_message())?;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let quantity = console.read_integer("Quantity: ")?;
            if !(1..=MAX_QUANTITY).contains(&quantity) {
                console.failure(&format!("Quantity must be between 1 and {}.", MAX_QUANTITY))?;
                continue;
            }
            let instructions =
                optional_text(&console.read_line("Special instructions (blank for none): ")?);

            console.say(format!(
                "{} x {} (R{}) noted.",
                quantity,
                item.name,
                format_money(item.price)
            ))?;
            lines.push(LineRequest {
                item_id,
                quantity,
                instructions,
            });
        }
    }

    async fn show<R: BufRead, W: Write>(&self, console: &mut Console<R, W>, order_id: i32) -> AppResult<()> {
        let details = self.state.orders.order_details(order_id).await?;
        console.say(format_order(&details))?;
        Ok(())
    }
}

fn print_orders<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    orders: &[OrderDetails],
    empty_message: &str,
) -> AppResult<()> {
    if orders.is_empty() && !empty_message.is_empty() {
        console.say(empty_message)?;
    }
    for details in orders {
        console.say(format_order(details))?;
        console.blank()?;
    }
    Ok(())
}
